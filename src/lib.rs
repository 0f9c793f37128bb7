//! SSD1306 Paged Display Driver
//!
//! A driver for SSD1306 dot-matrix OLED controllers that never holds the
//! whole frame in memory. The raster is drawn one 8-row window at a time:
//! the segment list of a frame is replayed for every window and each
//! window is pushed to the controller as soon as it is finished.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocator
//! - `embedded-hal` v1.0 support
//! - Two-wire bus over plain GPIO ([`BitBangBus`]) or a USI-style shift
//!   register ([`UsiBus`])
//! - Standard, fast and undelayed bus timing
//! - Clipped line rasterization per window
//! - `embedded-graphics` integration (with `graphics` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use ssd1306_paged::{BitBangBus, Builder, BusSpeed, Cube, Dimensions, PagedDisplay};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let sda = MockPin;
//! # let scl = MockPin;
//! let mut bus = BitBangBus::new(sda, scl, MockDelay);
//! bus.set_speed(BusSpeed::Fast);
//!
//! let dims = match Dimensions::new(64, 128) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = PagedDisplay::new(bus, config);
//! let _ = display.init();
//!
//! let mut cube = Cube::new(dims);
//! loop {
//!     cube.advance();
//!     if display.render(&cube).is_err() {
//!         break;
//!     }
//! }
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Software-timed bus master over GPIO
pub mod bitbang;
/// Two-wire bus abstraction and timing
pub mod bus;
/// SSD1306 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Rotating wireframe cube
pub mod cube;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Segments and segment producers
pub mod geometry;
/// Line rasterization into the resident window
pub mod raster;
/// Paged frame rendering
pub mod session;
/// Shift-register assisted bus master
pub mod usi;
/// Single-window pixel buffer
pub mod window;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod sim;

pub use bitbang::BitBangBus;
pub use bus::{AckMode, BusError, BusSpeed, DEFAULT_STRETCH_LIMIT, SerialBus, Timing};
pub use config::{
    Builder, Config, DEFAULT_ADDRESS, Dimensions, MAX_COLUMNS, MAX_ROWS, Rotation, WINDOW_HEIGHT,
};
pub use cube::Cube;
pub use display::Display;
pub use error::{BuilderError, Error};
pub use geometry::{Segment, SegmentSource};
pub use raster::Rasterizer;
pub use session::{PagedDisplay, SessionState};
pub use usi::{ShiftRegister, UsiBus};
pub use window::PixelWindow;
