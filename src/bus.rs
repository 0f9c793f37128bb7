//! Two-wire bus abstraction
//!
//! This module provides the [`SerialBus`] trait shared by the two bus
//! drivers in this crate:
//!
//! - [`BitBangBus`](crate::bitbang::BitBangBus) toggles two open-drain GPIO
//!   lines directly and times every transition with a delay.
//! - [`UsiBus`](crate::usi::UsiBus) hands each byte to a hardware shift
//!   register and strobes the clock until the peripheral reports completion.
//!
//! Both are interchangeable: the display only ever calls
//! [`start`](SerialBus::start), [`transmit_byte`](SerialBus::transmit_byte)
//! and [`stop`](SerialBus::stop). The variant is picked when the display
//! is composed, so dispatch is static.
//!
//! ## Acknowledge handling
//!
//! `transmit_byte` returns `Ok(true)` when the peripheral pulled SDA low on
//! the ninth clock. Nothing in this crate retries; a lost window is redrawn
//! on the next frame. [`AckMode::Shortcut`] skips the acknowledge sample
//! entirely and always reports success, for fixed peripherals that are
//! known to work.
//!
//! ## Timing
//!
//! | [`BusSpeed`] | SCL low | SCL high |
//! |--------------|---------|----------|
//! | `Standard`   | 4.7 µs  | 4.0 µs   |
//! | `Fast`       | 1.3 µs  | 0.6 µs   |
//! | `NoDelay`    | -       | -        |
//!
//! `NoDelay` breaks the bus timing limits and relies on the peripheral tolerating
//! whatever rate the MCU can toggle pins at.

use core::fmt::Debug;

/// Bus speed class, selecting the hold times used between transitions
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BusSpeed {
    /// Standard mode, 100 kHz class
    #[default]
    Standard,
    /// Fast mode, 400 kHz class
    Fast,
    /// No delays at all; throughput over compliance
    NoDelay,
}

impl BusSpeed {
    /// Hold times for this speed class
    pub fn timing(self) -> Timing {
        match self {
            Self::Standard => Timing {
                low_ns: 4_700,
                high_ns: 4_000,
            },
            Self::Fast => Timing {
                low_ns: 1_300,
                high_ns: 600,
            },
            Self::NoDelay => Timing {
                low_ns: 0,
                high_ns: 0,
            },
        }
    }
}

/// Minimum hold times after line transitions, in nanoseconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Hold time after pulling a line low (tLOW)
    pub low_ns: u32,
    /// Hold time after releasing a line high (tHIGH)
    pub high_ns: u32,
}

/// How the acknowledge bit is treated
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AckMode {
    /// Sample the acknowledge bit and report it
    #[default]
    Strict,
    /// Clock the acknowledge slot but always report success, and drop the
    /// data setup delay before each bit
    Shortcut,
}

/// Errors raised by the bus drivers themselves
///
/// A missing acknowledge is not one of them; see [`SerialBus::transmit_byte`].
#[derive(Debug, PartialEq)]
pub enum BusError<E> {
    /// Pin or peripheral access failed
    Line(E),
    /// A line was held low past the configured spin limit
    ClockStretchTimeout,
}

impl<E: Debug> core::fmt::Display for BusError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Line(e) => write!(f, "Line error: {e:?}"),
            Self::ClockStretchTimeout => write!(f, "Timeout waiting for bus line release"),
        }
    }
}

impl<E: Debug> core::error::Error for BusError<E> {}

/// Default spin limit when waiting for a released line (0 = wait forever)
pub const DEFAULT_STRETCH_LIMIT: u32 = 0;

/// Byte-level capability of a two-wire bus master
///
/// Implementations are blocking: every call returns only once the lines
/// have settled, and there is no cancellation.
pub trait SerialBus {
    /// Error type for bus operations
    type Error: Debug;

    /// Generate a START condition (SDA falls while SCL is high)
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Generate a STOP condition (SDA rises while SCL is high)
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Shift out one byte MSB first and clock the acknowledge slot
    ///
    /// Returns `Ok(true)` if the peripheral acknowledged, or always
    /// `Ok(true)` in [`AckMode::Shortcut`].
    fn transmit_byte(&mut self, value: u8) -> Result<bool, Self::Error>;

    /// Send one complete write frame: START, address, control byte,
    /// payload, STOP
    ///
    /// A missing acknowledge does not abort the frame. The result is
    /// `true` only if every byte was acknowledged.
    fn write_frame(&mut self, address: u8, control: u8, payload: &[u8]) -> Result<bool, Self::Error> {
        self.start()?;
        let mut acked = self.transmit_byte(address << 1)?;
        acked &= self.transmit_byte(control)?;
        for &byte in payload {
            acked &= self.transmit_byte(byte)?;
        }
        self.stop()?;
        Ok(acked)
    }
}
