//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`BusError`](crate::bus::BusError) - Low-level line/peripheral errors
//!
//! A missing acknowledge is not an error. Bus drivers report it as `false`
//! and the display keeps going; the next frame redraws everything anyway.
//!
//! ## Example
//!
//! ```
//! use ssd1306_paged::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Rows must be a whole number of 8-row windows
//! let result = Dimensions::new(60, 128);
//! assert!(result.is_err());
//! ```

/// Maximum number of rows (COM outputs) supported by the SSD1306 controller
pub const MAX_ROWS: u8 = 64;

/// Maximum number of columns (SEG outputs) supported by the SSD1306 controller
pub const MAX_COLUMNS: u8 = 128;

/// Errors that can occur when talking to the display
///
/// Generic over the bus error type so callers can match on the
/// underlying pin or peripheral failure.
#[derive(Debug)]
pub enum Error<E> {
    /// Bus error (pin or shift-register peripheral)
    Bus(E),
    /// Window index outside the raster
    InvalidWindow {
        /// Requested window index
        index: u8,
        /// Number of windows in the raster
        count: u8,
    },
    /// Payload shorter than one window row of columns
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
            Self::InvalidWindow { index, count } => {
                write!(f, "Invalid window {index} (raster has {count})")
            }
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u8,
        /// Number of columns (width) requested
        cols: u8,
    },
    /// Device address does not fit in 7 bits
    InvalidAddress(u8),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (max {MAX_ROWS}x{MAX_COLUMNS}, rows must be multiple of 8)"
            ),
            Self::InvalidAddress(address) => {
                write!(f, "Invalid device address {address:#04x} (must be 7-bit)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
