//! SSD1306 command definitions
//!
//! This module defines the command bytes used to control the SSD1306
//! OLED controller. Over the two-wire bus every frame starts with the
//! device address, followed by a control byte that selects how the rest
//! of the frame is interpreted.
//!
//! ## Frame Structure
//!
//! 1. START
//! 2. Address byte (7-bit address shifted left, write bit 0)
//! 3. Control byte: [`CONTROL_COMMAND`] or [`CONTROL_DATA`]
//! 4. Command or pixel bytes, each acknowledged
//! 5. STOP
//!
//! ## Example
//!
//! ```rust
//! use ssd1306_paged::command;
//!
//! // Column range 0..=127, then page 3 only
//! let addressing = [
//!     command::SET_COLUMN_ADDRESS, 0x00, 127,
//!     command::SET_PAGE_ADDRESS, 3, 3,
//! ];
//! assert_eq!(addressing[0], 0x21);
//! ```

// Control bytes

/// Control byte selecting a command stream (0x00)
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte selecting a pixel data stream (0x40)
pub const CONTROL_DATA: u8 = 0x40;

// Addressing commands

/// Memory addressing mode command (0x20)
///
/// Requires 1 byte: 0x00 = horizontal, 0x01 = vertical, 0x02 = page
pub const MEMORY_MODE: u8 = 0x20;

/// Horizontal addressing mode argument for [`MEMORY_MODE`]
pub const MEMORY_MODE_HORIZONTAL: u8 = 0x00;

/// Set column address range command (0x21)
///
/// Requires 2 bytes: [start column, end column]
pub const SET_COLUMN_ADDRESS: u8 = 0x21;

/// Set page address range command (0x22)
///
/// Requires 2 bytes: [start page, end page]
pub const SET_PAGE_ADDRESS: u8 = 0x22;

// Fundamental commands

/// Contrast control command (0x81)
///
/// Requires 1 byte: contrast level
pub const SET_CONTRAST: u8 = 0x81;

/// Resume display from RAM content (0xA4)
pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;

/// Normal display, 1 = lit pixel (0xA6)
pub const SET_NORMAL: u8 = 0xA6;

/// Inverted display, 0 = lit pixel (0xA7)
pub const SET_INVERSE: u8 = 0xA7;

/// Display off / sleep (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;

/// Display on (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;

/// Deactivate scrolling (0x2E)
pub const DEACTIVATE_SCROLL: u8 = 0x2E;

// Hardware configuration commands

/// Display start line, OR'ed with the line number (0x40)
pub const SET_START_LINE: u8 = 0x40;

/// Segment remap, column 0 mapped to SEG0 (0xA0)
pub const SEG_REMAP_NORMAL: u8 = 0xA0;

/// Segment remap, column 127 mapped to SEG0 (0xA1)
pub const SEG_REMAP_REVERSED: u8 = 0xA1;

/// Multiplex ratio command (0xA8)
///
/// Requires 1 byte: rows - 1
pub const SET_MUX_RATIO: u8 = 0xA8;

/// COM output scan from COM0 (0xC0)
pub const COM_SCAN_INC: u8 = 0xC0;

/// COM output scan towards COM0 (0xC8)
pub const COM_SCAN_DEC: u8 = 0xC8;

/// Display offset command (0xD3)
///
/// Requires 1 byte: vertical shift
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// COM pins hardware configuration command (0xDA)
///
/// Requires 1 byte: 0x02 = sequential (32 rows), 0x12 = alternative (64 rows)
pub const SET_COM_PINS: u8 = 0xDA;

// Timing and driving commands

/// Display clock divide ratio / oscillator frequency command (0xD5)
///
/// Requires 1 byte
pub const SET_CLOCK_DIV: u8 = 0xD5;

/// Pre-charge period command (0xD9)
///
/// Requires 1 byte
pub const SET_PRECHARGE: u8 = 0xD9;

/// VCOMH deselect level command (0xDB)
///
/// Requires 1 byte
pub const SET_VCOM_DETECT: u8 = 0xDB;

/// Charge pump setting command (0x8D)
///
/// Requires 1 byte: 0x14 = enable, 0x10 = disable
pub const SET_CHARGE_PUMP: u8 = 0x8D;
