//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

/// Rows covered by one window (one controller page)
pub const WINDOW_HEIGHT: u8 = 8;

/// Default 7-bit device address of SSD1306 modules
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of rows (height in pixels, corresponds to COM outputs)
    pub rows: u8,
    /// Number of columns (width in pixels, corresponds to SEG outputs)
    pub cols: u8,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows == 0 or rows > MAX_ROWS
    /// - rows % 8 != 0 (the raster must be a whole number of windows)
    /// - cols == 0 or cols > MAX_COLUMNS
    pub fn new(rows: u8, cols: u8) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_ROWS || !rows.is_multiple_of(WINDOW_HEIGHT) {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if cols == 0 || cols > MAX_COLUMNS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of 8-row windows covering the raster
    pub fn windows(&self) -> u8 {
        self.rows / WINDOW_HEIGHT
    }

    /// Bytes transferred per window (one byte per column)
    pub fn window_size(&self) -> usize {
        self.cols as usize
    }
}

/// Display rotation relative to native orientation
///
/// The SSD1306 can only mirror in hardware, so the two supported
/// orientations are realized with segment remap and COM scan direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Rotation {
    /// Column 0 on SEG127, scan towards COM0 (the usual module wiring)
    #[default]
    Rotate0,
    /// Both axes mirrored
    Rotate180,
}

impl Rotation {
    /// Segment remap command for this orientation
    pub fn segment_remap(self) -> u8 {
        match self {
            Self::Rotate0 => crate::command::SEG_REMAP_REVERSED,
            Self::Rotate180 => crate::command::SEG_REMAP_NORMAL,
        }
    }

    /// COM scan direction command for this orientation
    pub fn com_scan(self) -> u8 {
        match self {
            Self::Rotate0 => crate::command::COM_SCAN_DEC,
            Self::Rotate180 => crate::command::COM_SCAN_INC,
        }
    }
}

/// Display configuration
///
/// This struct holds the configurable parameters for the SSD1306 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// 7-bit device address
    pub address: u8,
    /// Display rotation
    pub rotation: Rotation,
    /// Contrast level
    pub contrast: u8,
    /// Clock divide ratio / oscillator frequency byte
    pub clock_divider: u8,
    /// Pre-charge period byte
    pub precharge: u8,
    /// VCOMH deselect level byte
    pub vcom_detect: u8,
    /// Charge pump setting byte
    pub charge_pump: u8,
    /// COM pins hardware configuration byte
    pub com_pins: u8,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust
/// use ssd1306_paged::{Builder, Dimensions, Rotation};
///
/// let dims = match Dimensions::new(64, 128) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate180).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.com_pins, 0x12);
/// ```
#[must_use]
pub struct Builder {
    dimensions: Option<Dimensions>,
    address: u8,
    rotation: Rotation,
    contrast: u8,
    clock_divider: u8,
    precharge: u8,
    vcom_detect: u8,
    charge_pump: u8,
    /// Explicit COM pins byte; derived from rows when unset
    com_pins: Option<u8>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            address: DEFAULT_ADDRESS,
            rotation: Rotation::Rotate0,
            contrast: 0xCF,
            // Divide ratio 1, default oscillator frequency
            clock_divider: 0x80,
            precharge: 0xF1,
            vcom_detect: 0x40,
            // Internal charge pump on
            charge_pump: 0x14,
            com_pins: None,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the 7-bit device address (0x3C or 0x3D on most modules)
    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set contrast level
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = value;
        self
    }

    /// Set clock divide ratio / oscillator frequency
    pub fn clock_divider(mut self, value: u8) -> Self {
        self.clock_divider = value;
        self
    }

    /// Set pre-charge period
    pub fn precharge(mut self, value: u8) -> Self {
        self.precharge = value;
        self
    }

    /// Set VCOMH deselect level
    pub fn vcom_detect(mut self, value: u8) -> Self {
        self.vcom_detect = value;
        self
    }

    /// Set charge pump byte
    pub fn charge_pump(mut self, value: u8) -> Self {
        self.charge_pump = value;
        self
    }

    /// Override the COM pins configuration byte
    pub fn com_pins(mut self, value: u8) -> Self {
        self.com_pins = Some(value);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// or `BuilderError::InvalidAddress` if the address needs more than 7 bits
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        if self.address > 0x7F {
            return Err(BuilderError::InvalidAddress(self.address));
        }
        let com_pins = self
            .com_pins
            .unwrap_or(if dimensions.rows > 32 { 0x12 } else { 0x02 });
        Ok(Config {
            dimensions,
            address: self.address,
            rotation: self.rotation,
            contrast: self.contrast,
            clock_divider: self.clock_divider,
            precharge: self.precharge,
            vcom_detect: self.vcom_detect,
            charge_pump: self.charge_pump,
            com_pins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_valid() {
        let dims = Dimensions::new(64, 128).unwrap();
        assert_eq!(dims.windows(), 8);
        assert_eq!(dims.window_size(), 128);

        let dims = Dimensions::new(32, 128).unwrap();
        assert_eq!(dims.windows(), 4);
    }

    #[test]
    fn test_dimensions_rejects_partial_window() {
        assert_eq!(
            Dimensions::new(12, 128),
            Err(BuilderError::InvalidDimensions { rows: 12, cols: 128 })
        );
    }

    #[test]
    fn test_dimensions_rejects_out_of_range() {
        assert!(Dimensions::new(0, 128).is_err());
        assert!(Dimensions::new(72, 128).is_err());
        assert!(Dimensions::new(64, 0).is_err());
        assert!(Dimensions::new(64, 129).is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new()
            .dimensions(Dimensions::new(64, 128).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert_eq!(config.rotation, Rotation::Rotate0);
        assert_eq!(config.com_pins, 0x12);
    }

    #[test]
    fn test_builder_derives_com_pins_for_short_panels() {
        let config = Builder::new()
            .dimensions(Dimensions::new(32, 128).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.com_pins, 0x02);

        let config = Builder::new()
            .dimensions(Dimensions::new(32, 128).unwrap())
            .com_pins(0x12)
            .build()
            .unwrap();
        assert_eq!(config.com_pins, 0x12);
    }

    #[test]
    fn test_builder_rejects_wide_address() {
        let result = Builder::new()
            .dimensions(Dimensions::new(64, 128).unwrap())
            .address(0x80)
            .build();
        assert!(matches!(result, Err(BuilderError::InvalidAddress(0x80))));
    }

    #[test]
    fn test_builder_missing_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_rotation_commands() {
        assert_eq!(Rotation::Rotate0.segment_remap(), 0xA1);
        assert_eq!(Rotation::Rotate0.com_scan(), 0xC8);
        assert_eq!(Rotation::Rotate180.segment_remap(), 0xA0);
        assert_eq!(Rotation::Rotate180.com_scan(), 0xC0);
    }
}
