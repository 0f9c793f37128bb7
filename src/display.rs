//! Core display operations

use log::{debug, trace, warn};

use crate::bus::SerialBus;
use crate::command::{
    CONTROL_COMMAND, CONTROL_DATA, DEACTIVATE_SCROLL, DISPLAY_ALL_ON_RESUME, DISPLAY_OFF,
    DISPLAY_ON, MEMORY_MODE, MEMORY_MODE_HORIZONTAL, SET_CHARGE_PUMP, SET_CLOCK_DIV,
    SET_COLUMN_ADDRESS, SET_COM_PINS, SET_CONTRAST, SET_DISPLAY_OFFSET, SET_INVERSE,
    SET_MUX_RATIO, SET_NORMAL, SET_PAGE_ADDRESS, SET_PRECHARGE, SET_START_LINE,
    SET_VCOM_DETECT,
};
use crate::config::{Config, Dimensions};
use crate::error::Error;

type DisplayResult<E> = core::result::Result<bool, Error<E>>;

/// Length of the command sequence sent by [`Display::init`]
pub const INIT_SEQUENCE_LEN: usize = 25;

/// Core display driver for SSD1306
///
/// Sends command and pixel frames over any [`SerialBus`]. Every method
/// returns `Ok(true)` when the controller acknowledged the whole frame;
/// `Ok(false)` means some byte went unacknowledged and was dropped.
pub struct Display<B>
where
    B: SerialBus,
{
    /// Two-wire bus
    bus: B,
    /// Display configuration
    config: Config,
}

impl<B> Display<B>
where
    B: SerialBus,
{
    /// Create a new Display instance
    pub fn new(bus: B, config: Config) -> Self {
        Self { bus, config }
    }

    /// Configure the controller and switch the panel on
    pub fn init(&mut self) -> DisplayResult<B::Error> {
        let sequence = self.init_sequence();
        debug!(
            "ssd1306: init {}x{} at {:#04x}",
            self.config.dimensions.cols, self.config.dimensions.rows, self.config.address
        );
        let acked = self.send_init(&sequence)?;
        if !acked {
            warn!("ssd1306: init sequence not acknowledged");
        }
        Ok(acked)
    }

    /// Controller configuration bytes derived from the config
    pub fn init_sequence(&self) -> [u8; INIT_SEQUENCE_LEN] {
        let config = &self.config;
        [
            DISPLAY_OFF,
            SET_CLOCK_DIV,
            config.clock_divider,
            SET_MUX_RATIO,
            config.dimensions.rows - 1,
            SET_DISPLAY_OFFSET,
            0x00,
            SET_START_LINE,
            SET_CHARGE_PUMP,
            config.charge_pump,
            MEMORY_MODE,
            MEMORY_MODE_HORIZONTAL,
            config.rotation.segment_remap(),
            config.rotation.com_scan(),
            SET_COM_PINS,
            config.com_pins,
            SET_CONTRAST,
            config.contrast,
            SET_PRECHARGE,
            config.precharge,
            SET_VCOM_DETECT,
            config.vcom_detect,
            DISPLAY_ALL_ON_RESUME,
            SET_NORMAL,
            DEACTIVATE_SCROLL,
        ]
    }

    /// Configuration frame, then a separate display-on frame
    fn send_init(&mut self, commands: &[u8]) -> DisplayResult<B::Error> {
        let acked = self.command_frame(commands)?;
        Ok(self.command_frame(&[DISPLAY_ON])? && acked)
    }

    /// Address one window: all columns, start page = end page = `index`
    pub fn set_window(&mut self, index: u8) -> DisplayResult<B::Error> {
        let count = self.config.dimensions.windows();
        if index >= count {
            return Err(Error::InvalidWindow { index, count });
        }
        self.command_frame(&[
            SET_COLUMN_ADDRESS,
            0x00,
            self.config.dimensions.cols - 1,
            SET_PAGE_ADDRESS,
            index,
            index,
        ])
    }

    /// Address window `index` and stream its column bytes
    ///
    /// `columns` must hold at least one byte per raster column; extra
    /// bytes are ignored.
    pub fn write_window(&mut self, index: u8, columns: &[u8]) -> DisplayResult<B::Error> {
        let required = self.config.dimensions.window_size();
        if columns.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: columns.len(),
            });
        }
        let addressed = self.set_window(index)?;
        let written = self
            .bus
            .write_frame(self.config.address, CONTROL_DATA, &columns[..required])
            .map_err(Error::Bus)?;
        trace!("ssd1306: window {index} flushed (ack: {})", addressed && written);
        Ok(addressed && written)
    }

    /// Set contrast level
    pub fn set_contrast(&mut self, contrast: u8) -> DisplayResult<B::Error> {
        self.config.contrast = contrast;
        self.command_frame(&[SET_CONTRAST, contrast])
    }

    /// Switch the panel on or off; RAM content is kept either way
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<B::Error> {
        self.command_frame(&[if on { DISPLAY_ON } else { DISPLAY_OFF }])
    }

    /// Invert pixel polarity
    pub fn set_inverted(&mut self, inverted: bool) -> DisplayResult<B::Error> {
        self.command_frame(&[if inverted { SET_INVERSE } else { SET_NORMAL }])
    }

    /// Send one command frame
    fn command_frame(&mut self, commands: &[u8]) -> DisplayResult<B::Error> {
        self.bus
            .write_frame(self.config.address, CONTROL_COMMAND, commands)
            .map_err(Error::Bus)
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the bus
    pub fn bus(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }
}
