//! Software-timed two-wire bus master
//!
//! [`BitBangBus`] drives SDA and SCL as plain GPIO lines. Both pins must be
//! configured open-drain: `set_high` releases the line and lets the pull-up
//! win, `set_low` pulls it to ground. SDA is also read back to sample the
//! acknowledge bit, so it has to implement [`InputPin`] as well.
//!
//! ## Example
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use ssd1306_paged::{AckMode, BitBangBus, BusSpeed, SerialBus};
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
//! let mut bus = BitBangBus::new(MockPin, MockPin, MockDelay);
//! bus.set_speed(BusSpeed::Fast).set_ack_mode(AckMode::Strict);
//!
//! let _ = bus.start();
//! let _ = bus.transmit_byte(0x3C << 1);
//! let _ = bus.stop();
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::bus::{AckMode, BusError, BusSpeed, SerialBus, Timing};

/// Bus master that toggles SDA/SCL directly
///
/// ## Type Parameters
///
/// * `SDA` - Open-drain data pin implementing [`OutputPin`] and [`InputPin`]
/// * `SCL` - Open-drain clock pin implementing [`OutputPin`]
/// * `D` - Delay used between transitions
pub struct BitBangBus<SDA, SCL, D> {
    sda: SDA,
    scl: SCL,
    delay: D,
    timing: Timing,
    ack_mode: AckMode,
}

impl<SDA, SCL, D> BitBangBus<SDA, SCL, D>
where
    SDA: OutputPin + InputPin,
    SCL: OutputPin<Error = <SDA as ErrorType>::Error>,
    D: DelayNs,
{
    /// Create a new bus in standard mode with strict acknowledge checking
    pub fn new(sda: SDA, scl: SCL, delay: D) -> Self {
        Self {
            sda,
            scl,
            delay,
            timing: BusSpeed::Standard.timing(),
            ack_mode: AckMode::Strict,
        }
    }

    /// Set the speed class
    pub fn set_speed(&mut self, speed: BusSpeed) -> &mut Self {
        self.timing = speed.timing();
        self
    }

    /// Set explicit hold times
    pub fn set_timing(&mut self, timing: Timing) -> &mut Self {
        self.timing = timing;
        self
    }

    /// Get the current hold times
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Set acknowledge handling
    pub fn set_ack_mode(&mut self, mode: AckMode) -> &mut Self {
        self.ack_mode = mode;
        self
    }

    /// Get acknowledge handling
    pub fn ack_mode(&self) -> AckMode {
        self.ack_mode
    }

    /// Release the pins and delay
    pub fn release(self) -> (SDA, SCL, D) {
        (self.sda, self.scl, self.delay)
    }

    fn wait_low(&mut self) {
        if self.timing.low_ns > 0 {
            self.delay.delay_ns(self.timing.low_ns);
        }
    }

    fn wait_high(&mut self) {
        if self.timing.high_ns > 0 {
            self.delay.delay_ns(self.timing.high_ns);
        }
    }

    fn sda_high(&mut self) -> Result<(), BusError<<SDA as ErrorType>::Error>> {
        self.sda.set_high().map_err(BusError::Line)
    }

    fn sda_low(&mut self) -> Result<(), BusError<<SDA as ErrorType>::Error>> {
        self.sda.set_low().map_err(BusError::Line)
    }

    fn scl_high(&mut self) -> Result<(), BusError<<SDA as ErrorType>::Error>> {
        self.scl.set_high().map_err(BusError::Line)
    }

    fn scl_low(&mut self) -> Result<(), BusError<<SDA as ErrorType>::Error>> {
        self.scl.set_low().map_err(BusError::Line)
    }
}

impl<SDA, SCL, D> SerialBus for BitBangBus<SDA, SCL, D>
where
    SDA: OutputPin + InputPin,
    SCL: OutputPin<Error = <SDA as ErrorType>::Error>,
    D: DelayNs,
{
    type Error = BusError<<SDA as ErrorType>::Error>;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.sda_high()?;
        self.wait_high();
        self.scl_high()?;
        self.wait_high();
        self.sda_low()?;
        self.wait_high();
        self.scl_low()?;
        self.wait_low();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.sda_low()?;
        self.wait_low();
        self.scl_high()?;
        self.wait_high();
        self.sda_high()?;
        // Bus free time before the next START
        self.wait_low();
        Ok(())
    }

    fn transmit_byte(&mut self, value: u8) -> Result<bool, Self::Error> {
        let mut data = value;
        for _ in 0..8 {
            if data & 0x80 != 0 {
                self.sda_high()?;
            } else {
                self.sda_low()?;
            }
            data <<= 1;
            if self.ack_mode == AckMode::Strict {
                self.wait_low();
            }
            self.scl_high()?;
            self.wait_high();
            self.scl_low()?;
            self.wait_low();
        }

        // Ninth clock: SDA released, the peripheral pulls it low to acknowledge
        self.sda_high()?;
        self.scl_high()?;
        self.wait_high();
        let acked = match self.ack_mode {
            AckMode::Strict => self.sda.is_low().map_err(BusError::Line)?,
            AckMode::Shortcut => true,
        };
        self.scl_low()?;
        Ok(acked)
    }
}
