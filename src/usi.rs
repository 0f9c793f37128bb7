//! Shift-register assisted two-wire bus master
//!
//! [`UsiBus`] drives a universal serial interface style peripheral: an
//! 8-bit data register whose MSB drives SDA, a 4-bit edge counter that
//! raises an overflow flag, and a software clock strobe that toggles SCL.
//! Instead of counting bits itself, the driver arms the counter, strobes
//! the clock and busy-waits until the peripheral reports overflow.
//!
//! The register level is hidden behind [`ShiftRegister`] so the same
//! driver runs against the real peripheral or a simulation.
//!
//! ## Transfer sequence
//!
//! For each byte:
//! 1. load the byte into the data register
//! 2. arm the counter for 8 bits and strobe until overflow
//! 3. release SDA, arm for 1 bit and strobe once more
//! 4. bit 0 of the data register now holds the acknowledge (0 = ACK)

use embedded_hal::delay::DelayNs;

use crate::bus::{AckMode, BusError, BusSpeed, DEFAULT_STRETCH_LIMIT, SerialBus, Timing};

type UsiResult<T, E> = core::result::Result<T, BusError<E>>;

/// Register-level access to a shift-register serial peripheral
///
/// Line control follows open-drain semantics: a line is pulled low only
/// while it is an output *and* its level is low (for SDA, also while the
/// data register MSB is 0).
pub trait ShiftRegister {
    /// Error type for register access
    type Error: core::fmt::Debug;

    /// Load a byte into the data register
    fn load(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Read the data register
    fn data(&mut self) -> Result<u8, Self::Error>;

    /// Clear the overflow flag and arm the counter for `bits` clock cycles
    fn arm(&mut self, bits: u8) -> Result<(), Self::Error>;

    /// Toggle SCL once; the data register shifts on the rising edge
    fn strobe(&mut self) -> Result<(), Self::Error>;

    /// Whether the counter has overflowed since the last [`arm`](Self::arm)
    fn overflowed(&mut self) -> Result<bool, Self::Error>;

    /// Make SDA an output (`true`) or release it (`false`)
    fn set_sda_output(&mut self, output: bool) -> Result<(), Self::Error>;

    /// Make SCL an output (`true`) or release it (`false`)
    fn set_scl_output(&mut self, output: bool) -> Result<(), Self::Error>;

    /// Set the SDA output level
    fn set_sda_level(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Set the SCL output level
    fn set_scl_level(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Read the SDA line
    fn sda_is_high(&mut self) -> Result<bool, Self::Error>;

    /// Read the SCL line
    fn scl_is_high(&mut self) -> Result<bool, Self::Error>;
}

/// Bus master built on a [`ShiftRegister`] peripheral
pub struct UsiBus<R, D> {
    usi: R,
    delay: D,
    timing: Timing,
    speed: BusSpeed,
    ack_mode: AckMode,
    stretch_limit: u32,
}

impl<R, D> UsiBus<R, D>
where
    R: ShiftRegister,
    D: DelayNs,
{
    /// Create a new bus and put the peripheral into its idle state
    ///
    /// Both lines are released high and the data register is filled with
    /// 0xFF so nothing is driven until the first START.
    pub fn new(mut usi: R, delay: D) -> UsiResult<Self, R::Error> {
        usi.set_sda_level(true).map_err(BusError::Line)?;
        usi.set_scl_level(true).map_err(BusError::Line)?;
        usi.set_sda_output(true).map_err(BusError::Line)?;
        usi.set_scl_output(true).map_err(BusError::Line)?;
        usi.load(0xFF).map_err(BusError::Line)?;
        Ok(Self {
            usi,
            delay,
            timing: BusSpeed::Standard.timing(),
            speed: BusSpeed::Standard,
            ack_mode: AckMode::Strict,
            stretch_limit: DEFAULT_STRETCH_LIMIT,
        })
    }

    /// Set the speed class
    pub fn set_speed(&mut self, speed: BusSpeed) -> &mut Self {
        self.speed = speed;
        self.timing = speed.timing();
        self
    }

    /// Set explicit hold times, keeping the speed class
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

    /// Set how many polls to wait for a released line before giving up
    ///
    /// Default is 0, which waits forever.
    pub fn set_stretch_limit(&mut self, polls: u32) -> &mut Self {
        self.stretch_limit = polls;
        self
    }

    /// Get the clock-stretch spin limit
    pub fn stretch_limit(&self) -> u32 {
        self.stretch_limit
    }

    /// Release the peripheral and delay
    pub fn release(self) -> (R, D) {
        (self.usi, self.delay)
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

    fn wait_released(
        &mut self,
        read: fn(&mut R) -> Result<bool, R::Error>,
    ) -> UsiResult<(), R::Error> {
        let mut polls = 0u32;
        while !read(&mut self.usi).map_err(BusError::Line)? {
            polls += 1;
            if self.stretch_limit > 0 && polls >= self.stretch_limit {
                return Err(BusError::ClockStretchTimeout);
            }
        }
        Ok(())
    }

    /// Clock out `bits` bits from the data register and return it afterwards
    fn transfer(&mut self, bits: u8) -> UsiResult<u8, R::Error> {
        self.usi.arm(bits).map_err(BusError::Line)?;
        loop {
            if self.ack_mode == AckMode::Strict {
                self.wait_low();
            }
            self.usi.strobe().map_err(BusError::Line)?;
            self.wait_released(R::scl_is_high)?;
            self.wait_high();
            self.usi.strobe().map_err(BusError::Line)?;
            if self.usi.overflowed().map_err(BusError::Line)? {
                break;
            }
        }
        self.wait_low();
        self.usi.data().map_err(BusError::Line)
    }
}

impl<R, D> SerialBus for UsiBus<R, D>
where
    R: ShiftRegister,
    D: DelayNs,
{
    type Error = BusError<R::Error>;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.usi.set_scl_level(true).map_err(BusError::Line)?;
        self.wait_released(R::scl_is_high)?;
        // Bus free time before START
        if self.speed == BusSpeed::Fast {
            self.wait_high();
        } else {
            self.wait_low();
        }
        self.usi.load(0xFF).map_err(BusError::Line)?;
        self.usi.set_sda_output(true).map_err(BusError::Line)?;
        self.usi.set_scl_output(true).map_err(BusError::Line)?;
        self.usi.set_sda_level(false).map_err(BusError::Line)?;
        self.wait_high();
        self.usi.set_scl_level(false).map_err(BusError::Line)?;
        self.wait_low();
        self.usi.set_sda_level(true).map_err(BusError::Line)?;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.usi.set_sda_level(false).map_err(BusError::Line)?;
        self.wait_low();
        self.usi.set_scl_output(false).map_err(BusError::Line)?;
        self.wait_released(R::scl_is_high)?;
        self.wait_high();
        self.usi.set_sda_output(false).map_err(BusError::Line)?;
        self.wait_released(R::sda_is_high)?;
        Ok(())
    }

    fn transmit_byte(&mut self, value: u8) -> Result<bool, Self::Error> {
        self.usi.load(value).map_err(BusError::Line)?;
        self.transfer(8)?;

        self.usi.set_sda_output(false).map_err(BusError::Line)?;
        let ack = self.transfer(1)?;
        self.usi.set_sda_output(true).map_err(BusError::Line)?;

        Ok(match self.ack_mode {
            AckMode::Strict => ack & 0x01 == 0,
            AckMode::Shortcut => true,
        })
    }
}
