//! Two-wire bus simulator used by the unit tests
//!
//! Models open-drain SDA/SCL as wired-AND lines shared by the master under
//! test and one write-only peripheral. The peripheral detects START/STOP,
//! samples data on SCL rising edges, and pulls SDA low for the ninth clock
//! when the address byte matched.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::usi::ShiftRegister;

#[derive(Default)]
struct Wire {
    address: u8,
    master_sda_low: bool,
    master_scl_low: bool,
    device_sda_low: bool,
    in_frame: bool,
    shift: u8,
    bits: u8,
    byte_done: bool,
    ack_clock: bool,
    addressed: bool,
    current: Vec<u8>,
    frames: Vec<Vec<u8>>,
    starts: usize,
    stops: usize,
}

impl Wire {
    fn sda(&self) -> bool {
        !(self.master_sda_low || self.device_sda_low)
    }

    fn scl(&self) -> bool {
        !self.master_scl_low
    }

    fn set_master_sda_low(&mut self, low: bool) {
        let before = self.sda();
        self.master_sda_low = low;
        let after = self.sda();
        if before != after && self.scl() {
            if after {
                self.on_stop();
            } else {
                self.on_start();
            }
        }
    }

    fn set_master_scl_low(&mut self, low: bool) {
        let before = self.scl();
        self.master_scl_low = low;
        let after = self.scl();
        if before == after {
            return;
        }
        if after {
            self.on_rising();
        } else {
            self.on_falling();
        }
    }

    fn end_frame(&mut self) {
        if self.in_frame && !self.current.is_empty() {
            let frame = core::mem::take(&mut self.current);
            self.frames.push(frame);
        }
    }

    fn on_start(&mut self) {
        self.end_frame();
        self.starts += 1;
        self.in_frame = true;
        self.shift = 0;
        self.bits = 0;
        self.byte_done = false;
        self.ack_clock = false;
        self.addressed = false;
        self.device_sda_low = false;
    }

    fn on_stop(&mut self) {
        self.stops += 1;
        self.end_frame();
        self.in_frame = false;
        self.device_sda_low = false;
    }

    fn on_rising(&mut self) {
        if !self.in_frame {
            return;
        }
        if self.bits < 8 {
            self.shift = (self.shift << 1) | u8::from(self.sda());
            self.bits += 1;
        } else if self.byte_done {
            self.ack_clock = true;
        }
    }

    fn on_falling(&mut self) {
        if !self.in_frame {
            return;
        }
        if self.ack_clock {
            self.device_sda_low = false;
            self.ack_clock = false;
            self.byte_done = false;
            self.bits = 0;
            self.shift = 0;
        } else if self.bits == 8 && !self.byte_done {
            self.byte_done = true;
            let byte = self.shift;
            if self.current.is_empty() {
                self.addressed = byte >> 1 == self.address;
            }
            self.current.push(byte);
            self.device_sda_low = self.addressed;
        }
    }
}

/// Handle to a simulated bus with one peripheral on it
pub(crate) struct BusSim {
    wire: Rc<RefCell<Wire>>,
}

impl BusSim {
    /// Bus with a peripheral answering to the 7-bit `address`
    pub(crate) fn new(address: u8) -> Self {
        Self {
            wire: Rc::new(RefCell::new(Wire {
                address,
                ..Wire::default()
            })),
        }
    }

    pub(crate) fn sda_pin(&self) -> SimPin {
        SimPin {
            wire: Rc::clone(&self.wire),
            line: Line::Sda,
        }
    }

    pub(crate) fn scl_pin(&self) -> SimPin {
        SimPin {
            wire: Rc::clone(&self.wire),
            line: Line::Scl,
        }
    }

    pub(crate) fn usi(&self) -> SimUsi {
        SimUsi {
            wire: Rc::clone(&self.wire),
            data: 0xFF,
            latch: true,
            edges: 0,
            overflow: false,
            sda_output: false,
            sda_level: true,
            scl_output: false,
            scl_level: true,
        }
    }

    /// Completed frames, address byte included
    pub(crate) fn frames(&self) -> Vec<Vec<u8>> {
        self.wire.borrow().frames.clone()
    }

    pub(crate) fn starts(&self) -> usize {
        self.wire.borrow().starts
    }

    pub(crate) fn stops(&self) -> usize {
        self.wire.borrow().stops
    }

    pub(crate) fn sda_is_high(&self) -> bool {
        self.wire.borrow().sda()
    }

    pub(crate) fn scl_is_high(&self) -> bool {
        self.wire.borrow().scl()
    }
}

#[derive(Clone, Copy)]
enum Line {
    Sda,
    Scl,
}

/// Open-drain GPIO attached to the simulated bus
pub(crate) struct SimPin {
    wire: Rc<RefCell<Wire>>,
    line: Line,
}

impl SimPin {
    fn pull_low(&mut self, low: bool) {
        let mut wire = self.wire.borrow_mut();
        match self.line {
            Line::Sda => wire.set_master_sda_low(low),
            Line::Scl => wire.set_master_scl_low(low),
        }
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pull_low(true);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pull_low(false);
        Ok(())
    }
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let wire = self.wire.borrow();
        Ok(match self.line {
            Line::Sda => wire.sda(),
            Line::Scl => wire.scl(),
        })
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Shift-register peripheral attached to the simulated bus
///
/// The data register shifts in the SDA line on SCL rising edges; its MSB
/// is latched onto SDA on falling edges and on load. The edge counter
/// overflows after the armed number of clock cycles.
pub(crate) struct SimUsi {
    wire: Rc<RefCell<Wire>>,
    data: u8,
    latch: bool,
    edges: u8,
    overflow: bool,
    sda_output: bool,
    sda_level: bool,
    scl_output: bool,
    scl_level: bool,
}

impl SimUsi {
    fn drive_sda(&mut self) {
        let low = self.sda_output && (!self.sda_level || !self.latch);
        self.wire.borrow_mut().set_master_sda_low(low);
    }

    fn drive_scl(&mut self) {
        let low = self.scl_output && !self.scl_level;
        self.wire.borrow_mut().set_master_scl_low(low);
    }
}

impl ShiftRegister for SimUsi {
    type Error = Infallible;

    fn load(&mut self, value: u8) -> Result<(), Self::Error> {
        self.data = value;
        self.latch = value & 0x80 != 0;
        self.drive_sda();
        Ok(())
    }

    fn data(&mut self) -> Result<u8, Self::Error> {
        Ok(self.data)
    }

    fn arm(&mut self, bits: u8) -> Result<(), Self::Error> {
        self.edges = bits * 2;
        self.overflow = false;
        Ok(())
    }

    fn strobe(&mut self) -> Result<(), Self::Error> {
        self.scl_level = !self.scl_level;
        self.drive_scl();
        let (scl, sda) = {
            let wire = self.wire.borrow();
            (wire.scl(), wire.sda())
        };
        if scl {
            self.data = (self.data << 1) | u8::from(sda);
        } else {
            self.latch = self.data & 0x80 != 0;
            self.drive_sda();
        }
        if self.edges > 0 {
            self.edges -= 1;
            self.overflow = self.edges == 0;
        }
        Ok(())
    }

    fn overflowed(&mut self) -> Result<bool, Self::Error> {
        Ok(self.overflow)
    }

    fn set_sda_output(&mut self, output: bool) -> Result<(), Self::Error> {
        self.sda_output = output;
        self.drive_sda();
        Ok(())
    }

    fn set_scl_output(&mut self, output: bool) -> Result<(), Self::Error> {
        self.scl_output = output;
        self.drive_scl();
        Ok(())
    }

    fn set_sda_level(&mut self, high: bool) -> Result<(), Self::Error> {
        self.sda_level = high;
        self.drive_sda();
        Ok(())
    }

    fn set_scl_level(&mut self, high: bool) -> Result<(), Self::Error> {
        self.scl_level = high;
        self.drive_scl();
        Ok(())
    }

    fn sda_is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.wire.borrow().sda())
    }

    fn scl_is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.wire.borrow().scl())
    }
}

/// Peripheral whose SCL line never comes back high
pub(crate) struct StuckUsi;

impl ShiftRegister for StuckUsi {
    type Error = Infallible;

    fn load(&mut self, _value: u8) -> Result<(), Self::Error> {
        Ok(())
    }

    fn data(&mut self) -> Result<u8, Self::Error> {
        Ok(0xFF)
    }

    fn arm(&mut self, _bits: u8) -> Result<(), Self::Error> {
        Ok(())
    }

    fn strobe(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn overflowed(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn set_sda_output(&mut self, _output: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_scl_output(&mut self, _output: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_sda_level(&mut self, _high: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_scl_level(&mut self, _high: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn sda_is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn scl_is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

/// Delay that only records what it was asked to wait
#[derive(Debug, Default)]
pub(crate) struct CountingDelay {
    pub(crate) calls: u32,
    pub(crate) total_ns: u32,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += ns;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_stop_are_detected_only_with_scl_high() {
        let sim = BusSim::new(0x3C);
        let mut sda = sim.sda_pin();
        let mut scl = sim.scl_pin();

        scl.set_low().unwrap();
        sda.set_low().unwrap();
        sda.set_high().unwrap();
        assert_eq!(sim.starts(), 0);
        assert_eq!(sim.stops(), 0);

        scl.set_high().unwrap();
        sda.set_low().unwrap();
        assert_eq!(sim.starts(), 1);
        sda.set_high().unwrap();
        assert_eq!(sim.stops(), 1);
    }
}
