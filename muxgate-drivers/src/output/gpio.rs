//! GPIO output bank
//!
//! Each output is a pin driven directly (LED with series resistor, or the
//! input of a relay/MOSFET driver).

use muxgate_core::traits::{OutputBank, OutputError};
use muxgate_hal::gpio::{OutputPin, PinLevel};

/// `N` directly driven outputs addressed by index
pub struct GpioOutputBank<P, const N: usize> {
    pins: [P; N],
}

impl<P: OutputPin, const N: usize> GpioOutputBank<P, N> {
    /// Create a bank; every output starts low
    pub fn new(pins: [P; N]) -> Self {
        let mut bank = Self { pins };
        bank.clear_all();
        bank
    }

    /// Pin behind output `index`
    pub fn pin(&self, index: usize) -> Option<&P> {
        self.pins.get(index)
    }

    fn pin_mut(&mut self, index: usize) -> Result<&mut P, OutputError> {
        self.pins
            .get_mut(index)
            .ok_or(OutputError::OutOfRange { index, len: N })
    }
}

impl<P: OutputPin, const N: usize> OutputBank for GpioOutputBank<P, N> {
    fn len(&self) -> usize {
        N
    }

    fn set(&mut self, index: usize, high: bool) -> Result<(), OutputError> {
        self.pin_mut(index)?.set_level(PinLevel::from_bit(high));
        Ok(())
    }

    fn is_set_high(&self, index: usize) -> Option<bool> {
        self.pins.get(index).map(|pin| pin.is_set_high())
    }

    // Use the pin's own toggle so hardware with a toggle register gets one write
    fn toggle(&mut self, index: usize) -> Result<bool, OutputError> {
        let pin = self.pin_mut(index)?;
        pin.toggle();
        Ok(pin.is_set_high())
    }
}
