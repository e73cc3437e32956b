//! GPIO pin abstractions
//!
//! Select lines, the mux sense line, the passcode buttons and the
//! actuated outputs are all plain digital pins. Hardware faults are not
//! modelled: a pin that cannot be driven or read is a board-level fault,
//! so every operation here is infallible.

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLevel {
    Low,
    High,
}

impl PinLevel {
    /// Level for a single bit (`true` = high)
    pub fn from_bit(high: bool) -> Self {
        if high {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }

    /// Check if this is the high level
    pub fn is_high(self) -> bool {
        self == PinLevel::High
    }
}

/// Digital output pin
///
/// Used for the multiplexer select lines and the actuated output lines.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Flip the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Drive the pin to a specific level
    fn set_level(&mut self, level: PinLevel) {
        match level {
            PinLevel::High => self.set_high(),
            PinLevel::Low => self.set_low(),
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Used for the multiplexer sense line. Button edges are delivered by the
/// chip HAL's async edge waits and never go through this trait.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Sample the current level
    fn level(&self) -> PinLevel {
        PinLevel::from_bit(self.is_high())
    }
}
