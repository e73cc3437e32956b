//! GPIO-driven input multiplexer
//!
//! Select lines are plain outputs, the common line a plain input. Several
//! mux chips can share the select lines as long as their common outputs are
//! combined onto the one sense pin.

use muxgate_core::traits::MuxLines;
use muxgate_hal::gpio::{InputPin, OutputPin, PinLevel};

/// Multiplexer with `W` select lines and one sense line
pub struct Multiplexer<S, I, const W: usize> {
    /// Select pins, least significant bit first
    select: [S; W],
    /// Common (sense) pin
    sense: I,
}

impl<S: OutputPin, I: InputPin, const W: usize> Multiplexer<S, I, W> {
    /// Create a multiplexer; selector 0 is applied immediately
    ///
    /// # Arguments
    /// - `select`: select pins, `select[0]` is S0
    /// - `sense`: the mux common output
    pub fn new(select: [S; W], sense: I) -> Self {
        let mut mux = Self { select, sense };
        for pin in mux.select.iter_mut() {
            pin.set_low();
        }
        mux
    }

    /// Current selector value as driven on the select pins
    pub fn selector(&self) -> usize {
        self.select
            .iter()
            .enumerate()
            .filter(|(_, pin)| pin.is_set_high())
            .map(|(line, _)| 1 << line)
            .sum()
    }

    /// Release the pins
    pub fn release(self) -> ([S; W], I) {
        (self.select, self.sense)
    }
}

impl<S: OutputPin, I: InputPin, const W: usize> MuxLines for Multiplexer<S, I, W> {
    fn select_lines(&self) -> usize {
        W
    }

    fn set_select(&mut self, line: usize, high: bool) {
        if let Some(pin) = self.select.get_mut(line) {
            pin.set_level(PinLevel::from_bit(high));
        }
    }

    fn read_sense(&mut self) -> bool {
        self.sense.is_high()
    }
}
