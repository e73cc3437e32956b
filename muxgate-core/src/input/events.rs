//! Button identities and debounced key presses

/// Identity of a physical passcode button
///
/// A zero-based index into the board's button list, assigned once from
/// the board configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(u8);

impl ButtonId {
    /// Create a button identity from its board index
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Board index of this button
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// A debounced button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPress {
    /// Button that produced the edge
    pub button: ButtonId,
    /// Time the edge was accepted (ms)
    pub at_ms: u32,
}
