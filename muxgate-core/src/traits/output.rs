//! Actuated output lines

/// Errors addressing an output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Index is not below the number of outputs
    OutOfRange {
        /// Requested index
        index: usize,
        /// Number of outputs in the bank
        len: usize,
    },
}

/// Indexed set of independently switchable binary outputs
pub trait OutputBank {
    /// Number of outputs in the bank
    fn len(&self) -> usize;

    /// Check if the bank has no outputs
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drive output `index` to a level
    fn set(&mut self, index: usize, high: bool) -> Result<(), OutputError>;

    /// Current level of output `index`, or `None` if out of range
    fn is_set_high(&self, index: usize) -> Option<bool>;

    /// Flip output `index` and return its new level
    fn toggle(&mut self, index: usize) -> Result<bool, OutputError> {
        let current = self.is_set_high(index).ok_or(OutputError::OutOfRange {
            index,
            len: self.len(),
        })?;
        self.set(index, !current)?;
        Ok(!current)
    }

    /// Drive every output low
    fn clear_all(&mut self) {
        for index in 0..self.len() {
            // index is always in range here
            let _ = self.set(index, false);
        }
    }
}
