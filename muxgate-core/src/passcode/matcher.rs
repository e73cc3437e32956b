//! Passcode reference and matcher

use heapless::Vec;

use crate::config::{ConfigError, MAX_PASSCODE_LEN};
use crate::input::{ButtonId, KeyQueue};

/// Result of evaluating one passcode attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatchOutcome {
    /// Attempt matched the reference exactly
    Accepted,
    /// Attempt differed in at least one position
    Rejected,
}

impl MatchOutcome {
    /// Check if the attempt matched
    pub fn is_accepted(self) -> bool {
        self == MatchOutcome::Accepted
    }
}

/// Fixed reference sequence of buttons
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Passcode {
    sequence: Vec<ButtonId, MAX_PASSCODE_LEN>,
}

impl Passcode {
    /// Create a passcode from button identities
    pub fn new(sequence: &[ButtonId]) -> Result<Self, ConfigError> {
        if sequence.is_empty() {
            return Err(ConfigError::EmptyPasscode);
        }
        let sequence = Vec::from_slice(sequence).map_err(|_| ConfigError::PasscodeTooLong)?;
        Ok(Self { sequence })
    }

    /// Create a passcode from board button indices
    pub fn from_indices(indices: &[u8]) -> Result<Self, ConfigError> {
        if indices.len() > MAX_PASSCODE_LEN {
            return Err(ConfigError::PasscodeTooLong);
        }
        let mut sequence: Vec<ButtonId, MAX_PASSCODE_LEN> = Vec::new();
        for &index in indices {
            let _ = sequence.push(ButtonId::new(index));
        }
        Self::new(&sequence)
    }

    /// First, third, then second button
    pub(crate) fn reference() -> Self {
        let mut sequence = Vec::new();
        for index in [0, 2, 1] {
            let _ = sequence.push(ButtonId::new(index));
        }
        Self { sequence }
    }

    /// Number of presses in one attempt
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always false for a constructed passcode
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Reference buttons in order
    pub fn as_slice(&self) -> &[ButtonId] {
        &self.sequence
    }

    /// Compare an attempt position by position
    ///
    /// Only the first `len()` buttons of `attempt` are considered; a shorter
    /// attempt never matches.
    pub fn matches(&self, attempt: impl IntoIterator<Item = ButtonId>) -> bool {
        let mut attempt = attempt.into_iter();
        self.sequence
            .iter()
            .all(|expected| attempt.next() == Some(*expected))
    }

    /// Evaluate and consume the oldest attempt in `queue`
    ///
    /// Returns `None` and leaves the queue untouched until it holds a full
    /// attempt. Otherwise exactly `len()` presses are removed from the front
    /// regardless of the outcome; later presses keep their order.
    pub fn evaluate(&self, queue: &mut KeyQueue) -> Option<MatchOutcome> {
        if queue.len() < self.len() {
            return None;
        }

        let outcome = if self.matches(queue.buttons()) {
            MatchOutcome::Accepted
        } else {
            MatchOutcome::Rejected
        };
        queue.consume_front(self.len());
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyPress;
    use proptest::prelude::*;

    const A: ButtonId = ButtonId::new(0);
    const B: ButtonId = ButtonId::new(1);
    const C: ButtonId = ButtonId::new(2);

    fn queue_of(buttons: &[ButtonId]) -> KeyQueue {
        let mut queue = KeyQueue::new();
        for (i, &button) in buttons.iter().enumerate() {
            queue
                .push(KeyPress {
                    button,
                    at_ms: 300 * (i as u32 + 1),
                })
                .unwrap();
        }
        queue
    }

    #[test]
    fn test_reference_is_a_c_b() {
        assert_eq!(Passcode::reference().as_slice(), &[A, C, B]);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(Passcode::new(&[]), Err(ConfigError::EmptyPasscode));
        assert_eq!(
            Passcode::from_indices(&[0; MAX_PASSCODE_LEN + 1]),
            Err(ConfigError::PasscodeTooLong)
        );
        assert_eq!(Passcode::from_indices(&[1, 1]).unwrap().as_slice(), &[B, B]);
    }

    #[test]
    fn test_matching_attempt() {
        let passcode = Passcode::reference();
        let mut queue = queue_of(&[A, C, B]);
        assert_eq!(passcode.evaluate(&mut queue), Some(MatchOutcome::Accepted));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_wrong_order_is_consumed() {
        let passcode = Passcode::reference();
        let mut queue = queue_of(&[A, B, C]);
        assert_eq!(passcode.evaluate(&mut queue), Some(MatchOutcome::Rejected));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_short_queue_untouched() {
        let passcode = Passcode::reference();
        let mut queue = queue_of(&[A, C]);
        assert_eq!(passcode.evaluate(&mut queue), None);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_no_sliding_window() {
        // B, A, C, B contains A, C, B at offset 1, but only the prefix counts
        let passcode = Passcode::reference();
        let mut queue = queue_of(&[B, A, C, B]);
        assert_eq!(passcode.evaluate(&mut queue), Some(MatchOutcome::Rejected));
        assert_eq!(queue.buttons().collect::<std::vec::Vec<_>>(), vec![B]);

        // The leftover press waits for two more
        assert_eq!(passcode.evaluate(&mut queue), None);
    }

    #[test]
    fn test_tail_forms_next_attempt() {
        let passcode = Passcode::reference();
        let mut queue = queue_of(&[C, C, C, A, C, B]);
        assert_eq!(passcode.evaluate(&mut queue), Some(MatchOutcome::Rejected));
        assert_eq!(passcode.evaluate(&mut queue), Some(MatchOutcome::Accepted));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_matches_ignores_extra_presses() {
        let passcode = Passcode::reference();
        assert!(passcode.matches([A, C, B, A]));
        assert!(!passcode.matches([A, C]));
    }

    proptest! {
        #[test]
        fn prop_evaluation_consumes_exactly_len(
            indices in proptest::collection::vec(0u8..3, 3..16),
        ) {
            let passcode = Passcode::reference();
            let buttons: std::vec::Vec<ButtonId> = indices.iter().copied().map(ButtonId::new).collect();
            let mut queue = queue_of(&buttons);

            let outcome = passcode.evaluate(&mut queue);
            prop_assert!(outcome.is_some());
            prop_assert_eq!(outcome.unwrap().is_accepted(), buttons[..3] == [A, C, B]);

            let rest: std::vec::Vec<ButtonId> = queue.buttons().collect();
            prop_assert_eq!(rest.as_slice(), &buttons[3..]);
        }
    }
}
