//! Human-readable status events
//!
//! The core never logs. Everything worth telling the operator is returned
//! as a [`Diagnostic`] and the firmware forwards it to defmt.

use core::fmt;

use crate::input::ButtonId;
use crate::scan::ChannelCode;

/// Status event produced by the keypad or the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A debounced press was queued
    KeyPress(ButtonId),
    /// A debounced press arrived while the queue was full
    KeyPressDropped(ButtonId),
    /// The scanned code differs from the last reported one
    ChannelSelected(ChannelCode),
    /// The oldest attempt matched the passcode
    PasscodeAccepted,
    /// The oldest attempt did not match the passcode
    PasscodeRejected,
    /// An output was flipped after a match
    OutputToggled {
        /// Output index (the channel code)
        index: ChannelCode,
        /// New output level
        high: bool,
    },
    /// A match selected an output that does not exist
    OutputOutOfRange {
        /// Offending channel code
        code: ChannelCode,
        /// Number of outputs
        outputs: usize,
    },
    /// An attempt was consumed
    AttemptConsumed {
        /// Presses left in the queue
        pending: usize,
    },
    /// An incomplete sequence was discarded after inactivity
    SequenceCleared {
        /// Idle timeout that expired (ms)
        idle_timeout_ms: u32,
    },
}

impl Diagnostic {
    /// Check if this event should be logged at warning level
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::OutputOutOfRange { .. } | Diagnostic::KeyPressDropped(_)
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Diagnostic::KeyPress(button) => write!(f, "key press: {}", button.index()),
            Diagnostic::KeyPressDropped(button) => {
                write!(f, "key press: {} dropped, queue full", button.index())
            }
            Diagnostic::ChannelSelected(code) => write!(f, "selected output: {}", code),
            Diagnostic::PasscodeAccepted => f.write_str("correct passcode"),
            Diagnostic::PasscodeRejected => f.write_str("wrong passcode"),
            Diagnostic::OutputToggled { index, high } => {
                write!(f, "toggling: {} ({})", index, if high { "on" } else { "off" })
            }
            Diagnostic::OutputOutOfRange { code, outputs } => write!(
                f,
                "invalid output: {}, valid range: 0-{}, doing nothing",
                code,
                outputs.saturating_sub(1)
            ),
            Diagnostic::AttemptConsumed { pending } => {
                write!(f, "attempt consumed, {} key presses pending", pending)
            }
            Diagnostic::SequenceCleared { idle_timeout_ms } => write!(
                f,
                "key press sequence cleared after {} seconds of inactivity",
                idle_timeout_ms / 1000
            ),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Diagnostic {
    fn format(&self, f: defmt::Formatter) {
        match *self {
            Diagnostic::KeyPress(button) => defmt::write!(f, "key press: {}", button.index()),
            Diagnostic::KeyPressDropped(button) => {
                defmt::write!(f, "key press: {} dropped, queue full", button.index())
            }
            Diagnostic::ChannelSelected(code) => {
                defmt::write!(f, "selected output: {}", code.value())
            }
            Diagnostic::PasscodeAccepted => defmt::write!(f, "correct passcode"),
            Diagnostic::PasscodeRejected => defmt::write!(f, "wrong passcode"),
            Diagnostic::OutputToggled { index, high } => defmt::write!(
                f,
                "toggling: {} ({})",
                index.value(),
                if high { "on" } else { "off" }
            ),
            Diagnostic::OutputOutOfRange { code, outputs } => defmt::write!(
                f,
                "invalid output: {}, valid range: 0-{}, doing nothing",
                code.value(),
                outputs.saturating_sub(1)
            ),
            Diagnostic::AttemptConsumed { pending } => {
                defmt::write!(f, "attempt consumed, {} key presses pending", pending)
            }
            Diagnostic::SequenceCleared { idle_timeout_ms } => defmt::write!(
                f,
                "key press sequence cleared after {} seconds of inactivity",
                idle_timeout_ms / 1000
            ),
        }
    }
}
