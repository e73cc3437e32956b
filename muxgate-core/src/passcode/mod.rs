//! Passcode matching
//!
//! The oldest queued presses are compared against a fixed reference
//! sequence. Every full-length attempt is consumed whether it matches or
//! not; there is no sliding-window retry.

pub mod matcher;

pub use matcher::{MatchOutcome, Passcode};
