//! Control loop
//!
//! One cycle: scan the mux, report the code if it changed, wait, evaluate
//! a pending passcode attempt, actuate, and evict an idle sequence.

pub mod controller;
pub mod diagnostic;

pub use controller::{Controller, CycleReport, MAX_CYCLE_DIAGNOSTICS};
pub use diagnostic::Diagnostic;
