//! Configuration types
//!
//! Timing parameters, the passcode reference and the button count are
//! fixed at build time by the firmware's board file and validated here.

pub mod types;

pub use types::*;
