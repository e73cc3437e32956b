//! Board-agnostic core logic for the muxgate firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (mux lines, output bank, clock)
//! - Edge debouncer and key-press queue
//! - Multiplexer channel scanner
//! - Passcode matching
//! - The per-cycle controller that ties them together
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod input;
pub mod passcode;
pub mod scan;
pub mod traits;
