//! RP2040-specific HAL for the muxgate firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `muxgate-hal` traits:
//!
//! - GPIO newtypes over `embassy_rp::gpio::{Output, Input}`

#![no_std]

pub mod gpio;

// Re-export shared traits from muxgate-hal for convenience
pub use gpio::{RpInput, RpOutput};
pub use muxgate_hal::{InputPin, OutputPin};
