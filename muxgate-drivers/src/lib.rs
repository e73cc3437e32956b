//! GPIO driver implementations
//!
//! This crate implements the traits defined in muxgate-core on top of the
//! pin traits from muxgate-hal:
//!
//! - Input multiplexer (74HC153 / CD4052 style, 2 select lines)
//! - Bank of directly driven outputs (LEDs, relays)

#![no_std]
#![deny(unsafe_code)]

pub mod mux;
pub mod output;

pub use mux::Multiplexer;
pub use output::GpioOutputBank;
