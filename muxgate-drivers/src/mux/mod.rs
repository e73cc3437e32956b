//! Input multiplexers

pub mod gpio;

pub use gpio::Multiplexer;
