//! Output banks

pub mod gpio;

pub use gpio::GpioOutputBank;
