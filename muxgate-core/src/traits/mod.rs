//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod clock;
pub mod mux;
pub mod output;

pub use clock::Clock;
pub use mux::MuxLines;
pub use output::{OutputBank, OutputError};

// Delays come from embedded-hal-async so embassy's `Delay` plugs in directly
pub use embedded_hal_async::delay::DelayNs;
