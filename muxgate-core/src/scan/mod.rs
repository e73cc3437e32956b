//! Multiplexer channel scanning
//!
//! Walks every selector value of the mux, samples the shared sense line
//! after a settle delay and packs the samples into a channel code.

pub mod scanner;

pub use scanner::{ChannelCode, MuxScanner};
