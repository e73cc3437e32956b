//! Board wiring and build-time configuration
//!
//! Everything here is generated by build.rs from board.toml, so a wiring
//! change is a rebuild rather than a code change.

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;
use muxgate_core::config::TimingConfig;

/// Pins claimed from the peripheral set, grouped by role
pub struct BoardPins {
    /// Mux select lines, least significant first
    pub select: [Peri<'static, AnyPin>; SELECT_LINES],
    /// Mux common sense line
    pub sense: Peri<'static, AnyPin>,
    /// Passcode buttons in button-id order
    pub buttons: [Peri<'static, AnyPin>; BUTTON_COUNT],
    /// Toggled outputs in channel-code order
    pub outputs: [Peri<'static, AnyPin>; OUTPUT_COUNT],
}

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
