//! GPIO trait implementations for RP2040
//!
//! Wraps embassy-rp pins so drivers can use them through the
//! `muxgate-hal` traits.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;

use muxgate_hal::gpio::{InputPin, OutputPin};

/// Push-pull output pin (select lines, actuated outputs)
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    /// Configure a pin as an output, initially driven low
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self(Output::new(pin, Level::Low))
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn toggle(&mut self) {
        self.0.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Input pin with the pull-down the board is wired for
///
/// Buttons and the mux common line idle low and are driven high when
/// active.
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    /// Configure a pin as a pulled-down input
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self(Input::new(pin, Pull::Down))
    }

    /// Wait for a high-to-low transition
    ///
    /// The buttons report a press on the falling edge (release).
    pub async fn wait_for_falling_edge(&mut self) {
        self.0.wait_for_falling_edge().await;
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
