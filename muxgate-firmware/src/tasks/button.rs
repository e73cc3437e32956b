//! Button edge task
//!
//! One instance per button. Each falling edge is stamped with the current
//! time and handed to the shared keypad, which decides whether it is a
//! press or a bounce.

use defmt::*;

use muxgate_core::input::ButtonId;
use muxgate_core::traits::Clock;
use muxgate_hal_rp2040::RpInput;

use super::log_diagnostic;
use crate::board::BUTTON_COUNT;
use crate::channels::KEYPAD;
use crate::clock::EmbassyClock;

/// Wait for presses on one button forever
#[embassy_executor::task(pool_size = BUTTON_COUNT)]
pub async fn button_task(mut pin: RpInput<'static>, button: ButtonId) {
    info!("Button task started for button {}", button.index());

    let clock = EmbassyClock;

    loop {
        pin.wait_for_falling_edge().await;

        // Stamp right before the lock; no await between the two
        if let Some(diagnostic) = KEYPAD.on_edge(button, clock.now_ms()) {
            log_diagnostic(&diagnostic);
        }
    }
}
