//! Control task
//!
//! Runs the scan / report / wait / evaluate / evict cycle forever and logs
//! whatever each cycle reports. The cycle itself paces the loop.

use defmt::*;
use embassy_time::Delay;

use muxgate_core::control::Controller;
use muxgate_drivers::{GpioOutputBank, Multiplexer};
use muxgate_hal_rp2040::{RpInput, RpOutput};

use super::log_diagnostic;
use crate::board::{OUTPUT_COUNT, SELECT_LINES};
use crate::channels::KEYPAD;
use crate::clock::EmbassyClock;

/// Multiplexer wired to the board's select and sense pins
pub type BoardMux = Multiplexer<RpOutput<'static>, RpInput<'static>, SELECT_LINES>;

/// Outputs wired to the board's output pins
pub type BoardOutputs = GpioOutputBank<RpOutput<'static>, OUTPUT_COUNT>;

/// Controller for this board
pub type BoardController = Controller<BoardMux, BoardOutputs, SELECT_LINES>;

#[embassy_executor::task]
pub async fn control_task(mut controller: BoardController) {
    info!(
        "Control task started: passcode length {}, {} outputs",
        controller.passcode().len(),
        OUTPUT_COUNT
    );

    let clock = EmbassyClock;
    let mut delay = Delay;

    loop {
        let report = controller.run_cycle(&KEYPAD, &clock, &mut delay).await;

        for diagnostic in report.iter() {
            log_diagnostic(diagnostic);
        }
    }
}
