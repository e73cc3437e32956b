//! muxgate - Multiplexer-Gated Passcode Firmware
//!
//! Main firmware binary for RP2040-based boards. A multiplexer scan picks
//! an output; entering the button passcode toggles it.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use muxgate_core::config::ControlConfig;
use muxgate_core::control::Controller;
use muxgate_core::input::ButtonId;
use muxgate_drivers::{GpioOutputBank, Multiplexer};
use muxgate_hal_rp2040::{RpInput, RpOutput};

mod board;
mod channels;
mod clock;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("muxgate firmware starting...");

    let p = embassy_rp::init(Default::default());
    let pins = board::take_pins(p);
    info!("Peripherals initialized");
    info!(
        "Mux select GPIOs {}, sense GPIO{}, buttons {}, outputs {}",
        board::SELECT_GPIOS,
        board::SENSE_GPIO,
        board::BUTTON_GPIOS,
        board::OUTPUT_GPIOS
    );

    let config = load_config();
    if config.timing != board::TIMING {
        warn!("Keypad timings replaced by defaults");
        channels::KEYPAD.reset(config.timing);
    }

    let mux = Multiplexer::new(pins.select.map(RpOutput::new), RpInput::new(pins.sense));
    let outputs = GpioOutputBank::new(pins.outputs.map(RpOutput::new));
    let controller = Controller::new(&config, mux, outputs);

    for (index, pin) in pins.buttons.into_iter().enumerate() {
        let button = ButtonId::new(index as u8);
        spawner
            .spawn(tasks::button_task(RpInput::new(pin), button))
            .unwrap();
    }

    spawner.spawn(tasks::control_task(controller)).unwrap();

    info!("All tasks spawned, muxgate running");
}

/// Build the control configuration from the generated board constants
///
/// build.rs already rejects invalid boards; the fallback only guards
/// against the core limits drifting from the build script's copy.
fn load_config() -> ControlConfig {
    match ControlConfig::new(board::TIMING, &board::PASSCODE, board::BUTTON_COUNT as u8) {
        Ok(config) => {
            info!(
                "Configuration loaded: {} buttons, debounce {}ms, idle timeout {}ms",
                config.button_count, config.timing.debounce_ms, config.timing.idle_timeout_ms
            );
            config
        }
        Err(e) => {
            error!("Invalid board configuration: {}, using defaults", e);
            ControlConfig::default()
        }
    }
}
