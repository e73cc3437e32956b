//! Embassy async tasks
//!
//! Button tasks feed the shared keypad; the control task runs the cycle.

pub mod button;
pub mod control;

pub use button::button_task;
pub use control::{control_task, BoardController};

use defmt::{info, warn};
use muxgate_core::control::Diagnostic;

/// Log a diagnostic at its level
fn log_diagnostic(diagnostic: &Diagnostic) {
    if diagnostic.is_warning() {
        warn!("{}", diagnostic);
    } else {
        info!("{}", diagnostic);
    }
}
