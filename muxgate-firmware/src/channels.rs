//! State shared between Embassy tasks
//!
//! The button tasks only ever push into the keypad; the control task
//! evaluates and evicts. Both go through one critical-section lock.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use muxgate_core::input::SharedKeypad;

use crate::board;

/// Debouncer and key-press queue for all buttons
pub static KEYPAD: SharedKeypad<CriticalSectionRawMutex> = SharedKeypad::new(board::TIMING);
