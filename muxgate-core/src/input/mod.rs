//! Button input handling
//!
//! Raw edges from the button lines pass through a single global
//! debouncer into an ordered key-press queue. The queue is shared between
//! the edge handlers and the control loop through [`SharedKeypad`].

pub mod debounce;
pub mod events;
pub mod keypad;
pub mod queue;

pub use debounce::Debouncer;
pub use events::{ButtonId, KeyPress};
pub use keypad::{Keypad, SharedKeypad};
pub use queue::KeyQueue;
