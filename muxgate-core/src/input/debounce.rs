//! Edge debouncer
//!
//! One debounce clock is shared by every button: an accepted edge on any
//! line suppresses edges on all lines for the debounce window. Passcode
//! ordering depends on this, so it must not become per-line.

use super::events::{ButtonId, KeyPress};

/// Global edge debouncer
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Minimum gap to the last accepted edge (exclusive)
    window_ms: u32,
    /// Timestamp of the most recently accepted edge on any line
    last_accepted_ms: u32,
}

impl Debouncer {
    /// Create a debouncer whose clock starts at time zero
    ///
    /// Edges within `window_ms` of boot are therefore treated as bounces.
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted_ms: 0,
        }
    }

    /// Filter a raw edge
    ///
    /// Accepts the edge only if strictly more than the window has passed
    /// since the last accepted edge, and restarts the window on accept.
    pub fn on_edge(&mut self, button: ButtonId, now_ms: u32) -> Option<KeyPress> {
        if self.elapsed_ms(now_ms) > self.window_ms {
            self.last_accepted_ms = now_ms;
            Some(KeyPress {
                button,
                at_ms: now_ms,
            })
        } else {
            None
        }
    }

    /// Time since the last accepted edge
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_accepted_ms)
    }

    /// Timestamp of the last accepted edge
    pub fn last_accepted_ms(&self) -> u32 {
        self.last_accepted_ms
    }
}
