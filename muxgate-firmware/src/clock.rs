//! Millisecond clock for the core logic

use embassy_time::Instant;

use muxgate_core::traits::Clock;

/// Milliseconds since boot, wrapping at `u32::MAX` (~49 days)
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
