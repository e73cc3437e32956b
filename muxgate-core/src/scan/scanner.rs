//! Mux scanner and channel code

use core::fmt;

use embedded_hal_async::delay::DelayNs;

use crate::traits::MuxLines;

/// Binary-weighted code built from one sample per mux channel
///
/// Bit `v` is the sense line level while selector value `v` was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelCode(u8);

impl ChannelCode {
    /// Wrap a raw code
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Raw code value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Code as an output index
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }

    /// Level sampled for channel `selector`
    pub const fn channel(self, selector: usize) -> bool {
        selector < 8 && (self.0 >> selector) & 1 == 1
    }
}

impl fmt::Display for ChannelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scanner for a mux with `W` select lines
///
/// `W` is limited to 3 so the `2^W`-bit code fits a `u8`.
#[derive(Debug, Clone)]
pub struct MuxScanner<const W: usize> {
    /// Wait after changing the select lines (ms)
    settle_ms: u32,
    /// Last code passed to the diagnostic sink
    last_reported: Option<ChannelCode>,
}

impl<const W: usize> MuxScanner<W> {
    /// Number of mux channels
    pub const CHANNELS: usize = 1 << W;

    const WIDTH_OK: () = assert!(W >= 1 && W <= 3, "mux width must be 1..=3 select lines");

    /// Create a scanner; nothing has been reported yet
    pub const fn new(settle_ms: u32) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::WIDTH_OK;
        Self {
            settle_ms,
            last_reported: None,
        }
    }

    /// Scan every channel in ascending selector order
    ///
    /// Select line `i` carries bit `i` of the selector. Each sample is taken
    /// one settle delay after the select lines change, so a full scan takes
    /// `2^W * settle_ms`.
    pub async fn scan<L, D>(&self, lines: &mut L, delay: &mut D) -> ChannelCode
    where
        L: MuxLines,
        D: DelayNs,
    {
        debug_assert_eq!(lines.select_lines(), W);

        let mut code = 0u8;
        for selector in 0..Self::CHANNELS {
            for line in 0..W {
                lines.set_select(line, (selector >> line) & 1 == 1);
            }
            delay.delay_ms(self.settle_ms).await;
            if lines.read_sense() {
                code |= 1 << selector;
            }
        }
        ChannelCode(code)
    }

    /// Record `code` and return it if it differs from the last reported code
    ///
    /// The first call always reports.
    pub fn report(&mut self, code: ChannelCode) -> Option<ChannelCode> {
        if self.last_reported == Some(code) {
            return None;
        }
        self.last_reported = Some(code);
        Some(code)
    }

    /// Last reported code
    pub fn last_reported(&self) -> Option<ChannelCode> {
        self.last_reported
    }
}
