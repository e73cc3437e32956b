//! Monotonic time source

/// Millisecond monotonic clock
///
/// Timestamps wrap at `u32::MAX`; every consumer compares them with
/// `wrapping_sub`, so a wrap is only visible to intervals longer than
/// about 49 days.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
