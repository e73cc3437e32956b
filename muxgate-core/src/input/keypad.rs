//! Shared keypad state
//!
//! [`Keypad`] owns the debounce clock and the key-press queue. Edge
//! handlers and the control loop reach it through [`SharedKeypad`], which
//! runs every access to completion inside one lock so the loop always sees
//! a consistent queue length and prefix.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::debounce::Debouncer;
use super::events::ButtonId;
use super::queue::KeyQueue;
use crate::config::TimingConfig;
use crate::control::Diagnostic;

/// Debouncer plus key-press queue
#[derive(Debug, Clone)]
pub struct Keypad {
    debouncer: Debouncer,
    queue: KeyQueue,
    idle_timeout_ms: u32,
}

impl Keypad {
    /// Create an empty keypad
    pub const fn new(timing: TimingConfig) -> Self {
        Self {
            debouncer: Debouncer::new(timing.debounce_ms),
            queue: KeyQueue::new(),
            idle_timeout_ms: timing.idle_timeout_ms,
        }
    }

    /// Handle a raw edge from `button`
    ///
    /// Bounces return `None` and leave the keypad untouched. An accepted
    /// press is queued and reported; if the queue is full the press is
    /// still counted by the debounce clock but reported as dropped.
    pub fn on_edge(&mut self, button: ButtonId, now_ms: u32) -> Option<Diagnostic> {
        let press = self.debouncer.on_edge(button, now_ms)?;
        match self.queue.push(press) {
            Ok(()) => Some(Diagnostic::KeyPress(button)),
            Err(_) => Some(Diagnostic::KeyPressDropped(button)),
        }
    }

    /// Clear an incomplete sequence after the idle timeout
    ///
    /// Does nothing on an empty queue, so an idle keypad stays quiet.
    pub fn evict_if_idle(&mut self, now_ms: u32) -> Option<Diagnostic> {
        if self.queue.is_empty() || self.debouncer.elapsed_ms(now_ms) <= self.idle_timeout_ms {
            return None;
        }
        self.queue.clear();
        Some(Diagnostic::SequenceCleared {
            idle_timeout_ms: self.idle_timeout_ms,
        })
    }

    /// Queued presses
    pub fn queue(&self) -> &KeyQueue {
        &self.queue
    }

    /// Queued presses, for consumption by the passcode matcher
    pub fn queue_mut(&mut self) -> &mut KeyQueue {
        &mut self.queue
    }

    /// Timestamp of the last accepted press
    pub fn last_accepted_ms(&self) -> u32 {
        self.debouncer.last_accepted_ms()
    }
}

/// [`Keypad`] behind a blocking mutex
///
/// The firmware uses `CriticalSectionRawMutex` so edge tasks and the
/// control task can share one `static`; host tests use `NoopRawMutex`.
pub struct SharedKeypad<M: RawMutex> {
    inner: Mutex<M, RefCell<Keypad>>,
}

impl<M: RawMutex> SharedKeypad<M> {
    /// Create an empty shared keypad
    pub const fn new(timing: TimingConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Keypad::new(timing))),
        }
    }

    /// Handle a raw edge (see [`Keypad::on_edge`])
    pub fn on_edge(&self, button: ButtonId, now_ms: u32) -> Option<Diagnostic> {
        self.lock(|keypad| keypad.on_edge(button, now_ms))
    }

    /// Run `f` with exclusive access to the keypad
    ///
    /// Must not be re-entered from inside `f`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Keypad) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Number of queued presses
    pub fn queued(&self) -> usize {
        self.lock(|keypad| keypad.queue().len())
    }

    /// Replace the keypad with an empty one using `timing`
    ///
    /// Queued presses and the debounce clock are discarded. Meant for boot,
    /// before any edge task runs.
    pub fn reset(&self, timing: TimingConfig) {
        self.lock(|keypad| *keypad = Keypad::new(timing));
    }
}
