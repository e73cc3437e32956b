//! Key-press queue
//!
//! Presses are kept in arrival order. The queue only shrinks by dropping a
//! prefix (a consumed passcode attempt) or by being cleared (idle
//! eviction).

use heapless::Deque;

use super::events::{ButtonId, KeyPress};
use crate::config::MAX_QUEUED_PRESSES;

/// Bounded FIFO of debounced key presses
#[derive(Debug, Clone)]
pub struct KeyQueue {
    presses: Deque<KeyPress, MAX_QUEUED_PRESSES>,
}

impl Default for KeyQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            presses: Deque::new(),
        }
    }

    /// Append a press
    ///
    /// Returns the press back if the queue is full.
    pub fn push(&mut self, press: KeyPress) -> Result<(), KeyPress> {
        self.presses.push_back(press)
    }

    /// Number of queued presses
    pub fn len(&self) -> usize {
        self.presses.len()
    }

    /// Check if no presses are queued
    pub fn is_empty(&self) -> bool {
        self.presses.is_empty()
    }

    /// Check if another press would be dropped
    pub fn is_full(&self) -> bool {
        self.presses.is_full()
    }

    /// Iterate presses oldest first
    pub fn iter(&self) -> impl Iterator<Item = &KeyPress> {
        self.presses.iter()
    }

    /// Iterate button identities oldest first
    pub fn buttons(&self) -> impl Iterator<Item = ButtonId> + '_ {
        self.presses.iter().map(|press| press.button)
    }

    /// Remove up to `count` presses from the front
    ///
    /// Returns the number of presses removed.
    pub fn consume_front(&mut self, count: usize) -> usize {
        let mut removed = 0;
        while removed < count && self.presses.pop_front().is_some() {
            removed += 1;
        }
        removed
    }

    /// Drop every queued press
    pub fn clear(&mut self) {
        self.presses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(index: u8, at_ms: u32) -> KeyPress {
        KeyPress {
            button: ButtonId::new(index),
            at_ms,
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = KeyQueue::new();
        queue.push(press(2, 300)).unwrap();
        queue.push(press(0, 600)).unwrap();
        queue.push(press(1, 900)).unwrap();

        let order: Vec<u8> = queue.buttons().map(ButtonId::index).collect();
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn test_consume_front_keeps_tail() {
        let mut queue = KeyQueue::new();
        for (i, index) in [0, 1, 2, 1, 0].into_iter().enumerate() {
            queue.push(press(index, i as u32 * 300)).unwrap();
        }

        assert_eq!(queue.consume_front(3), 3);
        let rest: Vec<KeyPress> = queue.iter().copied().collect();
        assert_eq!(rest, vec![press(1, 900), press(0, 1200)]);
    }

    #[test]
    fn test_consume_more_than_queued() {
        let mut queue = KeyQueue::new();
        queue.push(press(0, 300)).unwrap();
        assert_eq!(queue.consume_front(3), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_queue_returns_press() {
        let mut queue = KeyQueue::new();
        for i in 0..MAX_QUEUED_PRESSES {
            queue.push(press(0, i as u32)).unwrap();
        }
        assert!(queue.is_full());
        assert_eq!(queue.push(press(1, 99)), Err(press(1, 99)));
        assert_eq!(queue.len(), MAX_QUEUED_PRESSES);
    }

    #[test]
    fn test_clear() {
        let mut queue = KeyQueue::new();
        queue.push(press(0, 300)).unwrap();
        queue.push(press(1, 600)).unwrap();
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }
}
