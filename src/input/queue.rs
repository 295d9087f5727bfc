//! Key queue: fixed-capacity ring buffer between the host and the tick loop.
//!
//! Used from a single execution context: the host pushes while the
//! simulation is suspended, the simulation pops during its input step. For
//! cross-thread delivery see [`super::channel`].
//!
//! # Overflow
//!
//! Pushing into a full queue overwrites the oldest unread event. The
//! producer is never blocked and never told; late input is dropped instead.
//!
//! ```text
//!            head              tail
//!             ▼                 ▼
//!  ┌────┬────┬────┬────┬────┬────┬────┬────┐
//!  │    │    │ +65│ -65│ +13│    │    │    │   len = 3
//!  └────┴────┴────┴────┴────┴────┴────┴────┘
//! ```

use super::event::KeyEvent;

/// Default queue capacity.
pub const DEFAULT_CAPACITY: usize = 256;

/// Bounded ring buffer of raw key codes with drop-oldest overflow.
///
/// `head` and `tail` alone cannot tell an empty queue from a full one (both
/// show `head == tail`), so an explicit length is kept alongside them.
#[derive(Clone)]
pub struct KeyQueue {
    /// Raw signed codes; only slots inside `head..head+len` are live.
    slots: Box<[i32]>,
    /// Next slot to read.
    head: usize,
    /// Next slot to write.
    tail: usize,
    /// Number of unread events.
    len: usize,
    /// Events lost to overflow since creation.
    dropped: u64,
}

impl KeyQueue {
    /// Create a queue with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a queue with `capacity` slots.
    ///
    /// # Panics
    /// Panics if capacity is 0.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "Key queue capacity must be non-zero");
        Self {
            slots: vec![0; capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
            len: 0,
            dropped: 0,
        }
    }

    /// Maximum number of unread events.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of unread events.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if there is nothing to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if the next push will overwrite an unread event.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Events overwritten before they were read.
    #[inline]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Enqueue an event. O(1), never blocks.
    ///
    /// When the queue is full the oldest unread event is overwritten and
    /// counted in [`KeyQueue::dropped`].
    pub fn push(&mut self, event: KeyEvent) {
        let capacity = self.slots.len();
        self.slots[self.tail] = event.code();
        self.tail = (self.tail + 1) % capacity;

        if self.len == capacity {
            self.head = (self.head + 1) % capacity;
            self.dropped += 1;
        } else {
            self.len += 1;
        }
    }

    /// Enqueue a raw host code.
    ///
    /// Returns `false` (and enqueues nothing) for 0 or a magnitude above
    /// 255, since those would corrupt the sentinel protocol.
    pub fn push_raw(&mut self, code: i32) -> bool {
        match KeyEvent::from_code(code) {
            Some(event) => {
                self.push(event);
                true
            }
            None => {
                tracing::warn!(code, "rejected key code outside 1..=255");
                false
            }
        }
    }

    /// Dequeue and decode the oldest event. `None` means "no event".
    pub fn pop(&mut self) -> Option<KeyEvent> {
        if self.len == 0 {
            return None;
        }
        let code = self.slots[self.head];
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        KeyEvent::decode(code)
    }

    /// Discard every unread event.
    pub fn clear(&mut self) {
        self.head = self.tail;
        self.len = 0;
    }
}

impl Default for KeyQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyQueue")
            .field("capacity", &self.slots.len())
            .field("len", &self.len)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("dropped", &self.dropped)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::KeyId;

    fn key(id: u8) -> KeyId {
        KeyId::new(id).unwrap()
    }

    #[test]
    fn test_press_release_round_trip() {
        let mut queue = KeyQueue::new();
        assert!(queue.push_raw(65));
        assert!(queue.push_raw(-65));

        assert_eq!(queue.pop(), Some(KeyEvent::press(key(65))));
        assert_eq!(queue.pop(), Some(KeyEvent::release(key(65))));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut queue = KeyQueue::new();
        // 257 distinct codes: 1..=255, then -1, -2.
        let codes: Vec<i32> = (1..=255).chain([-1, -2]).collect();
        assert_eq!(codes.len(), 257);
        for &code in &codes {
            assert!(queue.push_raw(code));
        }

        assert_eq!(queue.len(), 256);
        assert_eq!(queue.dropped(), 1);

        let popped: Vec<i32> = std::iter::from_fn(|| queue.pop()).map(KeyEvent::code).collect();
        assert_eq!(popped, codes[1..]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_is_not_empty() {
        let mut queue = KeyQueue::with_capacity(4);
        for id in 1..=4 {
            queue.push(KeyEvent::press(key(id)));
        }
        assert!(queue.is_full());
        assert!(!queue.is_empty());
        assert_eq!(queue.pop(), Some(KeyEvent::press(key(1))));
    }

    #[test]
    fn test_wraparound_preserves_order() {
        let mut queue = KeyQueue::with_capacity(3);
        let mut expected = Vec::new();
        let mut popped = Vec::new();
        for id in 1..=20u8 {
            if queue.is_full() {
                popped.extend(queue.pop().map(|e| e.key.get()));
            }
            queue.push(KeyEvent::press(key(id)));
            expected.push(id);
        }
        popped.extend(std::iter::from_fn(|| queue.pop()).map(|e| e.key.get()));
        assert_eq!(queue.dropped(), 0);
        assert_eq!(popped, expected);
    }

    #[test]
    fn test_repeated_overflow() {
        let mut queue = KeyQueue::with_capacity(2);
        for id in 1..=10 {
            queue.push(KeyEvent::press(key(id)));
        }
        assert_eq!(queue.dropped(), 8);
        assert_eq!(queue.pop().map(|e| e.key.get()), Some(9));
        assert_eq!(queue.pop().map(|e| e.key.get()), Some(10));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_rejects_sentinel_and_out_of_range() {
        let mut queue = KeyQueue::new();
        assert!(!queue.push_raw(0));
        assert!(!queue.push_raw(256));
        assert!(!queue.push_raw(-300));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut queue = KeyQueue::new();
        queue.push_raw(1);
        queue.push_raw(2);
        queue.clear();
        assert_eq!(queue.pop(), None);
        queue.push_raw(3);
        assert_eq!(queue.pop().map(KeyEvent::code), Some(3));
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity() {
        KeyQueue::with_capacity(0);
    }
}
