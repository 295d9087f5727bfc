//! Key channel: cross-thread single-producer/single-consumer key transport.
//!
//! When the host delivers input from its own thread, the raw ring buffer's
//! unsynchronized `head`/`tail` pair is replaced by a lock-free bounded
//! crossbeam queue. The overflow policy is unchanged: a full channel
//! overwrites its oldest unread event so the producer never blocks.
//!
//! ```text
//! ┌──────────────┐  force_push(code)  ┌───────────────┐  pop()  ┌───────────┐
//! │ Input Thread │ ─────────────────▶ │ ArrayQueue(C) │ ──────▶ │ Tick Loop │
//! └──────────────┘  overwrites oldest └───────────────┘         └───────────┘
//!                      when full
//! ```
//!
//! Eviction and insertion are a single atomic step, so an event is only
//! discarded when the queue really is full at the moment of the push. A
//! consumer that keeps up never loses anything.
//!
//! Neither end is `Clone`, so a channel has exactly one producer and one
//! consumer.

use super::event::KeyEvent;
use crossbeam_queue::ArrayQueue;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// State visible to both ends.
#[derive(Debug)]
struct Shared {
    queue: ArrayQueue<i32>,
    dropped: AtomicU64,
    sender_alive: AtomicBool,
    receiver_alive: AtomicBool,
}

/// Producer half of a key channel.
#[derive(Debug)]
pub struct KeySender {
    shared: Arc<Shared>,
}

/// Consumer half of a key channel.
#[derive(Debug)]
pub struct KeyReceiver {
    shared: Arc<Shared>,
}

/// Create a key channel holding at most `capacity` unread events.
///
/// # Panics
/// Panics if capacity is 0.
pub fn key_channel(capacity: usize) -> (KeySender, KeyReceiver) {
    assert!(capacity > 0, "Key channel capacity must be non-zero");
    let shared = Arc::new(Shared {
        queue: ArrayQueue::new(capacity),
        dropped: AtomicU64::new(0),
        sender_alive: AtomicBool::new(true),
        receiver_alive: AtomicBool::new(true),
    });

    let sender = KeySender {
        shared: Arc::clone(&shared),
    };
    let receiver = KeyReceiver { shared };
    (sender, receiver)
}

impl KeySender {
    /// Deliver an event without blocking.
    ///
    /// If the channel is full the oldest unread event is overwritten.
    /// Returns `false` once the receiver has been dropped.
    pub fn send(&self, event: KeyEvent) -> bool {
        if !self.shared.receiver_alive.load(Ordering::Acquire) {
            return false;
        }

        if let Some(evicted) = self.shared.queue.force_push(event.code()) {
            let total = self.shared.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::debug!(evicted, dropped = total, "key channel full, evicted oldest event");
        }
        true
    }

    /// Validate and deliver a raw host code.
    ///
    /// Returns `false` for 0, magnitudes above 255, or a dropped receiver.
    pub fn send_raw(&self, code: i32) -> bool {
        match KeyEvent::from_code(code) {
            Some(event) => self.send(event),
            None => {
                tracing::warn!(code, "rejected key code outside 1..=255");
                false
            }
        }
    }

    /// Check if the consumer still exists.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.shared.receiver_alive.load(Ordering::Acquire)
    }

    /// Events evicted by overflow so far.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }
}

impl Drop for KeySender {
    fn drop(&mut self) {
        self.shared.sender_alive.store(false, Ordering::Release);
    }
}

impl KeyReceiver {
    /// Take the oldest unread event, if any. Never blocks.
    pub fn try_recv(&self) -> Option<KeyEvent> {
        while let Some(code) = self.shared.queue.pop() {
            if let Some(event) = KeyEvent::decode(code) {
                return Some(event);
            }
        }
        None
    }

    /// Iterate over every event currently pending.
    pub fn try_iter(&self) -> impl Iterator<Item = KeyEvent> + '_ {
        std::iter::from_fn(|| self.try_recv())
    }

    /// Number of unread events.
    #[inline]
    pub fn len(&self) -> usize {
        self.shared.queue.len()
    }

    /// Check if there is nothing to read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shared.queue.is_empty()
    }

    /// Maximum number of unread events.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.shared.queue.capacity()
    }

    /// Check if the producer still exists.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.shared.sender_alive.load(Ordering::Acquire)
    }

    /// Events evicted by overflow so far.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }
}

impl Drop for KeyReceiver {
    fn drop(&mut self) {
        self.shared.receiver_alive.store(false, Ordering::Release);
    }
}
