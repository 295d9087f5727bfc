//! Input Actor: Dedicated thread for polling terminal key events.
//!
//! This actor runs in its own thread and uses crossterm's event polling to
//! capture keyboard input, translating it into signed key codes on a
//! [`KeySender`]. The tick loop never waits on the terminal.
//!
//! Most terminals report presses only. With a release timeout configured,
//! the actor synthesizes the missing releases: a key is considered held
//! while presses or auto-repeats keep arriving, and released once they stop.

use super::channel::KeySender;
use super::event::{KeyEvent, KeyId};
use super::keymap::KeyMap;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default synthetic-release delay.
///
/// Longer than common OS auto-repeat delays (250-600 ms), so the gap between
/// a press and its first repeat does not read as a release.
pub const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_millis(600);

/// Configuration for the input actor.
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// How long to wait for terminal events before checking shutdown.
    pub poll_timeout: Duration,
    /// Synthesize a release after this long without a press or repeat.
    /// `None` relies on the terminal reporting releases itself.
    pub release_timeout: Option<Duration>,
    /// Terminal key translation.
    pub keymap: KeyMap,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            release_timeout: Some(DEFAULT_RELEASE_TIMEOUT),
            keymap: KeyMap::default(),
        }
    }
}

/// Tracks which keys are held on terminals without release events.
///
/// One slot per key id; no allocation after construction.
#[derive(Debug, Clone)]
pub struct HoldTracker {
    last_seen: [Option<Instant>; 256],
    timeout: Duration,
}

impl HoldTracker {
    /// Tracker releasing keys `timeout` after their last press or repeat.
    pub const fn new(timeout: Duration) -> Self {
        Self {
            last_seen: [None; 256],
            timeout,
        }
    }

    /// Record a press or repeat.
    ///
    /// Returns `true` if the key was not already held, i.e. a press event
    /// should be emitted.
    pub fn press(&mut self, key: KeyId, now: Instant) -> bool {
        self.last_seen[usize::from(key.get())]
            .replace(now)
            .is_none()
    }

    /// Record a real release reported by the terminal.
    ///
    /// Returns `true` if the key was held.
    pub fn release(&mut self, key: KeyId) -> bool {
        self.last_seen[usize::from(key.get())].take().is_some()
    }

    /// Check if a key is currently held.
    pub fn is_held(&self, key: KeyId) -> bool {
        self.last_seen[usize::from(key.get())].is_some()
    }

    /// Release every key idle for longer than the timeout, calling `emit`
    /// for each in key-id order.
    pub fn expire(&mut self, now: Instant, mut emit: impl FnMut(KeyId)) {
        for (id, slot) in self.last_seen.iter_mut().enumerate() {
            let Some(seen) = *slot else { continue };
            if now.saturating_duration_since(seen) < self.timeout {
                continue;
            }
            *slot = None;
            if let Some(key) = u8::try_from(id).ok().and_then(KeyId::new) {
                emit(key);
            }
        }
    }
}

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Key channel producer feeding the tick loop.
    /// * `config` - Poll timeout, release synthesis and key map.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(sender: KeySender, config: InputConfig) -> std::io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("glyphcast-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, &config);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Check if the input thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(sender: &KeySender, shutdown: &Arc<AtomicBool>, config: &InputConfig) {
        tracing::debug!(release_timeout = ?config.release_timeout, "input actor started");
        let mut holds = config.release_timeout.map(HoldTracker::new);

        loop {
            if shutdown.load(Ordering::Relaxed) || !sender.is_connected() {
                break;
            }

            match event::poll(config.poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key_event)) => {
                        Self::forward_key(sender, &config.keymap, holds.as_mut(), key_event);
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "terminal event read failed"),
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event poll failed");
                    break;
                }
            }

            if let Some(holds) = holds.as_mut() {
                holds.expire(Instant::now(), |key| {
                    sender.send(KeyEvent::release(key));
                });
            }
        }

        tracing::debug!("input actor stopped");
    }

    /// Translate one terminal key event and push the resulting codes.
    fn forward_key(
        sender: &KeySender,
        keymap: &KeyMap,
        holds: Option<&mut HoldTracker>,
        key_event: event::KeyEvent,
    ) {
        let Some(key) = keymap.lookup(key_event.code) else {
            return;
        };

        for event in translate(key, key_event.kind, holds, Instant::now()) {
            sender.send(event);
        }
    }
}

/// Events to emit for one terminal key transition.
///
/// With a tracker, repeats only refresh the hold; without one, every press
/// and repeat is forwarded as a press.
fn translate(
    key: KeyId,
    kind: KeyEventKind,
    holds: Option<&mut HoldTracker>,
    now: Instant,
) -> Option<KeyEvent> {
    match (kind, holds) {
        (KeyEventKind::Press | KeyEventKind::Repeat, Some(holds)) => {
            holds.press(key, now).then(|| KeyEvent::press(key))
        }
        (KeyEventKind::Press | KeyEventKind::Repeat, None) => Some(KeyEvent::press(key)),
        (KeyEventKind::Release, Some(holds)) => holds.release(key).then(|| KeyEvent::release(key)),
        (KeyEventKind::Release, None) => Some(KeyEvent::release(key)),
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
