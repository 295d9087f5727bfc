//! Input module: carrying key events from the host into the tick loop.
//!
//! This module contains:
//! - [`KeyEvent`] / [`KeyId`]: Signed key-code encoding and decoding
//! - [`KeyQueue`]: Single-context ring buffer with drop-oldest overflow
//! - [`key_channel`]: Cross-thread producer/consumer pair with the same policy
//! - [`KeyMap`]: Terminal key code translation
//! - [`InputActor`]: Thread polling the terminal and feeding a channel
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  KeySender   ┌─────────────┐  relay   ┌──────────┐  pop   ┌───────────┐
//! │ Input Thread │ ───────────▶ │ key_channel │ ───────▶ │ KeyQueue │ ─────▶ │ Tick Loop │
//! └──────────────┘              └─────────────┘          └──────────┘        └───────────┘
//!                                                             ▲
//!                              same-thread host ──────────────┘ push_raw
//! ```

mod channel;
mod event;
mod keymap;
mod queue;
mod terminal;

pub use channel::{key_channel, KeyReceiver, KeySender};
pub use event::{KeyEvent, KeyId};
pub use keymap::{keys, KeyMap};
pub use queue::{KeyQueue, DEFAULT_CAPACITY};
pub use terminal::{HoldTracker, InputActor, InputConfig, DEFAULT_RELEASE_TIMEOUT};
