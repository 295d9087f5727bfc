//! # Glyphcast
//!
//! Frame and input bridge between a pixel-rendering simulation and a text
//! display.
//!
//! Every tick the simulation's framebuffer is block-averaged into a fixed
//! grid of characters whose visual weight tracks brightness, and key events
//! from the host travel the other way through a bounded queue that drops the
//! oldest event when full.
//!
//! ## Core Concepts
//!
//! - **Downsampling**: exact integer block bounds, Rec. 601 luma, palette lookup
//! - **Owned context**: one [`Bridge`] per simulation, no global state
//! - **Drop-oldest input**: the newest keys always survive a burst
//! - **Injectable time**: a [`ClockSource`] makes tick timing testable
//!
//! ## Example
//!
//! ```rust,ignore
//! use glyphcast::{Bridge, BridgeConfig, CaptureSink, PixelFrame};
//!
//! let mut bridge = Bridge::new(BridgeConfig::default())?;
//! let mut sink = CaptureSink::new();
//!
//! let pixels = vec![0xFFFF_FFFF_u32; 320 * 200];
//! let frame = PixelFrame::new(&pixels, 320, 200)?;
//! bridge.draw_frame(&frame, &mut sink)?;
//!
//! bridge.queue_key(0xac);
//! while let Some(event) = bridge.next_key() {
//!     // feed the simulation
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bridge;
pub mod error;
pub mod ffi;
pub mod frame;
pub mod host;
pub mod input;
pub mod sink;
pub mod time;

// Re-exports for convenience
pub use bridge::{Bridge, BridgeConfig};
pub use error::{ConfigError, FrameError};
pub use frame::{CharacterGrid, FrameDownsampler, GlyphPalette, PixelFormat, PixelFrame, Rgb, Viewport, DEFAULT_PALETTE};
pub use host::{AmmoType, GameState, KeyCard, KeyCards, PixelSource, RenderSink, Weapon, WeaponAmmo};
pub use input::{key_channel, keys, InputActor, InputConfig, KeyEvent, KeyId, KeyMap, KeyQueue, KeyReceiver, KeySender};
pub use sink::{CaptureSink, SessionConfig, TerminalSession, TerminalSink};
pub use time::{ClockSource, FramePacer, ManualClock, MonotonicClock, TimeBase};
