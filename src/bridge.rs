//! Bridge: the one context object a host drives every tick.
//!
//! The bridge owns everything that lives between the simulation and the
//! display: the downsampler, the character grid, the key queue and the time
//! base. There is no global state; a host may run several bridges side by
//! side.
//!
//! # Tick loop
//!
//! ```text
//! host ──queue_key──▶ ┌────────┐ ──next_key──▶ simulation
//!                     │ Bridge │
//! simulation ──frame─▶└────────┘ ──present───▶ RenderSink
//! ```

use crate::error::{ConfigError, FrameError};
use crate::frame::{
    CharacterGrid, FrameDownsampler, GlyphPalette, PixelFormat, PixelFrame, Viewport, DEFAULT_PALETTE,
};
use crate::host::{PixelSource, RenderSink};
use crate::input::{KeyEvent, KeyQueue, KeyReceiver, DEFAULT_CAPACITY};
use crate::time::{ClockSource, MonotonicClock, TimeBase};
use std::io;

/// Configuration for a [`Bridge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Character grid width in columns.
    pub grid_width: u16,
    /// Character grid height in rows.
    pub grid_height: u16,
    /// Source pixel rows at the bottom of every frame left out of sampling.
    pub status_bar_rows: usize,
    /// Dark-to-bright glyph ramp.
    pub palette: String,
    /// Channel layout assumed for raw pixel slices.
    pub pixel_format: PixelFormat,
    /// Key queue capacity.
    pub queue_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            grid_width: 106,
            grid_height: 20,
            status_bar_rows: 10,
            palette: DEFAULT_PALETTE.to_string(),
            pixel_format: PixelFormat::Argb8888,
            queue_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl BridgeConfig {
    /// Set the character grid size.
    #[must_use]
    pub const fn with_grid(mut self, width: u16, height: u16) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    /// Set the number of status bar rows excluded from sampling.
    #[must_use]
    pub const fn with_status_bar_rows(mut self, rows: usize) -> Self {
        self.status_bar_rows = rows;
        self
    }

    /// Set the glyph ramp.
    #[must_use]
    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = palette.into();
        self
    }

    /// Set the channel layout for raw pixel slices.
    #[must_use]
    pub const fn with_pixel_format(mut self, format: PixelFormat) -> Self {
        self.pixel_format = format;
        self
    }

    /// Set the key queue capacity.
    #[must_use]
    pub const fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Check the configuration without building anything.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: a zero grid dimension, an invalid
    /// palette, or a zero queue capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_palette().map(drop)
    }

    fn build_palette(&self) -> Result<GlyphPalette, ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::ZeroGridDimension {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        GlyphPalette::new(&self.palette)
    }
}

/// Owned state shared by the simulation and the host.
///
/// Everything here is driven from one thread. Key events from other threads
/// arrive through an attached [`KeyReceiver`] and are moved into the local
/// queue when the simulation polls.
pub struct Bridge<C: ClockSource = MonotonicClock> {
    downsampler: FrameDownsampler,
    grid: CharacterGrid,
    status_bar_rows: usize,
    pixel_format: PixelFormat,
    queue: KeyQueue,
    input: Option<KeyReceiver>,
    /// Channel drops already reported.
    input_dropped: u64,
    time: TimeBase<C>,
    frame_count: u64,
    window_title: Option<String>,
}

impl Bridge<MonotonicClock> {
    /// Create a bridge on the OS monotonic clock.
    ///
    /// The time base starts now.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: BridgeConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: ClockSource> Bridge<C> {
    /// Create a bridge measuring time with `clock`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_clock(config: BridgeConfig, clock: C) -> Result<Self, ConfigError> {
        let palette = config.build_palette()?;
        let grid = CharacterGrid::new(config.grid_width, config.grid_height, palette.darkest());

        tracing::info!(
            width = config.grid_width,
            height = config.grid_height,
            status_bar_rows = config.status_bar_rows,
            glyphs = palette.len(),
            queue_capacity = config.queue_capacity,
            "bridge initialized"
        );

        Ok(Self {
            downsampler: FrameDownsampler::new(palette),
            grid,
            status_bar_rows: config.status_bar_rows,
            pixel_format: config.pixel_format,
            queue: KeyQueue::with_capacity(config.queue_capacity),
            input: None,
            input_dropped: 0,
            time: TimeBase::init(clock),
            frame_count: 0,
            window_title: None,
        })
    }

    // ---- Video ----

    /// Downsample the source's current frame and present it.
    ///
    /// The grid is fully rewritten before the sink sees it.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the sink. The grid and frame count are
    /// updated even then.
    pub fn draw_frame<P, S>(&mut self, source: &P, sink: &mut S) -> io::Result<()>
    where
        P: PixelSource + ?Sized,
        S: RenderSink + ?Sized,
    {
        self.render(&source.frame());
        sink.present(&self.grid)
    }

    /// Downsample `frame` into the grid without presenting it.
    pub fn render(&mut self, frame: &PixelFrame<'_>) -> &CharacterGrid {
        let viewport = Viewport::from_size(frame.width(), frame.height()).excluding_bottom(self.status_bar_rows);
        self.downsampler.downsample_viewport(frame, viewport, &mut self.grid);
        self.frame_count += 1;
        &self.grid
    }

    /// View a raw pixel slice in the configured channel layout.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the slice is too short.
    pub fn frame_from<'a>(&self, pixels: &'a [u32], width: usize, height: usize) -> Result<PixelFrame<'a>, FrameError> {
        PixelFrame::with_format(pixels, width, height, self.pixel_format)
    }

    /// The most recent frame.
    pub const fn grid(&self) -> &CharacterGrid {
        &self.grid
    }

    /// The glyph ramp in use.
    pub const fn palette(&self) -> &GlyphPalette {
        self.downsampler.palette()
    }

    /// Frames rendered so far.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    // ---- Input ----

    /// Enqueue a raw host key code (positive press, negative release).
    ///
    /// Returns `false` and enqueues nothing for 0 or magnitudes above 255.
    pub fn queue_key(&mut self, code: i32) -> bool {
        let evicting = self.queue.is_full();
        let accepted = self.queue.push_raw(code);
        if accepted {
            tracing::trace!(code, "queued key");
            if evicting {
                tracing::debug!(dropped = self.queue.dropped(), "key queue full, oldest event dropped");
            }
        }
        accepted
    }

    /// Enqueue a decoded event.
    pub fn queue_event(&mut self, event: KeyEvent) {
        let evicting = self.queue.is_full();
        self.queue.push(event);
        if evicting {
            tracing::debug!(dropped = self.queue.dropped(), "key queue full, oldest event dropped");
        }
    }

    /// Take events from another thread through `receiver`.
    ///
    /// Replaces (and returns) any receiver attached before.
    pub fn attach_input(&mut self, receiver: KeyReceiver) -> Option<KeyReceiver> {
        self.input_dropped = receiver.dropped();
        self.input.replace(receiver)
    }

    /// Stop taking events from another thread.
    pub fn detach_input(&mut self) -> Option<KeyReceiver> {
        self.input.take()
    }

    /// Next pending key event, oldest first. `None` means no event.
    ///
    /// Events waiting on an attached receiver are moved into the local queue
    /// first.
    pub fn next_key(&mut self) -> Option<KeyEvent> {
        self.relay_input();
        self.queue.pop()
    }

    /// Events waiting in the local queue (not counting the attached channel).
    pub const fn pending_keys(&self) -> usize {
        self.queue.len()
    }

    /// Events lost to overflow, in the local queue and the attached channel.
    pub fn dropped_keys(&self) -> u64 {
        self.queue.dropped() + self.input_dropped
    }

    fn relay_input(&mut self) {
        let Some(receiver) = &self.input else {
            return;
        };

        for event in receiver.try_iter() {
            let evicting = self.queue.is_full();
            self.queue.push(event);
            if evicting {
                tracing::debug!(dropped = self.queue.dropped(), "key queue full, oldest event dropped");
            }
        }

        let dropped = receiver.dropped();
        if dropped > self.input_dropped {
            tracing::debug!(
                dropped,
                new = dropped - self.input_dropped,
                "key channel full, oldest events dropped"
            );
            self.input_dropped = dropped;
        }
    }

    // ---- Time ----

    /// Milliseconds since the bridge was created, as a wrapping 32-bit tick.
    pub fn ticks_ms(&self) -> u32 {
        self.time.ticks_ms()
    }

    /// Milliseconds since the bridge was created.
    pub fn elapsed_ms(&self) -> u64 {
        self.time.elapsed_ms()
    }

    /// Suspend the calling thread through the bridge's clock.
    pub fn sleep_ms(&self, ms: u32) {
        self.time.sleep_ms(ms);
    }

    /// The bridge's time base.
    pub const fn time(&self) -> &TimeBase<C> {
        &self.time
    }

    // ---- Window ----

    /// Record a new window title.
    pub fn set_window_title(&mut self, title: &str) {
        tracing::info!(title, "window title changed");
        self.window_title = Some(title.to_string());
    }

    /// The last title set, if any.
    pub fn window_title(&self) -> Option<&str> {
        self.window_title.as_deref()
    }
}

impl<C: ClockSource> std::fmt::Debug for Bridge<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("grid", &format_args!("{}x{}", self.grid.width(), self.grid.height()))
            .field("status_bar_rows", &self.status_bar_rows)
            .field("pixel_format", &self.pixel_format)
            .field("queue", &self.queue)
            .field("input_attached", &self.input.is_some())
            .field("frame_count", &self.frame_count)
            .field("window_title", &self.window_title)
            .finish_non_exhaustive()
    }
}
