//! Frame pacer: fixed-rate tick scheduling on top of a [`TimeBase`].
//!
//! Ticks are scheduled on a fixed grid (`start + n * interval`). If the loop
//! falls behind, the schedule restarts from now instead of bursting to
//! catch up.

use super::clock::ClockSource;
use super::timebase::TimeBase;
use std::time::Duration;

/// Native tick rate of the simulations this crate was built for.
pub const DEFAULT_TICK_RATE: u32 = 35;

/// Timing for one completed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Tick number (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the time base was initialized.
    pub elapsed: Duration,
    /// How long the tick's own work took.
    pub busy: Duration,
}

/// Sleeps between ticks to hold a target rate.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next_tick: Duration,
    frame_start: Duration,
    frame: u64,
}

impl FramePacer {
    /// Pacer for `ticks_per_second` (clamped to at least 1).
    pub fn new(ticks_per_second: u32) -> Self {
        Self::with_interval(Duration::from_secs(1) / ticks_per_second.max(1))
    }

    /// Pacer with an explicit interval.
    pub const fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: Duration::ZERO,
            frame_start: Duration::ZERO,
            frame: 0,
        }
    }

    /// Time between ticks.
    #[inline]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks completed so far.
    #[inline]
    pub const fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Mark the start of a tick's work.
    pub fn begin_frame<C: ClockSource>(&mut self, time: &TimeBase<C>) {
        self.frame_start = time.elapsed();
        if self.frame == 0 {
            self.next_tick = self.frame_start;
        }
    }

    /// Finish a tick, sleeping until the next one is due.
    pub fn end_frame<C: ClockSource>(&mut self, time: &TimeBase<C>) -> Tick {
        let now = time.elapsed();
        let tick = Tick {
            frame: self.frame,
            elapsed: now,
            busy: now.saturating_sub(self.frame_start),
        };

        self.frame += 1;
        self.next_tick += self.interval;

        if self.next_tick > now {
            time.sleep(self.next_tick - now);
        } else {
            // Behind schedule: restart the grid rather than queueing ticks.
            self.next_tick = now;
        }

        tick
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}
