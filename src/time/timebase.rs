//! Time base: milliseconds elapsed since the core was initialized.

use super::clock::{ClockSource, MonotonicClock};
use std::time::Duration;

/// Reference instant plus a clock to measure against it.
///
/// Construction captures the reference, so an uninitialized time base
/// cannot exist. Elapsed time is never negative and never decreases as long
/// as the clock source itself is monotonic.
#[derive(Debug, Clone)]
pub struct TimeBase<C: ClockSource = MonotonicClock> {
    clock: C,
    reference: Duration,
}

impl TimeBase<MonotonicClock> {
    /// Time base on the OS monotonic clock, starting now.
    pub fn start() -> Self {
        Self::init(MonotonicClock::new())
    }
}

impl<C: ClockSource> TimeBase<C> {
    /// Capture the reference instant from `clock`.
    pub fn init(clock: C) -> Self {
        let reference = clock.now();
        Self { clock, reference }
    }

    /// The underlying clock.
    #[inline]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Time since initialization.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.reference)
    }

    /// Whole milliseconds since initialization.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Milliseconds since initialization as a 32-bit tick counter.
    ///
    /// Wraps after about 49.7 days, matching engines that keep a `u32`
    /// millisecond clock.
    #[inline]
    pub fn ticks_ms(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let ticks = self.elapsed_ms() as u32;
        ticks
    }

    /// Suspend the caller through the clock source.
    pub fn sleep(&self, duration: Duration) {
        self.clock.sleep(duration);
    }

    /// Suspend the caller for `ms` milliseconds.
    pub fn sleep_ms(&self, ms: u32) {
        self.sleep(Duration::from_millis(u64::from(ms)));
    }
}
