//! Time module: monotonic time since initialization and tick pacing.
//!
//! - [`ClockSource`]: where "now" comes from ([`MonotonicClock`], [`ManualClock`])
//! - [`TimeBase`]: milliseconds elapsed since init, never decreasing
//! - [`FramePacer`]: fixed-rate tick scheduling

mod clock;
mod pacer;
mod timebase;

pub use clock::{ClockSource, ManualClock, MonotonicClock};
pub use pacer::{FramePacer, Tick, DEFAULT_TICK_RATE};
pub use timebase::TimeBase;
