//! Render sinks: where finished character grids go.
//!
//! - [`CaptureSink`]: keeps the latest frame as NUL-terminated text
//! - [`TerminalSink`]: draws to an ANSI terminal, diffing against the
//!   previous frame
//! - [`TerminalSession`]: raw mode / alternate screen guard for a real terminal

mod capture;
mod diff;
mod output;
mod terminal;

pub use capture::CaptureSink;
pub use diff::{render_diff, render_full, DiffResult, DiffState};
pub use output::OutputBuffer;
pub use terminal::{SessionConfig, TerminalSession, TerminalSink};
