//! In-memory sink keeping the latest frame as text.

use crate::frame::CharacterGrid;
use crate::host::RenderSink;
use std::io;

/// Keeps the most recent frame as NUL-terminated UTF-8.
///
/// The text is the grid's rows concatenated without separators, the flat
/// form an embedding host splits by its known row width.
#[derive(Debug, Clone)]
pub struct CaptureSink {
    /// Frame text followed by a single `'\0'`.
    text: String,
    frames: u64,
}

impl CaptureSink {
    /// Empty sink; the text is `""` until the first frame.
    pub fn new() -> Self {
        Self {
            text: String::from('\0'),
            frames: 0,
        }
    }

    /// Latest frame text, without the terminator.
    pub fn text(&self) -> &str {
        &self.text[..self.text.len() - 1]
    }

    /// Latest frame text including the trailing NUL byte.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Frames presented so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for CaptureSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for CaptureSink {
    fn present(&mut self, grid: &CharacterGrid) -> io::Result<()> {
        self.text.clear();
        grid.write_flat(&mut self.text);
        self.text.push('\0');
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_empty() {
        let sink = CaptureSink::new();
        assert_eq!(sink.text(), "");
        assert_eq!(sink.as_bytes_with_nul(), b"\0");
        assert_eq!(sink.frames(), 0);
    }

    #[test]
    fn test_capture_flat_text() {
        let mut grid = CharacterGrid::new(3, 2, '.');
        grid.set(2, 1, '@');

        let mut sink = CaptureSink::new();
        sink.present(&grid).unwrap();
        assert_eq!(sink.text(), ".....@");
        assert_eq!(sink.as_bytes_with_nul(), b".....@\0");

        grid.fill(' ');
        sink.present(&grid).unwrap();
        assert_eq!(sink.text(), "      ");
        assert_eq!(sink.frames(), 2);
    }
}
