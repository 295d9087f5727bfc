//! Terminal output: drawing grids to an ANSI terminal.
//!
//! [`TerminalSink`] writes frames to any [`Write`]r: the first frame as a
//! full redraw, later frames as a cell diff against what is already on
//! screen. [`TerminalSession`] puts the real terminal into raw mode on the
//! alternate screen for as long as it lives.

use super::diff::{render_diff, render_full, DiffResult, DiffState};
use super::output::OutputBuffer;
use crate::frame::CharacterGrid;
use crate::host::RenderSink;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Render sink drawing grids as text on an ANSI terminal.
pub struct TerminalSink<W: Write> {
    writer: W,
    /// Screen position of the grid's top-left cell.
    origin: (u16, u16),
    /// What is currently on screen; `None` until the first frame.
    displayed: Option<CharacterGrid>,
    state: DiffState,
    output: OutputBuffer,
    last: DiffResult,
}

impl<W: Write> TerminalSink<W> {
    /// Sink drawing at the top-left corner of the screen.
    pub fn new(writer: W) -> Self {
        Self::with_origin(writer, (0, 0))
    }

    /// Sink drawing with the grid's top-left cell at `origin` (column, row).
    pub fn with_origin(writer: W, origin: (u16, u16)) -> Self {
        Self {
            writer,
            origin,
            displayed: None,
            state: DiffState::new(),
            output: OutputBuffer::new(),
            last: DiffResult::default(),
        }
    }

    /// Sink centering a grid of `grid_size` on a screen of `screen_size`.
    ///
    /// Grids larger than the screen are pinned to the top-left corner.
    pub fn centered(writer: W, grid_size: (u16, u16), screen_size: (u16, u16)) -> Self {
        let x = screen_size.0.saturating_sub(grid_size.0) / 2;
        let y = screen_size.1.saturating_sub(grid_size.1) / 2;
        Self::with_origin(writer, (x, y))
    }

    /// Move the grid; the next frame is a full redraw.
    pub fn set_origin(&mut self, origin: (u16, u16)) {
        self.origin = origin;
        self.invalidate();
    }

    /// Forget what is on screen; the next frame is a full redraw.
    ///
    /// Call after a resize or anything else that disturbs the screen.
    pub fn invalidate(&mut self) {
        self.displayed = None;
        self.state.reset();
    }

    /// Statistics for the most recent frame.
    pub const fn last_frame(&self) -> DiffResult {
        self.last
    }

    /// The underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn present(&mut self, grid: &CharacterGrid) -> io::Result<()> {
        self.output.clear();

        let same_size = self
            .displayed
            .as_ref()
            .is_some_and(|shown| shown.width() == grid.width() && shown.height() == grid.height());

        if let Some(shown) = self.displayed.as_mut().filter(|_| same_size) {
            self.last = render_diff(shown, grid, self.origin, &mut self.output, &mut self.state);
            shown.copy_from(grid);
        } else {
            self.output.clear_screen();
            self.last = render_full(grid, self.origin, &mut self.output, &mut self.state);
            self.displayed = Some(grid.clone());
        }

        if self.output.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.output.flush_to(&mut self.writer) {
            // Partial write: screen content is now unknown.
            self.invalidate();
            return Err(e);
        }
        Ok(())
    }
}

/// Terminal modes held by a [`TerminalSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Read keys without line buffering or echo.
    pub raw_mode: bool,
    /// Draw on the alternate screen, restoring the shell screen on exit.
    pub alternate_screen: bool,
    /// Hide the cursor while the session is active.
    pub hide_cursor: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            raw_mode: true,
            alternate_screen: true,
            hide_cursor: true,
        }
    }
}

/// Guard that configures the controlling terminal and restores it on drop.
pub struct TerminalSession {
    config: SessionConfig,
}

impl TerminalSession {
    /// Enter the session with default modes.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn enter() -> io::Result<Self> {
        Self::with_config(SessionConfig::default())
    }

    /// Enter the session with custom modes.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails. Modes already applied are
    /// rolled back.
    pub fn with_config(config: SessionConfig) -> io::Result<Self> {
        // Constructed first so a later failure restores whatever was set.
        let session = Self {
            config: SessionConfig {
                raw_mode: false,
                alternate_screen: false,
                hide_cursor: false,
            },
        };
        session.apply(config)
    }

    fn apply(mut self, config: SessionConfig) -> io::Result<Self> {
        let mut stdout = io::stdout();

        if config.raw_mode {
            terminal::enable_raw_mode()?;
            self.config.raw_mode = true;
        }
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
            self.config.alternate_screen = true;
        }
        if config.hide_cursor {
            execute!(stdout, cursor::Hide)?;
            self.config.hide_cursor = true;
        }

        tracing::debug!(?config, "terminal session entered");
        Ok(self)
    }

    /// Current terminal size as (columns, rows).
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// The modes this session holds.
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.config.hide_cursor {
            let _ = execute!(stdout, cursor::Show);
        }
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        if self.config.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_row(parser: &vt100::Parser, row: u16, cols: std::ops::Range<u16>) -> String {
        cols.map(|col| {
            parser
                .screen()
                .cell(row, col)
                .map(vt100::Cell::contents)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| " ".to_string())
        })
        .collect()
    }

    fn grid_from(rows: &[&str]) -> CharacterGrid {
        let width = u16::try_from(rows[0].chars().count()).unwrap();
        let height = u16::try_from(rows.len()).unwrap();
        let mut grid = CharacterGrid::new(width, height, ' ');
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                grid.set(x as u16, y as u16, glyph);
            }
        }
        grid
    }

    #[test]
    fn test_first_frame_full_redraw() {
        let grid = grid_from(&[".:;+", "=xX$"]);
        let mut sink = TerminalSink::new(Vec::new());
        sink.present(&grid).unwrap();

        assert_eq!(sink.last_frame().cells_changed, 8);

        let mut parser = vt100::Parser::new(5, 10, 0);
        parser.process(sink.get_ref());
        assert_eq!(screen_row(&parser, 0, 0..4), ".:;+");
        assert_eq!(screen_row(&parser, 1, 0..4), "=xX$");
        assert!(parser.screen().hide_cursor());
    }

    #[test]
    fn test_second_frame_is_diff() {
        let first = grid_from(&["    ", "    "]);
        let mut second = first.clone();
        second.set(2, 1, '@');

        let mut sink = TerminalSink::new(Vec::new());
        sink.present(&first).unwrap();
        let full_len = sink.get_ref().len();

        sink.present(&second).unwrap();
        assert_eq!(sink.last_frame().cells_changed, 1);
        assert_eq!(&sink.get_ref()[full_len..], b"\x1b[2;3H@");

        let mut parser = vt100::Parser::new(5, 10, 0);
        parser.process(sink.get_ref());
        assert_eq!(screen_row(&parser, 1, 0..4), "  @ ");
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let grid = grid_from(&["@@", "@@"]);
        let mut sink = TerminalSink::new(Vec::new());
        sink.present(&grid).unwrap();
        let len = sink.get_ref().len();
        sink.present(&grid).unwrap();
        assert_eq!(sink.get_ref().len(), len);
    }

    #[test]
    fn test_many_frames_match_screen() {
        let mut sink = TerminalSink::with_origin(Vec::new(), (3, 2));
        let mut grid = CharacterGrid::new(6, 3, ' ');
        let ramp: Vec<char> = " .:;+=xX$@".chars().collect();

        for frame in 0..20usize {
            for y in 0..3u16 {
                for x in 0..6u16 {
                    let idx = (frame + usize::from(x) * 3 + usize::from(y) * 7) % ramp.len();
                    grid.set(x, y, ramp[idx]);
                }
            }
            sink.present(&grid).unwrap();
        }

        let mut parser = vt100::Parser::new(8, 12, 0);
        parser.process(sink.get_ref());
        for y in 0..3u16 {
            assert_eq!(screen_row(&parser, y + 2, 3..9), grid.row_string(y).unwrap());
        }
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.present(&grid_from(&["ab"])).unwrap();
        sink.present(&grid_from(&["abc", "def"])).unwrap();
        assert_eq!(sink.last_frame().cells_changed, 6);
    }

    #[test]
    fn test_centered_origin() {
        let sink = TerminalSink::centered(Vec::new(), (106, 20), (120, 40));
        assert_eq!(sink.origin, (7, 10));
        let sink = TerminalSink::centered(Vec::new(), (106, 20), (80, 24));
        assert_eq!(sink.origin, (0, 2));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_invalidates() {
        let mut sink = TerminalSink::new(FailingWriter);
        let grid = grid_from(&["x"]);
        assert!(sink.present(&grid).is_err());
        assert!(sink.displayed.is_none());
    }
}
