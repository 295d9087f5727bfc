//! Diffing Engine: Generate minimal ANSI sequences from grid changes.
//!
//! Consecutive frames of a running simulation share most of their cells, so
//! only changed glyphs are written:
//! 1. Compare the displayed grid with the next grid cell by cell
//! 2. Emit a cursor move only when the changed cell is not where the cursor
//!    already is
//! 3. Write the glyph
//!
//! Glyphs carry no color or attributes, so there is no SGR state to track.

use super::output::OutputBuffer;
use crate::frame::CharacterGrid;

/// Tracks where the terminal cursor is between writes.
#[derive(Debug, Clone, Default)]
pub struct DiffState {
    /// Last known cursor position in screen coordinates; `None` when unknown.
    cursor: Option<(u16, u16)>,
}

impl DiffState {
    /// Create a new diff state with unknown cursor position.
    pub const fn new() -> Self {
        Self { cursor: None }
    }

    /// Forget the cursor position (e.g. after something else wrote to the
    /// terminal).
    pub const fn reset(&mut self) {
        self.cursor = None;
    }

    /// Last known cursor position.
    pub const fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
}

/// Render the difference between two grids.
///
/// `origin` is the screen position of the grid's top-left cell. Cells that
/// would land past column or row `u16::MAX` are skipped.
pub fn render_diff(
    current: &CharacterGrid,
    next: &CharacterGrid,
    origin: (u16, u16),
    output: &mut OutputBuffer,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();

    for (y, (old_row, new_row)) in current.rows().zip(next.rows()).enumerate() {
        for (x, (&old, &new)) in old_row.iter().zip(new_row).enumerate() {
            if old == new {
                continue;
            }
            let Some(pos) = screen_position(origin, x, y) else {
                continue;
            };

            result.cells_changed += 1;

            if state.cursor != Some(pos) {
                output.cursor_move(pos.0, pos.1);
                result.cursor_moves += 1;
            }

            output.write_glyph(new);
            state.cursor = pos.0.checked_add(1).map(|x| (x, pos.1));
        }
    }

    result
}

/// Generate a full redraw sequence (no diffing).
///
/// Used for the first frame, or when the screen content is unknown. Each row
/// starts with an absolute cursor move so the grid can sit anywhere on
/// screen.
pub fn render_full(
    grid: &CharacterGrid,
    origin: (u16, u16),
    output: &mut OutputBuffer,
    state: &mut DiffState,
) -> DiffResult {
    let mut result = DiffResult::default();
    output.cursor_hide();
    output.reset_attrs();

    for (y, row) in grid.rows().enumerate() {
        let Some((col, line)) = screen_position(origin, 0, y) else {
            break;
        };
        output.cursor_move(col, line);
        result.cursor_moves += 1;

        for &glyph in row {
            output.write_glyph(glyph);
        }
        result.cells_changed += row.len();
    }

    // Cursor position after a row write depends on terminal wrap behavior.
    state.reset();
    result
}

fn screen_position(origin: (u16, u16), x: usize, y: usize) -> Option<(u16, u16)> {
    let x = origin.0.checked_add(u16::try_from(x).ok()?)?;
    let y = origin.1.checked_add(u16::try_from(y).ok()?)?;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_identical_grids() {
        let a = CharacterGrid::new(10, 5, ' ');
        let b = CharacterGrid::new(10, 5, ' ');
        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();

        let result = render_diff(&a, &b, (0, 0), &mut output, &mut state);

        assert_eq!(result.cells_changed, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_diff_single_cell_change() {
        let a = CharacterGrid::new(10, 5, ' ');
        let mut b = a.clone();
        b.set(5, 2, '@');

        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, (0, 0), &mut output, &mut state);

        assert_eq!(result.cells_changed, 1);
        assert_eq!(result.cursor_moves, 1);
        assert_eq!(output.as_bytes(), b"\x1b[3;6H@");
        assert_eq!(state.cursor(), Some((6, 2)));
    }

    #[test]
    fn test_diff_adjacent_cells_single_cursor_move() {
        let a = CharacterGrid::new(10, 5, ' ');
        let mut b = a.clone();
        b.set(3, 1, 'x');
        b.set(4, 1, 'X');
        b.set(5, 1, '$');

        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, (0, 0), &mut output, &mut state);

        assert_eq!(result.cells_changed, 3);
        assert_eq!(result.cursor_moves, 1);
        assert_eq!(output.as_bytes(), b"\x1b[2;4HxX$");
    }

    #[test]
    fn test_diff_known_cursor_skips_move() {
        let a = CharacterGrid::new(4, 1, ' ');
        let mut b = a.clone();
        b.set(0, 0, '.');

        let mut output = OutputBuffer::new();
        let mut state = DiffState { cursor: Some((0, 0)) };
        let result = render_diff(&a, &b, (0, 0), &mut output, &mut state);

        assert_eq!(result.cursor_moves, 0);
        assert_eq!(output.as_bytes(), b".");
    }

    #[test]
    fn test_diff_with_origin() {
        let a = CharacterGrid::new(4, 2, ' ');
        let mut b = a.clone();
        b.set(0, 1, ':');

        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();
        render_diff(&a, &b, (10, 3), &mut output, &mut state);

        assert_eq!(output.as_bytes(), b"\x1b[5;11H:");
    }

    #[test]
    fn test_render_full() {
        let mut grid = CharacterGrid::new(3, 2, '.');
        grid.set(0, 0, 'A');
        grid.set(1, 0, 'B');
        grid.set(2, 0, 'C');

        let mut output = OutputBuffer::new();
        let mut state = DiffState::new();
        let result = render_full(&grid, (0, 0), &mut output, &mut state);

        assert_eq!(result.cells_changed, 6);
        assert_eq!(output.as_bytes(), b"\x1b[?25l\x1b[0m\x1b[HABC\x1b[2H...");
        assert_eq!(state.cursor(), None);
    }

    #[test]
    fn test_screen_position_overflow() {
        assert_eq!(screen_position((u16::MAX, 0), 0, 0), Some((u16::MAX, 0)));
        assert_eq!(screen_position((u16::MAX, 0), 1, 0), None);
        assert_eq!(screen_position((0, 0), 70_000, 0), None);
    }
}
