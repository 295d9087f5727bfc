//! Character grid: the fixed-size text frame handed to render sinks.
//!
//! Cells are stored contiguously in row-major order, like a terminal
//! screen buffer, but hold bare glyphs: color is never reproduced.

/// Fixed `width x height` grid of glyphs.
///
/// Dimensions are chosen once at construction and never change; every
/// downsampling pass overwrites every cell.
#[derive(Clone, PartialEq, Eq)]
pub struct CharacterGrid {
    /// Contiguous cell storage (row-major order).
    cells: Vec<char>,
    /// Grid width in columns.
    width: u16,
    /// Grid height in rows.
    height: u16,
}

impl CharacterGrid {
    /// Create a grid filled with `fill`.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16, fill: char) -> Self {
        assert!(width > 0 && height > 0, "Grid dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![fill; size],
            width,
            height,
        }
    }

    /// Get the grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true after construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Mutable flat row-major cell slice.
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [char] {
        &mut self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Glyph at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.index_of(x, y).map(|i| self.cells[i])
    }

    /// Set the glyph at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, glyph: char) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = glyph;
            true
        } else {
            false
        }
    }

    /// Overwrite every cell with `glyph`.
    pub fn fill(&mut self, glyph: char) {
        self.cells.fill(glyph);
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width as usize)
    }

    /// Iterate over mutable rows.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [char]> {
        self.cells.chunks_mut(self.width as usize)
    }

    /// Row `y` as a `String`.
    pub fn row_string(&self, y: u16) -> Option<String> {
        self.rows().nth(y as usize).map(|row| row.iter().collect())
    }

    /// Copy content from another grid of the same dimensions.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Append the flat frame text (rows concatenated, no separators),
    /// without a terminator.
    pub fn write_flat(&self, out: &mut String) {
        out.extend(self.cells.iter());
    }
}

impl std::fmt::Display for CharacterGrid {
    /// Rows separated by `\n`, no trailing newline.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_char('\n')?;
            }
            for &glyph in row {
                f.write_char(glyph)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for CharacterGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = CharacterGrid::new(106, 20, ' ');
        assert_eq!(grid.width(), 106);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.len(), 106 * 20);
        assert!(grid.cells().iter().all(|&c| c == ' '));
    }

    #[test]
    #[should_panic]
    fn test_grid_zero_height() {
        CharacterGrid::new(10, 0, ' ');
    }

    #[test]
    fn test_grid_get_set() {
        let mut grid = CharacterGrid::new(4, 3, '.');
        assert!(grid.set(3, 2, '@'));
        assert_eq!(grid.get(3, 2), Some('@'));
        assert!(!grid.set(4, 2, '@'));
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn test_grid_display() {
        let mut grid = CharacterGrid::new(3, 2, '.');
        grid.set(0, 0, 'a');
        grid.set(2, 1, 'z');
        assert_eq!(grid.to_string(), "a..\n..z");
        assert_eq!(grid.row_string(1).as_deref(), Some("..z"));
        assert_eq!(grid.row_string(2), None);
    }

    #[test]
    fn test_grid_flat_text() {
        let mut grid = CharacterGrid::new(2, 2, '░');
        grid.set(1, 1, '#');
        let mut out = String::from(">");
        grid.write_flat(&mut out);
        assert_eq!(out, ">░░░#");
    }

    #[test]
    fn test_grid_copy_from() {
        let mut a = CharacterGrid::new(2, 2, ' ');
        let mut b = CharacterGrid::new(2, 2, ' ');
        b.fill('x');
        a.copy_from(&b);
        assert_eq!(a, b);
    }
}
