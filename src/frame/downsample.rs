//! Downsampler: block-average a pixel frame into a character grid.
//!
//! Each output cell covers a block of source pixels:
//!
//! ```text
//! start = floor(idx * src_len / out_len)
//! end   = floor((idx + 1) * src_len / out_len)   (clamped to src_len)
//! ```
//!
//! The bounds are computed with exact integer arithmetic, so they equal the
//! floor of the real-valued `idx * scale`. When the scale is not integral
//! some blocks are one pixel wider than their neighbours; that is accepted.
//!
//! The block's channels are averaged independently, reduced to luma
//! (`(299 R + 587 G + 114 B) / 1000`) and mapped onto the palette.

use super::grid::CharacterGrid;
use super::palette::GlyphPalette;
use super::pixel::{PixelFrame, Rgb};
use super::viewport::Viewport;
use std::ops::Range;

/// Reduces pixel frames to glyph grids.
#[derive(Debug, Clone, Default)]
pub struct FrameDownsampler {
    palette: GlyphPalette,
}

impl FrameDownsampler {
    /// Create a downsampler mapping brightness onto `palette`.
    pub const fn new(palette: GlyphPalette) -> Self {
        Self { palette }
    }

    /// The brightness scale in use.
    #[inline]
    pub const fn palette(&self) -> &GlyphPalette {
        &self.palette
    }

    /// Sample the top `viewport_height` rows of `frame` into `grid`.
    ///
    /// Rows below the viewport (a status bar, typically) are ignored. A
    /// `viewport_height` taller than the frame is clamped to the frame.
    pub fn downsample(&self, frame: &PixelFrame<'_>, viewport_height: usize, grid: &mut CharacterGrid) {
        let viewport = Viewport::from_size(frame.width(), viewport_height);
        self.downsample_viewport(frame, viewport, grid);
    }

    /// Sample an arbitrary rectangle of `frame` into `grid`.
    ///
    /// Every cell of `grid` is overwritten. Cells whose block is empty
    /// (upsampling, or an empty viewport) receive the darkest glyph.
    pub fn downsample_viewport(&self, frame: &PixelFrame<'_>, viewport: Viewport, grid: &mut CharacterGrid) {
        let viewport = viewport.clamp_to(frame.width(), frame.height());
        let out_width = grid.width() as usize;
        let out_height = grid.height() as usize;

        for (y, row) in grid.rows_mut().enumerate() {
            let ys = offset(block_bounds(y, viewport.height, out_height), viewport.y);
            for (x, cell) in row.iter_mut().enumerate() {
                let xs = offset(block_bounds(x, viewport.width, out_width), viewport.x);
                let color = average_block(frame, xs, ys.clone());
                *cell = self.palette.glyph_for(color.luma());
            }
        }
    }

    /// Glyph for a single color, bypassing block averaging.
    #[inline]
    pub fn glyph_for(&self, color: Rgb) -> char {
        self.palette.glyph_for(color.luma())
    }
}

/// Source range `[start, end)` for output index `idx`.
#[inline]
fn block_bounds(idx: usize, src_len: usize, out_len: usize) -> Range<usize> {
    let start = idx * src_len / out_len;
    let end = ((idx + 1) * src_len / out_len).min(src_len);
    start.min(end)..end
}

#[inline]
fn offset(range: Range<usize>, by: usize) -> Range<usize> {
    range.start + by..range.end + by
}

/// Mean color over a block of source pixels; black if the block is empty.
fn average_block(frame: &PixelFrame<'_>, xs: Range<usize>, ys: Range<usize>) -> Rgb {
    let format = frame.format();
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    let mut count = 0u64;

    for y in ys {
        let Some(row) = frame.row(y) else { break };
        for &pixel in &row[xs.clone()] {
            let color = format.decode(pixel);
            r += u64::from(color.r);
            g += u64::from(color.g);
            b += u64::from(color.b);
            count += 1;
        }
    }

    if count == 0 {
        return Rgb::BLACK;
    }

    // Each mean is at most 255.
    #[allow(clippy::cast_possible_truncation)]
    Rgb::new((r / count) as u8, (g / count) as u8, (b / count) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::pixel::PixelFormat;

    fn solid(width: usize, height: usize, color: Rgb) -> Vec<u32> {
        vec![PixelFormat::Argb8888.encode(color); width * height]
    }

    #[test]
    fn test_black_frame_is_darkest() {
        let pixels = solid(320, 200, Rgb::BLACK);
        let frame = PixelFrame::new(&pixels, 320, 200).unwrap();
        let sampler = FrameDownsampler::default();
        let mut grid = CharacterGrid::new(106, 20, '?');

        sampler.downsample(&frame, 168, &mut grid);

        assert!(grid.cells().iter().all(|&c| c == ' '));
    }

    #[test]
    fn test_white_frame_is_brightest() {
        let pixels = vec![0xFFFF_FFFF; 106 * 66];
        let frame = PixelFrame::new(&pixels, 106, 66).unwrap();
        let sampler = FrameDownsampler::default();
        let mut grid = CharacterGrid::new(106, 20, '?');

        sampler.downsample(&frame, 56, &mut grid);

        assert!(grid.cells().iter().all(|&c| c == '@'));
    }

    #[test]
    fn test_unit_blocks_are_identity() {
        let palette = GlyphPalette::new(" .:-=+*#%@").unwrap();
        let sampler = FrameDownsampler::new(palette.clone());
        let (w, h) = (16usize, 16usize);
        let pixels: Vec<u32> = (0..w * h)
            .map(|i| {
                let v = (i * 37 % 256) as u8;
                PixelFormat::Argb8888.encode(Rgb::new(v, v.wrapping_mul(3), 255 - v))
            })
            .collect();
        let frame = PixelFrame::new(&pixels, w, h).unwrap();
        let mut grid = CharacterGrid::new(16, 16, '?');

        sampler.downsample(&frame, h, &mut grid);

        for y in 0..h {
            for x in 0..w {
                let expected = palette.glyph_for(frame.get(x, y).unwrap().luma());
                assert_eq!(grid.get(x as u16, y as u16), Some(expected), "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_grid_dimensions_independent_of_source() {
        let sampler = FrameDownsampler::default();
        for (w, h) in [(320, 200), (106, 66), (640, 400), (7, 3)] {
            let pixels = solid(w, h, Rgb::new(90, 90, 90));
            let frame = PixelFrame::new(&pixels, w, h).unwrap();
            let mut grid = CharacterGrid::new(106, 20, '?');
            sampler.downsample(&frame, h, &mut grid);
            assert_eq!((grid.width(), grid.height()), (106, 20));
            assert!(!grid.cells().contains(&'?'));
        }
    }

    #[test]
    fn test_status_bar_rows_ignored() {
        // Dark viewport, bright status bar below it.
        let (w, h, bar) = (8usize, 12usize, 4usize);
        let mut pixels = solid(w, h, Rgb::BLACK);
        for pixel in &mut pixels[(h - bar) * w..] {
            *pixel = 0xFFFF_FFFF;
        }
        let frame = PixelFrame::new(&pixels, w, h).unwrap();
        let mut grid = CharacterGrid::new(4, 2, '?');

        FrameDownsampler::default().downsample(&frame, h - bar, &mut grid);

        assert!(grid.cells().iter().all(|&c| c == ' '));
    }

    #[test]
    fn test_block_average() {
        // One 2x1 block: black + white averages to 127, glyph index 4.
        let pixels = [0xFF00_0000, 0xFFFF_FFFF];
        let frame = PixelFrame::new(&pixels, 2, 1).unwrap();
        let mut grid = CharacterGrid::new(1, 1, '?');

        FrameDownsampler::default().downsample(&frame, 1, &mut grid);

        assert_eq!(grid.get(0, 0), Some('+'));
    }

    #[test]
    fn test_block_bounds_cover_source() {
        // 106 columns into 40 cells: blocks are 2 or 3 wide and tile exactly.
        let mut next = 0;
        for idx in 0..40 {
            let range = block_bounds(idx, 106, 40);
            assert_eq!(range.start, next);
            assert!((2..=3).contains(&range.len()));
            next = range.end;
        }
        assert_eq!(next, 106);
    }

    #[test]
    fn test_upsampling_empty_blocks_are_dark() {
        // 2 source columns into 5 cells leaves some blocks empty.
        let pixels = vec![0xFFFF_FFFF; 2];
        let frame = PixelFrame::new(&pixels, 2, 1).unwrap();
        let mut grid = CharacterGrid::new(5, 1, '?');

        FrameDownsampler::default().downsample(&frame, 1, &mut grid);

        assert!(grid.cells().contains(&' '));
        assert!(grid.cells().contains(&'@'));
        assert!(!grid.cells().contains(&'?'));
    }

    #[test]
    fn test_zero_viewport_is_dark() {
        let pixels = vec![0xFFFF_FFFF; 16];
        let frame = PixelFrame::new(&pixels, 4, 4).unwrap();
        let mut grid = CharacterGrid::new(2, 2, '?');

        FrameDownsampler::default().downsample(&frame, 0, &mut grid);

        assert!(grid.cells().iter().all(|&c| c == ' '));
    }

    #[test]
    fn test_oversized_viewport_clamped() {
        let pixels = vec![0xFFFF_FFFF; 16];
        let frame = PixelFrame::new(&pixels, 4, 4).unwrap();
        let mut grid = CharacterGrid::new(2, 2, '?');

        FrameDownsampler::default().downsample(&frame, 400, &mut grid);

        assert!(grid.cells().iter().all(|&c| c == '@'));
    }

    #[test]
    fn test_viewport_offset() {
        // Left half dark, right half bright; sample only the right half.
        let mut pixels = solid(4, 2, Rgb::BLACK);
        for y in 0..2 {
            pixels[y * 4 + 2] = 0xFFFF_FFFF;
            pixels[y * 4 + 3] = 0xFFFF_FFFF;
        }
        let frame = PixelFrame::new(&pixels, 4, 2).unwrap();
        let mut grid = CharacterGrid::new(2, 1, '?');

        FrameDownsampler::default().downsample_viewport(&frame, Viewport::new(2, 0, 2, 2), &mut grid);

        assert_eq!(grid.to_string(), "@@");
    }

    #[test]
    fn test_abgr_frame() {
        // Pure red in ABGR is 0xFF0000FF; luma 76 -> index 2 (':').
        let pixels = [0xFF00_00FF];
        let frame = PixelFrame::with_format(&pixels, 1, 1, PixelFormat::Abgr8888).unwrap();
        let mut grid = CharacterGrid::new(1, 1, '?');

        FrameDownsampler::default().downsample(&frame, 1, &mut grid);

        assert_eq!(grid.get(0, 0), Some(':'));
    }
}
