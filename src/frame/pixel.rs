//! Pixel: packed framebuffer colors and the borrowed frame view.
//!
//! The simulation owns its framebuffer; the core only ever sees a
//! [`PixelFrame`], a read-only row-major view that lives for one tick.

use crate::error::FrameError;

/// True-color RGB triple decoded from a packed pixel.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Perceptual brightness using the 0.299 / 0.587 / 0.114 luma weights.
    ///
    /// Computed in integer arithmetic and truncated, so the result is always
    /// in `0..=255`.
    #[inline]
    pub const fn luma(self) -> u8 {
        let y = (self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) / 1000;
        y as u8
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Channel layout of a packed 32-bit pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum PixelFormat {
    /// `0xAARRGGBB`: blue in the low byte (BGRA in little-endian memory).
    #[default]
    Argb8888,
    /// `0xAABBGGRR`: red in the low byte (RGBA in little-endian memory).
    Abgr8888,
}

impl PixelFormat {
    /// Decode the color channels of a packed pixel. Alpha is ignored.
    #[inline]
    pub const fn decode(self, pixel: u32) -> Rgb {
        let lo = (pixel & 0xFF) as u8;
        let mid = ((pixel >> 8) & 0xFF) as u8;
        let hi = ((pixel >> 16) & 0xFF) as u8;
        match self {
            Self::Argb8888 => Rgb::new(hi, mid, lo),
            Self::Abgr8888 => Rgb::new(lo, mid, hi),
        }
    }

    /// Pack a color into this layout with full alpha.
    #[inline]
    pub const fn encode(self, color: Rgb) -> u32 {
        let (lo, hi) = match self {
            Self::Argb8888 => (color.b, color.r),
            Self::Abgr8888 => (color.r, color.b),
        };
        0xFF00_0000 | (hi as u32) << 16 | (color.g as u32) << 8 | lo as u32
    }
}

/// Read-only view over one tick's framebuffer.
///
/// Pixels are stored row-major: `index = y * width + x`. The slice may be
/// longer than `width * height` (engines often over-allocate); the tail is
/// never read.
#[derive(Clone, Copy)]
pub struct PixelFrame<'a> {
    pixels: &'a [u32],
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl<'a> PixelFrame<'a> {
    /// Wrap a pixel slice in the default [`PixelFormat::Argb8888`] layout.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the slice holds fewer
    /// than `width * height` pixels.
    pub fn new(pixels: &'a [u32], width: usize, height: usize) -> Result<Self, FrameError> {
        Self::with_format(pixels, width, height, PixelFormat::default())
    }

    /// Wrap a pixel slice with an explicit channel layout.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PixelFrame::new`].
    pub fn with_format(
        pixels: &'a [u32],
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension { width, height });
        }
        let expected = width.saturating_mul(height);
        if pixels.len() < expected {
            return Err(FrameError::BufferTooSmall {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            format,
        })
    }

    /// Frame width in pixels.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Channel layout of the packed pixels.
    #[inline]
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Same pixels, reinterpreted with another channel layout.
    #[inline]
    #[must_use]
    pub const fn reinterpret(self, format: PixelFormat) -> Self {
        Self { format, ..self }
    }

    /// Pixels of row `y`, or `None` past the bottom edge.
    #[inline]
    pub fn row(&self, y: usize) -> Option<&'a [u32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.pixels[start..start + self.width])
    }

    /// Decoded color at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width {
            return None;
        }
        self.row(y).map(|row| self.format.decode(row[x]))
    }
}

impl std::fmt::Debug for PixelFrame<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
