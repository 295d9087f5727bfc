//! Viewport: the sampled rectangle of a source framebuffer.

/// A rectangle of source pixels, defined by position and size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    /// X coordinate of the top-left corner.
    pub x: usize,
    /// Y coordinate of the top-left corner.
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Viewport {
    /// Create a new viewport.
    #[inline]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Viewport covering a whole frame.
    #[inline]
    pub const fn from_size(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Get the area in pixels.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check if the viewport is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> usize {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.y.saturating_add(self.height)
    }

    /// Drop `rows` from the bottom, e.g. a status bar.
    ///
    /// Saturates to an empty viewport when `rows >= height`.
    #[inline]
    #[must_use]
    pub const fn excluding_bottom(&self, rows: usize) -> Self {
        Self::new(self.x, self.y, self.width, self.height.saturating_sub(rows))
    }

    /// Intersection with a `width x height` frame anchored at the origin.
    #[inline]
    #[must_use]
    pub fn clamp_to(&self, width: usize, height: usize) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self::new(x, y, self.right().min(width) - x, self.bottom().min(height) - y)
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Viewport({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}
