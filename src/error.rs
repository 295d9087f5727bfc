//! Error types for construction-time validation.
//!
//! Steady-state operations (downsampling, queue push/pop, clock reads) are
//! total and never return these. Only building a palette, a frame view or a
//! bridge can fail.

use thiserror::Error;

/// Invalid bridge or palette configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Character grid width or height is zero.
    #[error("character grid must be at least 1x1, got {width}x{height}")]
    ZeroGridDimension {
        /// Configured grid width.
        width: u16,
        /// Configured grid height.
        height: u16,
    },

    /// Palette contains no glyphs.
    #[error("glyph palette is empty")]
    EmptyPalette,

    /// Palette glyph is a control character.
    #[error("glyph {glyph:?} at index {index} is not printable")]
    UnprintableGlyph {
        /// Offending glyph.
        glyph: char,
        /// Position in the palette.
        index: usize,
    },

    /// Palette glyph does not occupy exactly one terminal column.
    #[error("glyph {glyph:?} at index {index} is {width} columns wide, expected 1")]
    WideGlyph {
        /// Offending glyph.
        glyph: char,
        /// Position in the palette.
        index: usize,
        /// Measured display width.
        width: usize,
    },

    /// Palette entry is a grapheme cluster made of several code points.
    #[error("palette entry {grapheme:?} at index {index} is not a single character")]
    ClusterGlyph {
        /// Offending grapheme cluster.
        grapheme: String,
        /// Position in the palette.
        index: usize,
    },

    /// Key queue capacity is zero.
    #[error("key queue capacity must be non-zero")]
    ZeroQueueCapacity,
}

/// Invalid pixel frame geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Frame width or height is zero.
    #[error("pixel frame must be at least 1x1, got {width}x{height}")]
    ZeroDimension {
        /// Frame width in pixels.
        width: usize,
        /// Frame height in pixels.
        height: usize,
    },

    /// Pixel slice shorter than `width * height`.
    #[error("pixel buffer holds {actual} pixels, {expected} required")]
    BufferTooSmall {
        /// Pixels required by the declared dimensions.
        expected: usize,
        /// Pixels actually supplied.
        actual: usize,
    },
}
