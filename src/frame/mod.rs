//! Frame module: the pixel-to-glyph reduction pipeline.
//!
//! This module contains:
//! - [`PixelFrame`]: Borrowed view over the simulation's framebuffer
//! - [`GlyphPalette`]: Dark-to-bright character scale
//! - [`FrameDownsampler`]: Block-averaging luminance reducer
//! - [`CharacterGrid`]: Fixed-size glyph grid handed to render sinks
//! - [`Viewport`]: Sampled sub-rectangle of the framebuffer

mod downsample;
mod grid;
mod palette;
mod pixel;
mod viewport;

pub use downsample::FrameDownsampler;
pub use grid::CharacterGrid;
pub use palette::{GlyphPalette, DEFAULT_PALETTE};
pub use pixel::{PixelFormat, PixelFrame, Rgb};
pub use viewport::Viewport;
