//! Glyph palette: a discrete brightness scale made of characters.

use crate::error::ConfigError;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Ten-step ramp with clearly separated visual weights.
pub const DEFAULT_PALETTE: &str = " .:;+=xX$@";

/// Ordered glyphs from darkest (index 0) to brightest (index `N - 1`).
///
/// Every glyph is a single printable code point exactly one terminal column
/// wide, so a grid row of `W` glyphs always occupies `W` columns.
#[derive(Clone, PartialEq, Eq)]
pub struct GlyphPalette {
    glyphs: Box<[char]>,
}

impl GlyphPalette {
    /// Build a palette from a dark-to-bright string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, or contains a control
    /// character, a multi-code-point grapheme, or a glyph whose display
    /// width is not 1.
    pub fn new(ramp: &str) -> Result<Self, ConfigError> {
        let mut glyphs = Vec::with_capacity(ramp.len());

        for (index, grapheme) in ramp.graphemes(true).enumerate() {
            let mut chars = grapheme.chars();
            let (Some(glyph), None) = (chars.next(), chars.next()) else {
                return Err(ConfigError::ClusterGlyph {
                    grapheme: grapheme.to_string(),
                    index,
                });
            };

            if glyph.is_control() {
                return Err(ConfigError::UnprintableGlyph { glyph, index });
            }

            let width = glyph.width().unwrap_or(0);
            if width != 1 {
                return Err(ConfigError::WideGlyph {
                    glyph,
                    index,
                    width,
                });
            }

            glyphs.push(glyph);
        }

        if glyphs.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        Ok(Self {
            glyphs: glyphs.into_boxed_slice(),
        })
    }

    /// Number of glyphs (`N`).
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`; construction rejects empty palettes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyphs in dark-to-bright order.
    #[inline]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Darkest glyph.
    #[inline]
    pub fn darkest(&self) -> char {
        self.glyphs[0]
    }

    /// Brightest glyph.
    #[inline]
    pub fn brightest(&self) -> char {
        self.glyphs[self.glyphs.len() - 1]
    }

    /// Palette index for a brightness value: `floor(Y * (N - 1) / 255)`.
    ///
    /// Monotonically non-decreasing in `brightness`, and always `< N`.
    #[inline]
    pub fn index_for(&self, brightness: u8) -> usize {
        usize::from(brightness) * (self.glyphs.len() - 1) / 255
    }

    /// Glyph for a brightness value.
    #[inline]
    pub fn glyph_for(&self, brightness: u8) -> char {
        self.glyphs[self.index_for(brightness)]
    }
}

impl Default for GlyphPalette {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_PALETTE.chars().collect(),
        }
    }
}

impl std::str::FromStr for GlyphPalette {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Debug for GlyphPalette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ramp: String = self.glyphs.iter().collect();
        write!(f, "GlyphPalette({ramp:?})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = GlyphPalette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.darkest(), ' ');
        assert_eq!(palette.brightest(), '@');
        assert_eq!(palette, GlyphPalette::new(DEFAULT_PALETTE).unwrap());
    }

    #[test]
    fn test_index_monotonic_and_in_range() {
        for ramp in [DEFAULT_PALETTE, "#", " @", " .:-=+*#%@", "░▒▓█"] {
            let palette = GlyphPalette::new(ramp).unwrap();
            let mut last = 0;
            for y in 0..=255u8 {
                let idx = palette.index_for(y);
                assert!(idx < palette.len(), "{ramp:?}: {idx} out of range at {y}");
                assert!(idx >= last, "{ramp:?}: decreased at {y}");
                last = idx;
            }
        }
    }

    #[test]
    fn test_endpoints() {
        let palette = GlyphPalette::default();
        assert_eq!(palette.glyph_for(0), ' ');
        assert_eq!(palette.glyph_for(255), '@');
        // 128 * 9 / 255 = 4.51
        assert_eq!(palette.index_for(128), 4);
    }

    #[test]
    fn test_single_glyph_palette() {
        let palette = GlyphPalette::new("#").unwrap();
        assert_eq!(palette.glyph_for(0), '#');
        assert_eq!(palette.glyph_for(255), '#');
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(GlyphPalette::new(""), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn test_rejects_control() {
        assert!(matches!(
            GlyphPalette::new(" .\t@"),
            Err(ConfigError::UnprintableGlyph { glyph: '\t', index: 2 })
        ));
    }

    #[test]
    fn test_rejects_wide() {
        assert!(matches!(
            GlyphPalette::new(" 日"),
            Err(ConfigError::WideGlyph { glyph: '日', width: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_cluster() {
        assert!(matches!(
            GlyphPalette::new(" e\u{301}@"),
            Err(ConfigError::ClusterGlyph { index: 1, .. })
        ));
    }

    #[test]
    fn test_from_str() {
        let palette: GlyphPalette = " #".parse().unwrap();
        assert_eq!(palette.glyphs(), &[' ', '#']);
    }
}
