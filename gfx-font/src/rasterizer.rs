//! The boundary with a glyph rendering library.

use crate::{raster::GlyphRaster, GlyphNotFound};

/// A source of monochrome glyph images at a fixed pixel size.
///
/// Implementations wrap a font rendering library. Opening the font and
/// selecting the pixel size happen when the rasterizer is constructed, so a
/// value of this type is always ready to render.
pub trait Rasterizer {
    /// Renders the glyph for the given character code.
    ///
    /// Returns [`GlyphNotFound`] if the font has nothing to render for the
    /// code. Glyphs that exist but have no ink (such as a space) are not an
    /// error: they are returned with an empty raster and real metrics.
    fn rasterize(&mut self, code: u32) -> Result<RasterizedGlyph, GlyphNotFound>;

    /// Font-wide vertical metrics at the current size.
    fn line_metrics(&self) -> LineMetrics;
}

/// Placement of a glyph image relative to the pen position, in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// Horizontal pen advance, truncated to whole pixels.
    pub advance: i32,
    /// Distance from the pen position to the left edge of the image.
    pub left_bearing: i32,
    /// Distance from the baseline up to the top edge of the image.
    pub top_bearing: i32,
}

/// A rendered glyph and its placement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterizedGlyph {
    pub raster: GlyphRaster,
    pub placement: GlyphPlacement,
}

impl RasterizedGlyph {
    pub fn new(raster: GlyphRaster, advance: i32, left_bearing: i32, top_bearing: i32) -> Self {
        Self {
            raster,
            placement: GlyphPlacement {
                advance,
                left_bearing,
                top_bearing,
            },
        }
    }

    /// A glyph with no pixels that still moves the pen, e.g. a space.
    pub fn empty(advance: i32) -> Self {
        Self::new(GlyphRaster::default(), advance, 0, 0)
    }

    /// Converts an advance in 26.6 fixed point to whole pixels by discarding
    /// the fractional part.
    pub fn truncate_advance(advance_26_6: i64) -> i32 {
        (advance_26_6 >> 6) as i32
    }
}

/// Vertical font metrics in 26.6 fixed point (1/64 pixel units).
///
/// `height` is the baseline-to-baseline distance reported by the renderer
/// and may be zero if the font does not provide one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineMetrics {
    pub height: i64,
    pub ascender: i64,
    pub descender: i64,
}

impl LineMetrics {
    /// Creates metrics from whole pixel values.
    pub fn from_pixels(height: i32, ascender: i32, descender: i32) -> Self {
        Self {
            height: (height as i64) << 6,
            ascender: (ascender as i64) << 6,
            descender: (descender as i64) << 6,
        }
    }

    /// Distance between baselines in whole pixels.
    ///
    /// Uses `height` when it is non-zero, otherwise falls back to
    /// `ascender - descender`. The fixed point result is truncated and
    /// clamped at zero.
    pub fn line_advance(&self) -> u32 {
        let raw = if self.height != 0 {
            self.height
        } else {
            self.ascender - self.descender
        };
        (raw >> 6).max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_advance_prefers_height() {
        let metrics = LineMetrics {
            height: 1200,
            ascender: 1000,
            descender: -300,
        };
        // 1200 / 64 = 18.75
        assert_eq!(metrics.line_advance(), 18);
    }

    #[test]
    fn line_advance_falls_back_to_extents() {
        let metrics = LineMetrics {
            height: 0,
            ascender: 1000,
            descender: -300,
        };
        // the difference is truncated, not each term: 1300 / 64 = 20.3
        assert_eq!(metrics.line_advance(), 20);
    }

    #[test]
    fn line_advance_never_negative() {
        let metrics = LineMetrics {
            height: 0,
            ascender: -64,
            descender: 64,
        };
        assert_eq!(metrics.line_advance(), 0);
    }

    #[test]
    fn advance_truncation() {
        assert_eq!(RasterizedGlyph::truncate_advance(64 * 10 + 63), 10);
        assert_eq!(RasterizedGlyph::truncate_advance(0), 0);
        // arithmetic shift rounds toward negative infinity
        assert_eq!(RasterizedGlyph::truncate_advance(-1), -1);
    }
}
