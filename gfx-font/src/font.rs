//! Assembling glyphs into a packed font.

use std::ops::Range;

use crate::{
    bits::BitReader,
    packer::{pack_glyph, packed_len},
    raster::GlyphRaster,
    rasterizer::{RasterizedGlyph, Rasterizer},
    ConvertError, GlyphNotFound,
};

/// Upper bound on the descriptor table reserved up front. Ranges larger
/// than this grow the table as glyphs are pushed.
const MAX_RESERVED_GLYPHS: usize = 1 << 16;

/// Location and placement of one glyph in a [`PackedFont`].
///
/// Field order matches the descriptor table consumed by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphDescriptor {
    /// Offset in bytes into the font's shared bitmap stream.
    pub byte_offset: usize,
    pub width: u32,
    pub height: u32,
    /// Horizontal pen advance in pixels.
    pub x_advance: i32,
    /// Horizontal distance from the pen position to the bitmap.
    pub x_offset: i32,
    /// Vertical distance from the line just below the pen position to the
    /// top of the bitmap, positive downwards.
    pub y_offset: i32,
}

impl GlyphDescriptor {
    /// The range of bytes this glyph occupies in the bitmap stream.
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_offset..self.byte_offset + packed_len(self.width, self.height)
    }
}

/// An inclusive, non-empty range of character codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharRange {
    first: u32,
    last: u32,
}

impl CharRange {
    /// Creates a new range, failing if `last` precedes `first`.
    pub fn new(first: u32, last: u32) -> Result<Self, ConvertError> {
        if last < first {
            return Err(ConvertError::EmptyRange { first, last });
        }
        Ok(Self { first, last })
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    /// Number of codes in the range. Always at least one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.last - self.first) as usize + 1
    }

    pub fn contains(&self, code: u32) -> bool {
        (self.first..=self.last).contains(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

/// A complete bit-packed font.
///
/// Holds one descriptor for every code in `first_char..=last_char`, in
/// order, so the descriptor for code `c` is at index `c - first_char`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedFont {
    bitmap: Vec<u8>,
    glyphs: Vec<GlyphDescriptor>,
    range: CharRange,
    line_advance: u32,
    substituted: Vec<u32>,
}

impl PackedFont {
    /// The shared bitmap stream for all glyphs.
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    /// Glyph descriptors in ascending character code order.
    pub fn glyphs(&self) -> &[GlyphDescriptor] {
        &self.glyphs
    }

    pub fn first_char(&self) -> u32 {
        self.range.first
    }

    pub fn last_char(&self) -> u32 {
        self.range.last
    }

    pub fn char_range(&self) -> CharRange {
        self.range
    }

    /// Distance between baselines in pixels.
    pub fn line_advance(&self) -> u32 {
        self.line_advance
    }

    /// Codes that had no glyph in the font and were replaced with an empty
    /// one. This is diagnostic information and not part of the font data.
    pub fn substituted(&self) -> &[u32] {
        &self.substituted
    }

    /// Returns the descriptor for the given character code.
    pub fn glyph(&self, code: u32) -> Option<&GlyphDescriptor> {
        if !self.range.contains(code) {
            return None;
        }
        self.glyphs.get((code - self.range.first) as usize)
    }

    /// Returns the packed bytes of the glyph for the given code.
    pub fn glyph_data(&self, code: u32) -> Option<&[u8]> {
        let glyph = self.glyph(code)?;
        self.bitmap.get(glyph.byte_range())
    }

    /// Decodes the glyph for the given code back into a raster, reading
    /// `width * height` bits from the glyph's offset the way the renderer
    /// does.
    pub fn decode_glyph(&self, code: u32) -> Option<GlyphRaster> {
        let glyph = self.glyph(code)?;
        let mut bits = BitReader::new(self.glyph_data(code)?);
        let mut raster = GlyphRaster::new(glyph.width, glyph.height);
        for y in 0..glyph.height {
            for x in 0..glyph.width {
                raster.set(x, y, bits.read_bit()?);
            }
        }
        Some(raster)
    }
}

/// Builds a [`PackedFont`] from glyphs supplied in character code order.
///
/// Byte offsets depend on the size of every earlier glyph, so glyphs must be
/// pushed in ascending code order. Rasterization itself may happen in any
/// order (or in parallel) as long as the results are reduced back into code
/// order before they reach the builder.
#[derive(Debug)]
pub struct PackedFontBuilder {
    range: CharRange,
    next_code: u32,
    bitmap: Vec<u8>,
    glyphs: Vec<GlyphDescriptor>,
    substituted: Vec<u32>,
}

impl PackedFontBuilder {
    pub fn new(range: CharRange) -> Self {
        Self {
            range,
            next_code: range.first,
            bitmap: Vec::new(),
            glyphs: Vec::with_capacity(range.len().min(MAX_RESERVED_GLYPHS)),
            substituted: Vec::new(),
        }
    }

    /// The code the next pushed glyph will be assigned to, or `None` once
    /// the range is complete.
    pub fn next_code(&self) -> Option<u32> {
        (self.glyphs.len() < self.range.len()).then_some(self.next_code)
    }

    /// Packs the glyph for the next code in the range.
    ///
    /// A missing glyph is replaced by an empty one with zero metrics. Returns
    /// the new descriptor, or `None` if the range is already complete.
    pub fn push(
        &mut self,
        glyph: Result<RasterizedGlyph, GlyphNotFound>,
    ) -> Option<&GlyphDescriptor> {
        let code = self.next_code()?;
        let glyph = glyph.unwrap_or_else(|missing| {
            log::debug!("{missing}, substituting an empty glyph");
            self.substituted.push(code);
            RasterizedGlyph::default()
        });
        let descriptor = pack_glyph(&mut self.bitmap, &glyph);
        self.glyphs.push(descriptor);
        self.next_code = code.saturating_add(1);
        self.glyphs.last()
    }

    /// Finishes the font.
    ///
    /// Codes that were never pushed are filled with empty substitutes so
    /// the result always covers the full range.
    pub fn build(mut self, line_advance: u32) -> PackedFont {
        while let Some(code) = self.next_code() {
            self.push(Err(GlyphNotFound { code }));
        }
        PackedFont {
            bitmap: self.bitmap,
            glyphs: self.glyphs,
            range: self.range,
            line_advance,
            substituted: self.substituted,
        }
    }
}

/// Rasterizes and packs every code in `range`.
///
/// Glyphs the rasterizer cannot find become empty glyphs; they never abort
/// the conversion.
pub fn assemble<R: Rasterizer>(rasterizer: &mut R, range: CharRange) -> PackedFont {
    let mut builder = PackedFontBuilder::new(range);
    for code in range.iter() {
        builder.push(rasterizer.rasterize(code));
    }
    let font = builder.build(rasterizer.line_metrics().line_advance());
    if !font.substituted.is_empty() {
        log::info!(
            "{} of {} glyphs in 0x{:02X}..=0x{:02X} were missing and left empty",
            font.substituted.len(),
            range.len(),
            range.first,
            range.last
        );
    }
    log::debug!(
        "packed {} glyphs into {} bitmap bytes, line advance {}",
        font.glyphs.len(),
        font.bitmap.len(),
        font.line_advance
    );
    font
}

/// Validates the range and then assembles the font.
///
/// The rasterizer is not touched if the range is empty.
pub fn convert<R: Rasterizer>(
    rasterizer: &mut R,
    first_char: u32,
    last_char: u32,
) -> Result<PackedFont, ConvertError> {
    let range = CharRange::new(first_char, last_char)?;
    Ok(assemble(rasterizer, range))
}
