//! Packing glyph images into the shared bitmap stream.

use crate::{bits::BitWriter, font::GlyphDescriptor, rasterizer::RasterizedGlyph};

/// Number of bytes a glyph of the given size occupies in the stream.
pub fn packed_len(width: u32, height: u32) -> usize {
    (width as usize * height as usize).div_ceil(8)
}

/// Appends the pixels of `glyph` to `stream` and returns its descriptor.
///
/// Pixels are written row-major, MSB first, with no padding between rows.
/// Only the final byte of the glyph is padded with zero bits. An empty glyph
/// appends nothing but still gets a descriptor at the current offset.
///
/// The vertical offset is `1 - top_bearing`. This is what the consuming
/// renderer expects; it is not the same as negating the bearing.
pub fn pack_glyph(stream: &mut Vec<u8>, glyph: &RasterizedGlyph) -> GlyphDescriptor {
    let byte_offset = stream.len();
    let raster = &glyph.raster;
    let mut writer = BitWriter::new(stream);
    for bit in raster.pixels() {
        writer.push_bit(bit);
    }
    writer.flush_to_byte_boundary();
    debug_assert_eq!(
        stream.len() - byte_offset,
        packed_len(raster.width(), raster.height())
    );
    let placement = glyph.placement;
    GlyphDescriptor {
        byte_offset,
        width: raster.width(),
        height: raster.height(),
        x_advance: placement.advance,
        x_offset: placement.left_bearing,
        y_offset: 1 - placement.top_bearing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GlyphRaster;

    fn glyph(rows: &[&str], top: i32) -> RasterizedGlyph {
        RasterizedGlyph::new(GlyphRaster::from_rows(rows).unwrap(), 6, 1, top)
    }

    #[test]
    fn rows_are_not_padded() {
        // 3x3: nine bits, a row-padded encoder would produce three bytes
        let mut stream = Vec::new();
        let desc = pack_glyph(&mut stream, &glyph(&["###", "#.#", "###"], 3));
        assert_eq!(stream, [0b1111_0111, 0b1000_0000]);
        assert_eq!(desc.byte_offset, 0);
        assert_eq!((desc.width, desc.height), (3, 3));
    }

    #[test]
    fn glyphs_start_on_byte_boundaries() {
        let mut stream = Vec::new();
        let first = pack_glyph(&mut stream, &glyph(&["#"], 1));
        let second = pack_glyph(&mut stream, &glyph(&["#"], 1));
        assert_eq!(stream, [0x80, 0x80]);
        assert_eq!(first.byte_offset, 0);
        assert_eq!(second.byte_offset, 1);
    }

    #[test]
    fn empty_glyph_keeps_metrics() {
        let mut stream = vec![0xAB];
        let desc = pack_glyph(&mut stream, &RasterizedGlyph::empty(7));
        assert_eq!(stream, [0xAB]);
        assert_eq!(desc.byte_offset, 1);
        assert_eq!((desc.width, desc.height), (0, 0));
        assert_eq!(desc.x_advance, 7);
        assert_eq!(desc.y_offset, 1);
    }

    #[test]
    fn degenerate_dimensions_pack_to_nothing() {
        let mut stream = Vec::new();
        let wide = RasterizedGlyph::new(GlyphRaster::new(12, 0), 3, 0, 0);
        let desc = pack_glyph(&mut stream, &wide);
        assert!(stream.is_empty());
        assert_eq!((desc.width, desc.height), (12, 0));
    }

    #[test]
    fn y_offset_is_one_minus_top() {
        for top in [-5, -1, 0, 1, 2, 17] {
            let mut stream = Vec::new();
            let desc = pack_glyph(&mut stream, &glyph(&["#"], top));
            assert_eq!(desc.y_offset, 1 - top, "top bearing {top}");
            assert_eq!(desc.x_offset, 1);
            assert_eq!(desc.x_advance, 6);
        }
    }

    #[test]
    fn packed_lengths() {
        assert_eq!(packed_len(0, 0), 0);
        assert_eq!(packed_len(0, 9), 0);
        assert_eq!(packed_len(1, 1), 1);
        assert_eq!(packed_len(8, 1), 1);
        assert_eq!(packed_len(3, 3), 2);
        assert_eq!(packed_len(8, 8), 8);
        assert_eq!(packed_len(9, 1), 2);
    }
}
