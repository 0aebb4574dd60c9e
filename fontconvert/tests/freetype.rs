//! Rendering a real font through FreeType.
//!
//! Uses DejaVu Sans Mono Bold (see `test-data/DejaVu-LICENSE.txt`), a
//! monospaced font with TrueType hinting, at 16 pixels per em.

use std::path::PathBuf;

use fontconvert::{write_gfx_header, FreeTypeRasterizer, SharedFontData};
use gfx_font::{convert, CharRange, ConvertError, GlyphNotFound, Rasterizer};
use pretty_assertions::assert_eq;

const PPEM: u32 = 16;

fn font_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data/DejaVuSansMono-Bold.ttf")
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rasterizer() -> FreeTypeRasterizer {
    init_logging();
    FreeTypeRasterizer::open(font_path(), 0, PPEM).unwrap()
}

#[test]
fn opens_face() {
    let rasterizer = rasterizer();
    assert_eq!(rasterizer.ppem(), PPEM);
    assert_eq!(rasterizer.family_name().as_deref(), Some("DejaVu Sans Mono"));
}

#[test]
fn line_advance_comes_from_size_metrics() {
    let rasterizer = rasterizer();
    let metrics = rasterizer.line_metrics();
    assert!(metrics.height > 0);
    assert_eq!(metrics.line_advance(), 19);
}

#[test]
fn unmapped_codes_are_missing() {
    let mut rasterizer = rasterizer();
    for code in [0x1F, 0x10FFFF] {
        assert_eq!(rasterizer.rasterize(code).unwrap_err(), GlyphNotFound { code });
    }
}

#[test]
fn space_has_advance_and_no_ink() {
    let mut rasterizer = rasterizer();
    let space = rasterizer.rasterize(0x20).unwrap();
    assert_eq!(space.placement.advance, 10);
    assert!(space.raster.pixels().all(|on| !on), "{:?}", space.raster);
}

#[test]
fn capital_a_placement() {
    let mut rasterizer = rasterizer();
    let a = rasterizer.rasterize('A' as u32).unwrap();
    assert_eq!((a.raster.width(), a.raster.height()), (8, 12));
    assert_eq!(a.placement.advance, 10);
    assert_eq!(a.placement.left_bearing, 1);
    assert_eq!(a.placement.top_bearing, 12);
    assert!(a.raster.pixels().any(|on| on));
}

#[test]
fn monospaced_advances() {
    let mut rasterizer = rasterizer();
    for code in ['!', '0', 'M', 'g', '~'] {
        let glyph = rasterizer.rasterize(code as u32).unwrap();
        assert_eq!(glyph.placement.advance, 10, "{code}");
    }
}

#[test]
fn convert_control_char_through_a() {
    let mut rasterizer = rasterizer();
    let font = convert(&mut rasterizer, 0x1F, 0x41).unwrap();
    assert_eq!(font.glyphs().len(), 0x41 - 0x1F + 1);
    assert_eq!(font.substituted(), [0x1F]);
    assert_eq!(font.line_advance(), 19);

    let missing = font.glyph(0x1F).unwrap();
    assert_eq!((missing.width, missing.height, missing.x_advance), (0, 0, 0));

    let a = *font.glyph('A' as u32).unwrap();
    assert_eq!((a.width, a.height), (8, 12));
    assert_eq!((a.x_advance, a.x_offset, a.y_offset), (10, 1, -11));
    assert_eq!(font.glyph_data('A' as u32).unwrap().len(), 12);
    // 'A' is the last glyph, so its bytes end the stream
    assert_eq!(a.byte_offset + 12, font.bitmap().len());

    let rendered = rasterizer.rasterize('A' as u32).unwrap().raster;
    assert_eq!(font.decode_glyph('A' as u32).unwrap(), rendered);
}

#[test]
fn header_for_printable_ascii() {
    let mut rasterizer = rasterizer();
    let range = CharRange::new(0x20, 0x7E).unwrap();
    let font = gfx_font::assemble(&mut rasterizer, range);
    assert!(font.substituted().is_empty());
    let mut out = Vec::new();
    write_gfx_header(&mut out, "DejaVuSansMono_Bold16pt7b", &font).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("0x20, 0x7E, 19 };"), "{text}");
    assert!(text.contains("// 0x41 'A'"));
}

#[test]
fn bytes_and_mapped_file_agree() {
    init_logging();
    let bytes = std::fs::read(font_path()).unwrap();
    let mut from_bytes =
        FreeTypeRasterizer::new(SharedFontData::from_bytes(bytes), 0, PPEM).unwrap();
    let mut from_file = rasterizer();
    for code in [0x20, 0x41, 0x67] {
        assert_eq!(
            from_bytes.rasterize(code).unwrap(),
            from_file.rasterize(code).unwrap()
        );
    }
}

#[test]
fn face_index_past_end_is_unavailable() {
    init_logging();
    let err = FreeTypeRasterizer::open(font_path(), 1, PPEM).unwrap_err();
    match err {
        ConvertError::RasterizerUnavailable(reason) => {
            assert!(reason.contains("face index 1"), "{reason}")
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn zero_pixel_size_is_unavailable() {
    init_logging();
    let err = FreeTypeRasterizer::open(font_path(), 0, 0).unwrap_err();
    assert!(matches!(err, ConvertError::RasterizerUnavailable(_)));
}

#[test]
fn non_font_data_is_unavailable() {
    init_logging();
    let data = SharedFontData::from_bytes(b"definitely not a font".to_vec());
    let err = FreeTypeRasterizer::new(data, 0, PPEM).unwrap_err();
    assert!(matches!(err, ConvertError::RasterizerUnavailable(_)));
}
