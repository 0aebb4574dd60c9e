//! Adafruit GFX font headers.
//!
//! The output is a C header declaring three `PROGMEM` arrays: the shared
//! bitmap, the `GFXglyph` table and the `GFXfont` record tying them
//! together. The GFX structs use narrow integer types, so every value is
//! range checked before anything is written.

use std::io::{self, Write};

use gfx_font::{CharRange, GlyphDescriptor, PackedFont};
use thiserror::Error;

/// Bitmap bytes per line in the generated array.
const BYTES_PER_LINE: usize = 12;

/// Size in bytes of a `GFXglyph` record.
const GLYPH_RECORD_SIZE: usize = 7;

/// Size in bytes of the `GFXfont` record, excluding its pointers.
const FONT_RECORD_SIZE: usize = 7;

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("glyph 0x{code:02X}: {field} {value} does not fit in a GFXglyph")]
    GlyphFieldOutOfRange {
        code: u32,
        field: &'static str,
        value: i64,
    },
    #[error("{field} {value} does not fit in a GFXfont")]
    FontFieldOutOfRange { field: &'static str, value: i64 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Returns the C identifier used for a font, e.g. `Lexend_Bold18pt7b` for
/// `fonts/Lexend-Bold.ttf` at size 18.
///
/// Both `/` and `\` are accepted as path separators. Everything from the
/// first `.` of the file name on is dropped.
pub fn font_symbol_name(font_path: &str, size: u32) -> String {
    let normalized = font_path.replace('\\', "/");
    let file_name = normalized.rsplit('/').next().unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();
    format!("{}{size}pt7b", stem.replace('-', "_"))
}

/// Writes `font` as an Adafruit GFX header using `name` as the symbol
/// prefix.
///
/// Nothing is written if any value is out of range for the GFX structs.
pub fn write_gfx_header<W: Write>(
    out: &mut W,
    name: &str,
    font: &PackedFont,
) -> Result<(), HeaderError> {
    check_limits(font)?;

    writeln!(out, "#include <Adafruit_GFX.h>")?;
    writeln!(out)?;

    writeln!(out, "const uint8_t {name}Bitmaps[] PROGMEM = {{")?;
    let bitmap = font.bitmap();
    for (i, byte) in bitmap.iter().enumerate() {
        if i % BYTES_PER_LINE == 0 {
            write!(out, "  ")?;
        }
        write!(out, "0x{byte:02X}")?;
        if i + 1 < bitmap.len() {
            write!(out, ", ")?;
        }
        if (i + 1) % BYTES_PER_LINE == 0 {
            writeln!(out)?;
        }
    }
    writeln!(out, " }};")?;
    writeln!(out)?;

    writeln!(out, "const GFXglyph {name}Glyphs[] PROGMEM = {{")?;
    let glyphs = font.glyphs();
    for (i, (code, glyph)) in font.char_range().iter().zip(glyphs).enumerate() {
        write!(
            out,
            "  {{ {:5}, {:3}, {:3}, {:3}, {:4}, {:4} }}",
            glyph.byte_offset,
            glyph.width,
            glyph.height,
            glyph.x_advance,
            glyph.x_offset,
            glyph.y_offset
        )?;
        if i + 1 < glyphs.len() {
            write!(out, ",")?;
        }
        writeln!(out, "   // 0x{code:02X} '{}'", printable(code))?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;

    writeln!(out, "const GFXfont {name} PROGMEM = {{")?;
    writeln!(out, "  (uint8_t  *){name}Bitmaps,")?;
    writeln!(out, "  (GFXglyph *){name}Glyphs,")?;
    writeln!(
        out,
        "  0x{:02X}, 0x{:02X}, {} }};",
        font.first_char(),
        font.last_char(),
        font.line_advance()
    )?;
    writeln!(out)?;
    writeln!(out, "// Approx. {} bytes", approximate_size(font))?;
    Ok(())
}

/// Storage needed on the device: bitmap, glyph table and font record.
pub fn approximate_size(font: &PackedFont) -> usize {
    font.bitmap().len() + font.glyphs().len() * GLYPH_RECORD_SIZE + FONT_RECORD_SIZE
}

fn printable(code: u32) -> char {
    match char::from_u32(code) {
        Some(c) if (32..=126).contains(&code) => c,
        _ => '?',
    }
}

/// Checks that both ends of `range` fit the 16-bit codes of a `GFXfont`.
///
/// This only needs the range, so callers can reject it before rendering.
pub fn check_char_range(range: CharRange) -> Result<(), HeaderError> {
    for (field, value) in [("first char", range.first()), ("last char", range.last())] {
        if value > u16::MAX as u32 {
            return Err(HeaderError::FontFieldOutOfRange {
                field,
                value: value as i64,
            });
        }
    }
    Ok(())
}

fn check_limits(font: &PackedFont) -> Result<(), HeaderError> {
    check_char_range(font.char_range())?;
    let line_advance = font.line_advance() as i64;
    if line_advance > u8::MAX as i64 {
        return Err(HeaderError::FontFieldOutOfRange {
            field: "y advance",
            value: line_advance,
        });
    }
    for (code, glyph) in font.char_range().iter().zip(font.glyphs()) {
        check_glyph(code, glyph)?;
    }
    Ok(())
}

fn check_glyph(code: u32, glyph: &GlyphDescriptor) -> Result<(), HeaderError> {
    let unsigned = 0..=u8::MAX as i64;
    let signed = i8::MIN as i64..=i8::MAX as i64;
    let fields = [
        ("bitmap offset", glyph.byte_offset as i64, 0..=u16::MAX as i64),
        ("width", glyph.width as i64, unsigned.clone()),
        ("height", glyph.height as i64, unsigned.clone()),
        ("x advance", glyph.x_advance as i64, unsigned),
        ("x offset", glyph.x_offset as i64, signed.clone()),
        ("y offset", glyph.y_offset as i64, signed),
    ];
    for (field, value, range) in fields {
        if !range.contains(&value) {
            return Err(HeaderError::GlyphFieldOutOfRange { code, field, value });
        }
    }
    Ok(())
}
