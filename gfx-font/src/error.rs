//! Errors produced while converting a font.

use thiserror::Error;

/// The rasterizer has no renderable glyph for a character code.
///
/// This is recoverable: the assembler substitutes an empty glyph and keeps
/// going.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("no glyph for character code 0x{code:04X}")]
pub struct GlyphNotFound {
    pub code: u32,
}

/// Errors that abort a conversion.
///
/// No partially assembled font is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid character range: last char 0x{last:X} precedes first char 0x{first:X}")]
    EmptyRange { first: u32, last: u32 },
    #[error("font could not be loaded: {0}")]
    RasterizerUnavailable(String),
}
