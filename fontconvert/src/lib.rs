//! Conversion of outline fonts to Adafruit GFX headers.
//!
//! Glyphs are rendered with FreeType in monochrome mode, packed with
//! [`gfx_font`] and written out as a C header that the Adafruit GFX library
//! (and compatible display drivers) can compile in directly.

mod error;
mod font;
pub mod header;

pub use error::Error;
pub use font::{FreeTypeRasterizer, SharedFontData};
pub use header::{check_char_range, font_symbol_name, write_gfx_header, HeaderError};
