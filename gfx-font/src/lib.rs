//! Bit-packed monochrome bitmap fonts.
//!
//! This crate converts rasterized glyphs into the compact representation
//! used by the Adafruit GFX family of embedded display libraries: a single
//! shared byte stream holding every glyph's pixels, and a table of glyph
//! descriptors pointing into that stream.
//!
//! Pixels of a glyph are stored row-major and most significant bit first,
//! with *no* padding between rows. Only the end of each glyph is padded to
//! the next byte boundary. Formats that pad every scanline (such as the
//! byte-aligned EBDT formats) are not compatible.
//!
//! The crate does not rasterize anything itself. Glyph images come from an
//! implementation of the [`Rasterizer`] trait, typically backed by a font
//! rendering library.
//!
//! # Example
//!
//! ```
//! use gfx_font::{CharRange, GlyphNotFound, GlyphRaster, LineMetrics, RasterizedGlyph, Rasterizer};
//!
//! struct Blocks;
//!
//! impl Rasterizer for Blocks {
//!     fn rasterize(&mut self, code: u32) -> Result<RasterizedGlyph, GlyphNotFound> {
//!         if code == ' ' as u32 {
//!             return Ok(RasterizedGlyph::empty(4));
//!         }
//!         let raster = GlyphRaster::from_fn(3, 5, |_, _| true);
//!         Ok(RasterizedGlyph::new(raster, 4, 0, 5))
//!     }
//!
//!     fn line_metrics(&self) -> LineMetrics {
//!         LineMetrics::from_pixels(7, 5, -2)
//!     }
//! }
//!
//! let range = CharRange::new(' ' as u32, '#' as u32).unwrap();
//! let font = gfx_font::assemble(&mut Blocks, range);
//! assert_eq!(font.glyphs().len(), 4);
//! assert_eq!(font.line_advance(), 7);
//! // a 3x5 block needs 15 bits, so two bytes per glyph
//! assert_eq!(font.bitmap().len(), 6);
//! ```

#![forbid(unsafe_code)]

mod bits;
mod error;
mod font;
mod packer;
mod raster;
mod rasterizer;

pub use bits::{BitReader, BitWriter};
pub use error::{ConvertError, GlyphNotFound};
pub use font::{assemble, convert, CharRange, GlyphDescriptor, PackedFont, PackedFontBuilder};
pub use packer::{pack_glyph, packed_len};
pub use raster::GlyphRaster;
pub use rasterizer::{GlyphPlacement, LineMetrics, RasterizedGlyph, Rasterizer};
