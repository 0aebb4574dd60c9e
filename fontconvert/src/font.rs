use std::{borrow::Borrow, fmt, path::Path, sync::Arc};

use freetype::{bitmap::PixelMode, face::LoadFlag, Face, Library};
use gfx_font::{
    ConvertError, GlyphNotFound, GlyphRaster, LineMetrics, RasterizedGlyph, Rasterizer,
};
use skrifa::raw::FileRef;

/// Font file contents shared between FreeType and skrifa.
#[derive(Clone)]
pub struct SharedFontData(Arc<dyn AsRef<[u8]> + Send + Sync>);

impl SharedFontData {
    /// Memory maps the font file at `path`.
    pub fn map_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        // SAFETY: the mapping is read only; modifying the file while it is
        // mapped is undefined behavior, as with any other memory mapped font
        let map = unsafe { memmap2::Mmap::map(&file)? };
        Ok(Self(Arc::new(map)))
    }

    /// Wraps font data that is already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self(Arc::new(data))
    }

    pub fn as_bytes(&self) -> &[u8] {
        (*self.0).as_ref()
    }
}

impl Borrow<[u8]> for SharedFontData {
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for SharedFontData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedFontData({} bytes)", self.as_bytes().len())
    }
}

/// A [`Rasterizer`] that renders monochrome glyphs with FreeType.
///
/// Glyphs are loaded with `FT_LOAD_RENDER | FT_LOAD_TARGET_MONO`, so the
/// TrueType interpreter or autohinter runs in its monochrome mode. Character
/// codes are mapped through the charmap FreeType selects for the face (the
/// Unicode one when present); codes without a mapping are reported as
/// missing rather than rendered as `.notdef`.
pub struct FreeTypeRasterizer {
    face: Face<SharedFontData>,
    _library: Library,
    ppem: u32,
}

impl std::fmt::Debug for FreeTypeRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreeTypeRasterizer")
            .field("ppem", &self.ppem)
            .finish_non_exhaustive()
    }
}

impl FreeTypeRasterizer {
    /// Opens face `index` of the font file at `path` at the given pixel size.
    pub fn open(path: impl AsRef<Path>, index: u32, ppem: u32) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let data = SharedFontData::map_file(path).map_err(|e| {
            ConvertError::RasterizerUnavailable(format!("{}: {e}", path.display()))
        })?;
        Self::new(data, index, ppem).map_err(|e| match e {
            ConvertError::RasterizerUnavailable(reason) => {
                ConvertError::RasterizerUnavailable(format!("{}: {reason}", path.display()))
            }
            other => other,
        })
    }

    /// Creates a rasterizer for face `index` of `data` at the given pixel
    /// size.
    pub fn new(data: SharedFontData, index: u32, ppem: u32) -> Result<Self, ConvertError> {
        let unavailable = |reason: String| ConvertError::RasterizerUnavailable(reason);
        if ppem == 0 {
            return Err(unavailable("pixel size must be at least 1".into()));
        }
        let count = match FileRef::new(data.as_bytes())
            .map_err(|e| unavailable(format!("not a font file ({e})")))?
        {
            FileRef::Font(_) => 1,
            FileRef::Collection(collection) => collection.len(),
        };
        if index >= count {
            return Err(unavailable(format!(
                "face index {index} out of range, file has {count} face(s)"
            )));
        }
        let library =
            Library::init().map_err(|e| unavailable(format!("FreeType init failed ({e})")))?;
        let face = library
            .new_memory_face2(data, index as isize)
            .map_err(|e| unavailable(format!("FreeType could not open face ({e})")))?;
        // A zero width tells FreeType to use the height for both dimensions
        face.set_pixel_sizes(0, ppem)
            .map_err(|e| unavailable(format!("cannot set pixel size {ppem} ({e})")))?;
        log::debug!(
            "opened '{}' face {index} at {ppem}px",
            face.family_name().unwrap_or_default()
        );
        Ok(Self {
            face,
            _library: library,
            ppem,
        })
    }

    pub fn family_name(&self) -> Option<String> {
        self.face.family_name()
    }

    pub fn ppem(&self) -> u32 {
        self.ppem
    }
}

impl Rasterizer for FreeTypeRasterizer {
    fn rasterize(&mut self, code: u32) -> Result<RasterizedGlyph, GlyphNotFound> {
        let missing = GlyphNotFound { code };
        if self.face.get_char_index(code as usize) == 0 {
            return Err(missing);
        }
        if let Err(e) = self
            .face
            .load_char(code as usize, LoadFlag::RENDER | LoadFlag::TARGET_MONO)
        {
            log::warn!("FreeType failed to render 0x{code:04X}: {e}");
            return Err(missing);
        }
        let slot = self.face.glyph();
        let bitmap = slot.bitmap();
        let width = bitmap.width().max(0) as u32;
        let height = bitmap.rows().max(0) as u32;
        let raster = if width == 0 || height == 0 {
            GlyphRaster::new(width, height)
        } else {
            match bitmap.pixel_mode() {
                Ok(PixelMode::Mono) => {
                    GlyphRaster::from_mono_rows(width, height, bitmap.pitch(), bitmap.buffer())
                }
                mode => {
                    log::warn!("glyph 0x{code:04X} rendered with pixel mode {mode:?}, skipping");
                    return Err(missing);
                }
            }
        };
        Ok(RasterizedGlyph::new(
            raster,
            RasterizedGlyph::truncate_advance(slot.advance().x as i64),
            slot.bitmap_left(),
            slot.bitmap_top(),
        ))
    }

    fn line_metrics(&self) -> LineMetrics {
        self.face
            .size_metrics()
            .map(|metrics| LineMetrics {
                height: metrics.height as i64,
                ascender: metrics.ascender as i64,
                descender: metrics.descender as i64,
            })
            .unwrap_or_default()
    }
}
