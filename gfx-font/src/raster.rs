//! Monochrome glyph images.

use std::fmt;

/// A rectangular grid of on/off pixels for a single glyph.
///
/// Pixels are stored row-major with the origin at the top left. Either
/// dimension may be zero, in which case the raster has no pixels at all.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct GlyphRaster {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl GlyphRaster {
    /// Creates a raster with all pixels off.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    /// Creates a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Unpacks a 1 bit per pixel buffer where each row starts on a byte
    /// boundary `pitch` bytes after the previous one.
    ///
    /// This is the layout FreeType uses for monochrome bitmaps. Pixels whose
    /// byte lies beyond the end of `buffer` are treated as off. A negative
    /// pitch (a bottom-up bitmap) is handled by reading rows in reverse.
    pub fn from_mono_rows(width: u32, height: u32, pitch: i32, buffer: &[u8]) -> Self {
        let stride = pitch.unsigned_abs() as usize;
        Self::from_fn(width, height, |x, y| {
            let row = if pitch < 0 { height - 1 - y } else { y };
            let byte_index = row as usize * stride + x as usize / 8;
            buffer
                .get(byte_index)
                .map(|byte| (byte >> (7 - x % 8)) & 1 != 0)
                .unwrap_or(false)
        })
    }

    /// Parses rows of `#` (on) and any other character (off).
    ///
    /// Mostly useful for tests. Returns `None` if the rows differ in
    /// length.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        let height = rows.len();
        let mut pixels = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.chars().count() != width {
                return None;
            }
            pixels.extend(row.chars().map(|c| c == '#'));
        }
        Some(Self {
            width: width as u32,
            height: height as u32,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels, `width * height`.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Returns true if the raster contains no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Returns the pixel at the given position, or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Sets the pixel at the given position. Out of bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.pixels[index] = on;
        }
    }

    /// Iterates over all pixels in row-major order.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        self.pixels.iter().copied()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl fmt::Debug for GlyphRaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GlyphRaster {}x{}", self.width, self.height)?;
        if self.width == 0 {
            return Ok(());
        }
        for row in self.pixels.chunks(self.width as usize) {
            let line: String = row.iter().map(|on| if *on { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
