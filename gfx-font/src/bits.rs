//! MSB-first bit streams.

/// Accumulates bits into bytes, most significant bit first.
///
/// Bits are appended to the borrowed buffer as soon as a byte is complete.
/// A partially filled byte is held back until more bits arrive or
/// [`flush_to_byte_boundary`](Self::flush_to_byte_boundary) is called, at
/// which point the unused low order bits are written as zero.
///
/// Dropping a writer with a partial byte pending discards those bits; the
/// packer always flushes at the end of a glyph.
#[derive(Debug)]
pub struct BitWriter<'a> {
    buf: &'a mut Vec<u8>,
    pending: u8,
    pending_bits: u8,
}

impl<'a> BitWriter<'a> {
    /// Creates a writer that appends to the end of `buf`.
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        Self {
            buf,
            pending: 0,
            pending_bits: 0,
        }
    }

    /// Appends a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        self.pending |= (bit as u8) << (7 - self.pending_bits);
        self.pending_bits += 1;
        if self.pending_bits == 8 {
            self.buf.push(self.pending);
            self.pending = 0;
            self.pending_bits = 0;
        }
    }

    /// Pads the current byte with zero bits and writes it out.
    ///
    /// Does nothing if the writer is already on a byte boundary.
    pub fn flush_to_byte_boundary(&mut self) {
        if self.pending_bits != 0 {
            self.buf.push(self.pending);
            self.pending = 0;
            self.pending_bits = 0;
        }
    }

    /// Returns true if no partial byte is pending.
    pub fn is_aligned(&self) -> bool {
        self.pending_bits == 0
    }

    /// Number of complete bytes in the underlying buffer.
    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }
}

/// Reads bits MSB-first from a byte slice.
///
/// This is the access pattern of the renderer on the device: a glyph's bits
/// start at a byte offset and continue across row boundaries.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the next bit, or `None` once the data is exhausted.
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.pos / 8)?;
        let bit = (byte >> (7 - self.pos % 8)) & 1;
        self.pos += 1;
        Some(bit != 0)
    }

    /// The number of bits consumed so far.
    pub fn bit_position(&self) -> usize {
        self.pos
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_bit()
    }
}
