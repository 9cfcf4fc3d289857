// this_file: backends/pixfont-core/src/writer.rs

//! MSB-first bit-packing cursor shared by both baking backends.

/// Stateful cursor writing packed rows into a glyph table.
///
/// Every row must be opened with [`begin_row`](Self::begin_row). The cursor is
/// never carried from one row into the next: clipped glyphs start and stop
/// mid-byte, so continuing from the previous row's position would shift every
/// following row. Writes are confined to the current row; bits past its last
/// byte are dropped.
#[derive(Debug)]
pub struct BitWriter<'a> {
    buf: &'a mut [u8],
    cursor: usize,
    row_end: usize,
    shift: u8,
}

impl<'a> BitWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            cursor: 0,
            row_end: 0,
            shift: 7,
        }
    }

    /// Position the cursor at column `x_start` of row `row` in the glyph at `glyph_base`.
    pub fn begin_row(
        &mut self,
        glyph_base: usize,
        row: usize,
        bytes_per_line: usize,
        x_start: usize,
    ) {
        let row_base = glyph_base + row * bytes_per_line;
        self.row_end = (row_base + bytes_per_line).min(self.buf.len());
        self.cursor = row_base + x_start / 8;
        self.shift = 7 - (x_start % 8) as u8;
    }

    /// OR one pixel into the current byte and advance one column.
    pub fn put_bit(&mut self, bit: bool) {
        if self.cursor < self.row_end {
            self.buf[self.cursor] |= u8::from(bit) << self.shift;
        }
        if self.shift == 0 {
            self.shift = 7;
            self.cursor += 1;
        } else {
            self.shift -= 1;
        }
    }

    /// Store an already packed byte at a byte-aligned cursor and advance.
    ///
    /// Overwrites rather than ORs, so placeholder fill is replaced.
    pub fn put_byte(&mut self, byte: u8) {
        debug_assert_eq!(self.shift, 7, "put_byte needs a byte-aligned cursor");
        if self.cursor < self.row_end {
            self.buf[self.cursor] = byte;
        }
        self.cursor += 1;
    }

    /// Current byte offset, mainly for tests and diagnostics.
    pub fn position(&self) -> (usize, u8) {
        (self.cursor, self.shift)
    }
}
