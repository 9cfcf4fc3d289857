// this_file: backends/pixfont-core/src/types.rs

//! The baked pixel font, its code-point range, and the firmware-facing descriptor.

use crate::{utils, PixfontError, Result};
use std::marker::PhantomData;
use std::mem::{offset_of, size_of};

/// Highest Unicode scalar value accepted in a range.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Inclusive code-point range `[start, end]` driving iteration order and slot indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodepointRange {
    start: u32,
    end: u32,
}

impl CodepointRange {
    /// Build a range, rejecting `start > end` and anything past U+10FFFF.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start > end || end > MAX_CODEPOINT {
            return Err(PixfontError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range holding exactly one code point.
    pub fn single(codepoint: u32) -> Result<Self> {
        Self::new(codepoint, codepoint)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of glyph slots covered by the range.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Ranges are never empty; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        (self.start..=self.end).contains(&codepoint)
    }

    /// Slot index of `codepoint`, if it lies inside the range.
    pub fn slot(&self, codepoint: u32) -> Option<usize> {
        self.contains(codepoint).then(|| (codepoint - self.start) as usize)
    }

    /// Code points in ascending order.
    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl IntoIterator for CodepointRange {
    type Item = u32;
    type IntoIter = std::ops::RangeInclusive<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Fixed-cell 1-bit glyph table for a contiguous code-point range.
///
/// Glyphs are stored back to back in ascending code-point order. Each glyph
/// takes `bytes_per_glyph` bytes; each row takes `bytes_per_line` bytes with
/// bit 7 of the first byte holding the leftmost pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFont {
    table: Vec<u8>,
    char_px_width: u16,
    char_px_height: u16,
    bytes_per_line: u32,
    bytes_per_glyph: u32,
    range: CodepointRange,
}

impl PixelFont {
    /// Allocate a zero-filled table for `range` with `width x height` cells.
    pub fn zeroed(width: u16, height: u16, range: CodepointRange) -> Result<Self> {
        Self::filled(width, height, range, |_| 0)
    }

    /// Allocate a table for `range` and initialise byte `i` with `fill(i)`.
    pub fn filled(
        width: u16,
        height: u16,
        range: CodepointRange,
        fill: impl Fn(usize) -> u8,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PixfontError::invalid_parameter(format!(
                "cell must be at least 1x1 pixels, got {width}x{height}"
            )));
        }

        let bytes_per_line = utils::bytes_per_line(width);
        let bytes_per_glyph = bytes_per_line * u32::from(height);
        let total = (bytes_per_glyph as usize)
            .checked_mul(range.len())
            .ok_or(PixfontError::AllocationFailed { bytes: usize::MAX })?;

        let mut table = utils::try_alloc(total)?;
        table.extend((0..total).map(fill));

        Ok(Self {
            table,
            char_px_width: width,
            char_px_height: height,
            bytes_per_line,
            bytes_per_glyph,
            range,
        })
    }

    pub fn table(&self) -> &[u8] {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut [u8] {
        &mut self.table
    }

    pub fn char_px_width(&self) -> u16 {
        self.char_px_width
    }

    pub fn char_px_height(&self) -> u16 {
        self.char_px_height
    }

    pub fn bytes_per_line(&self) -> u32 {
        self.bytes_per_line
    }

    pub fn bytes_per_glyph(&self) -> u32 {
        self.bytes_per_glyph
    }

    pub fn range(&self) -> CodepointRange {
        self.range
    }

    pub fn glyph_count(&self) -> usize {
        self.range.len()
    }

    /// Byte offset of the glyph slot for `codepoint`.
    pub fn glyph_base(&self, codepoint: u32) -> Option<usize> {
        self.range
            .slot(codepoint)
            .map(|slot| slot * self.bytes_per_glyph as usize)
    }

    /// Packed rows of one glyph, or `None` when the code point is outside the
    /// range or the table has been released.
    pub fn glyph(&self, codepoint: u32) -> Option<&[u8]> {
        let base = self.glyph_base(codepoint)?;
        self.table.get(base..base + self.bytes_per_glyph as usize)
    }

    /// Whether pixel `(x, y)` of `codepoint` is set.
    pub fn pixel(&self, codepoint: u32, x: u16, y: u16) -> Option<bool> {
        if x >= self.char_px_width || y >= self.char_px_height {
            return None;
        }
        let glyph = self.glyph(codepoint)?;
        let byte = glyph[y as usize * self.bytes_per_line as usize + x as usize / 8];
        Some(byte & (0x80 >> (x % 8)) != 0)
    }

    /// Release the table. Safe to call repeatedly; later calls are no-ops.
    pub fn release(&mut self) {
        self.table = Vec::new();
    }

    /// Whether [`release`](Self::release) has already dropped the table.
    pub fn is_released(&self) -> bool {
        self.table.is_empty()
    }

    /// Firmware view of this font, borrowing the table.
    pub fn descriptor(&self) -> FontDescriptor<'_> {
        FontDescriptor {
            table: if self.table.is_empty() {
                std::ptr::null()
            } else {
                self.table.as_ptr()
            },
            char_px_width: self.char_px_width,
            char_px_height: self.char_px_height,
            bytes_per_line: self.bytes_per_line,
            bytes_per_glyph: self.bytes_per_glyph,
            _table: PhantomData,
        }
    }
}

/// C-layout font descriptor.
///
/// The first three fields match the minimal `sFONT` layout expected by
/// e-paper firmware (`uint8_t *table; uint16_t Width; uint16_t Height;`), so a
/// pointer to this record can be handed to such code directly. The last two
/// fields are appended extras.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FontDescriptor<'a> {
    pub table: *const u8,
    pub char_px_width: u16,
    pub char_px_height: u16,
    pub bytes_per_line: u32,
    pub bytes_per_glyph: u32,
    _table: PhantomData<&'a [u8]>,
}

const _: () = {
    const PTR: usize = size_of::<*const u8>();
    assert!(offset_of!(FontDescriptor<'static>, table) == 0);
    assert!(offset_of!(FontDescriptor<'static>, char_px_width) == PTR);
    assert!(offset_of!(FontDescriptor<'static>, char_px_height) == PTR + 2);
    assert!(offset_of!(FontDescriptor<'static>, bytes_per_line) == PTR + 4);
    assert!(offset_of!(FontDescriptor<'static>, bytes_per_glyph) == PTR + 8);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_rejects_reversed_bounds() {
        assert!(matches!(
            CodepointRange::new(66, 65),
            Err(PixfontError::InvalidRange { start: 66, end: 65 })
        ));
        assert!(CodepointRange::new(0, MAX_CODEPOINT + 1).is_err());
    }

    #[test]
    fn test_range_slots() {
        let range = CodepointRange::new(0x20, 0x7e).unwrap();
        assert_eq!(range.len(), 95);
        assert_eq!(range.slot(0x20), Some(0));
        assert_eq!(range.slot(0x7e), Some(94));
        assert_eq!(range.slot(0x7f), None);
        assert_eq!(range.iter().next(), Some(0x20));
    }

    #[test]
    fn test_table_length_matches_geometry() {
        for (width, height, start, end) in [(8, 8, 65, 66), (5, 7, 0, 0), (12, 16, 32, 126)] {
            let range = CodepointRange::new(start, end).unwrap();
            let font = PixelFont::zeroed(width, height, range).unwrap();
            assert_eq!(
                font.table().len(),
                font.bytes_per_glyph() as usize * (end - start + 1) as usize
            );
            assert_eq!(
                font.bytes_per_glyph(),
                font.bytes_per_line() * u32::from(height)
            );
        }
    }

    #[test]
    fn test_single_codepoint_table() {
        let font = PixelFont::zeroed(10, 12, CodepointRange::single(0x41).unwrap()).unwrap();
        assert_eq!(font.glyph_count(), 1);
        assert_eq!(font.bytes_per_line(), 2);
        assert_eq!(font.table().len(), 24);
    }

    #[test]
    fn test_pixel_reads_msb_first() {
        let range = CodepointRange::single(0x41).unwrap();
        let mut font = PixelFont::zeroed(9, 2, range).unwrap();
        font.table_mut()[0] = 0b1000_0000;
        font.table_mut()[3] = 0b1000_0000;
        assert_eq!(font.pixel(0x41, 0, 0), Some(true));
        assert_eq!(font.pixel(0x41, 1, 0), Some(false));
        assert_eq!(font.pixel(0x41, 8, 1), Some(true));
        assert_eq!(font.pixel(0x41, 9, 0), None);
        assert_eq!(font.pixel(0x42, 0, 0), None);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut font = PixelFont::zeroed(8, 8, CodepointRange::single(1).unwrap()).unwrap();
        assert!(!font.descriptor().table.is_null());
        font.release();
        font.release();
        assert!(font.is_released());
        assert!(font.descriptor().table.is_null());
        assert_eq!(font.glyph(1), None);
    }

    #[test]
    fn test_descriptor_fields() {
        let font = PixelFont::zeroed(16, 24, CodepointRange::new(32, 127).unwrap()).unwrap();
        let desc = font.descriptor();
        assert_eq!(desc.table, font.table().as_ptr());
        assert_eq!(desc.char_px_width, 16);
        assert_eq!(desc.char_px_height, 24);
        assert_eq!(desc.bytes_per_line, 2);
        assert_eq!(desc.bytes_per_glyph, 48);
    }
}
