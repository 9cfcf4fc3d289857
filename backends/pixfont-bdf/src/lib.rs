// this_file: backends/pixfont-bdf/src/lib.rs

//! BDF backend: copy already packed glyph rows into a fixed-cell table.
//!
//! The table takes its cell size from `FONTBOUNDINGBOX` and starts out filled
//! with a placeholder hatch. Every in-range `ENCODING` block then overwrites
//! its slot with `height` rows of `bytes_per_line` hex bytes. Slots without a
//! matching block keep the hatch.

pub mod scanner;

pub use scanner::{BdfScanner, BoundingBox, ScanState, ScannedGlyph};

use log::debug;
use pixfont_core::{
    utils, BakeDiagnostics, Baker, BitWriter, CodepointRange, PixelFont, Result,
};
use std::path::{Path, PathBuf};

/// Bake a BDF file into a pixel font.
pub fn bake_bdf_font(path: impl AsRef<Path>, cp_start: u32, cp_end: u32) -> Result<PixelFont> {
    let range = CodepointRange::new(cp_start, cp_end)?;
    BdfBaker::new(path.as_ref()).bake(range)
}

/// Bake BDF text that is already in memory.
pub fn bake_bdf_source(text: &str, range: CodepointRange) -> Result<PixelFont> {
    let mut scanner = BdfScanner::new(text, range);
    let bbox = scanner.bounding_box()?;
    debug!(
        "FONTBOUNDINGBOX {}x{} origin ({}, {})",
        bbox.width, bbox.height, bbox.x_origin, bbox.y_origin
    );

    let bytes_per_line = utils::bytes_per_line(bbox.width);
    let mut font = PixelFont::filled(bbox.width, bbox.height, range, |index| {
        utils::placeholder_byte(bytes_per_line, index)
    })?;
    let bytes_per_glyph = font.bytes_per_glyph() as usize;
    let bytes_per_line = bytes_per_line as usize;

    let mut writer = BitWriter::new(font.table_mut());
    let mut copied = 0usize;
    while let Some(glyph) = scanner.next_glyph()? {
        let Some(slot) = range.slot(glyph.codepoint) else {
            continue;
        };
        let base = slot * bytes_per_glyph;
        for (row, bytes) in glyph.rows.chunks(bytes_per_line).enumerate() {
            writer.begin_row(base, row, bytes_per_line, 0);
            for &byte in bytes {
                writer.put_byte(byte);
            }
        }
        copied += 1;
    }
    debug!("copied {copied} of {} glyphs", range.len());

    Ok(font)
}

/// [`Baker`] reading a BDF file from disk on every bake.
#[derive(Debug, Clone)]
pub struct BdfBaker {
    path: PathBuf,
}

impl BdfBaker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Baker for BdfBaker {
    fn name(&self) -> &'static str {
        "bdf"
    }

    fn bake(&self, range: CodepointRange) -> Result<PixelFont> {
        let data = utils::read_file(&self.path)?;
        let text = String::from_utf8_lossy(&data);
        let font = bake_bdf_source(&text, range)?;
        BakeDiagnostics::new(self.name(), &self.path.to_string_lossy(), &font).log();
        Ok(font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfont_core::PixfontError;

    fn range(start: u32, end: u32) -> CodepointRange {
        CodepointRange::new(start, end).unwrap()
    }

    /// Minimal BDF where every glyph repeats one hex row for the whole cell height.
    fn bdf(width: u16, height: u16, glyphs: &[(i64, &str)]) -> String {
        let mut text = format!(
            "STARTFONT 2.1\nFONT -test-fixed\nSIZE {height} 75 75\n\
             FONTBOUNDINGBOX {width} {height} 0 0\n\
             STARTPROPERTIES 2\nCHARSET_REGISTRY \"ISO10646\"\n\
             CHARSET_ENCODING \"1\"\nENDPROPERTIES\n\
             CHARS {}\n",
            glyphs.len()
        );
        for (codepoint, row) in glyphs {
            text.push_str(&format!(
                "STARTCHAR U+{codepoint}\nENCODING {codepoint}\nSWIDTH 500 0\nDWIDTH {width} 0\n\
                 BBX {width} {height} 0 0\nBITMAP\n"
            ));
            for _ in 0..height {
                text.push_str(row);
                text.push('\n');
            }
            text.push_str("ENDCHAR\n");
        }
        text.push_str("ENDFONT\n");
        text
    }

    #[test]
    fn test_two_solid_glyphs() {
        let text = bdf(8, 8, &[(65, "FF"), (66, "FF")]);
        let font = bake_bdf_source(&text, range(65, 66)).unwrap();
        assert_eq!(font.table().len(), 16);
        assert!(font.table().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_clear_glyph_decodes_to_zero() {
        let text = bdf(8, 8, &[(65, "00")]);
        let font = bake_bdf_source(&text, range(65, 65)).unwrap();
        assert_eq!(font.glyph(65).unwrap(), &[0u8; 8]);
    }

    #[test]
    fn test_missing_bounding_box_allocates_nothing() {
        let text = "STARTFONT 2.1\nENCODING 65\nBITMAP\nFF\nENDCHAR\n";
        assert!(matches!(
            bake_bdf_source(text, range(65, 65)),
            Err(PixfontError::MissingBoundingBox)
        ));
    }

    #[test]
    fn test_absent_glyphs_keep_placeholder() {
        let text = bdf(8, 4, &[(66, "3C")]);
        let font = bake_bdf_source(&text, range(65, 67)).unwrap();
        assert_eq!(font.glyph(65).unwrap(), &[0xAA, 0x55, 0xAA, 0x55]);
        assert_eq!(font.glyph(66).unwrap(), &[0x3C; 4]);
        assert_eq!(font.glyph(67).unwrap(), &[0xAA, 0x55, 0xAA, 0x55]);
    }

    #[test]
    fn test_out_of_range_glyphs_do_not_disturb_neighbours() {
        let _ = env_logger::builder().is_test(true).try_init();
        let text = bdf(8, 2, &[(64, "11"), (65, "81"), (200, "22"), (66, "42"), (67, "33")]);
        let font = bake_bdf_source(&text, range(65, 66)).unwrap();
        assert_eq!(font.table(), &[0x81, 0x81, 0x42, 0x42]);
    }

    #[test]
    fn test_single_codepoint_range() {
        let text = bdf(8, 3, &[(65, "F0"), (66, "0F")]);
        let font = bake_bdf_source(&text, range(66, 66)).unwrap();
        assert_eq!(font.glyph_count(), 1);
        assert_eq!(font.table(), &[0x0F; 3]);
    }

    #[test]
    fn test_two_bytes_per_line() {
        let text = bdf(12, 2, &[(0x2588, "FFF0")]);
        let font = bake_bdf_source(&text, range(0x2588, 0x2589)).unwrap();
        assert_eq!(font.bytes_per_line(), 2);
        assert_eq!(font.glyph(0x2588).unwrap(), &[0xFF, 0xF0, 0xFF, 0xF0]);
        assert_eq!(font.glyph(0x2589).unwrap(), &[0xAA, 0xAA, 0x55, 0x55]);
        assert_eq!(font.pixel(0x2588, 11, 1), Some(true));
    }

    #[test]
    fn test_trailing_bits_come_from_source() {
        let text = bdf(5, 1, &[(65, "FF")]);
        let font = bake_bdf_source(&text, range(65, 65)).unwrap();
        assert_eq!(font.table(), &[0xFF]);
    }

    #[test]
    fn test_bake_is_repeatable() {
        let text = bdf(8, 8, &[(48, "3C"), (49, "18"), (50, "7E")]);
        let first = bake_bdf_source(&text, range(47, 51)).unwrap();
        let second = bake_bdf_source(&text, range(47, 51)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bad_hex_reports_codepoint() {
        let text = bdf(8, 2, &[(65, "FF"), (66, "XY")]);
        match bake_bdf_source(&text, range(65, 66)) {
            Err(PixfontError::ErrorParsingCharacterBytes { codepoint, .. }) => {
                assert_eq!(codepoint, 66)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_bad_hex_outside_range_is_ignored() {
        let text = bdf(8, 2, &[(65, "FF"), (66, "XY")]);
        let font = bake_bdf_source(&text, range(65, 65)).unwrap();
        assert_eq!(font.table(), &[0xFF, 0xFF]);
    }

    #[test]
    fn test_bake_bdf_font_missing_file() {
        let err = bake_bdf_font("/nonexistent/pixfont/font.bdf", 32, 126).unwrap_err();
        assert!(matches!(err, PixfontError::FontFileCouldNotBeOpened { .. }));
    }
}
