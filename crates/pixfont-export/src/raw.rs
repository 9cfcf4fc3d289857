// this_file: crates/pixfont-export/src/raw.rs

//! Raw table dump, byte for byte.

use pixfont_core::{PixelFont, PixfontError, Result};
use std::io::Write;

/// Write the packed table exactly as firmware reads it.
pub fn write_raw<W: Write>(font: &PixelFont, mut out: W) -> Result<()> {
    out.write_all(font.table())
        .and_then(|_| out.flush())
        .map_err(|e| PixfontError::export(format!("Failed to write table: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfont_core::CodepointRange;

    #[test]
    fn test_write_raw_matches_table() {
        let mut font = PixelFont::zeroed(8, 2, CodepointRange::new(1, 2).unwrap()).unwrap();
        font.table_mut().copy_from_slice(&[1, 2, 3, 4]);
        let mut out = Vec::new();
        write_raw(&font, &mut out).unwrap();
        assert_eq!(out, [1, 2, 3, 4]);
    }
}
