// this_file: backends/pixfont-core/src/diagnostics.rs

//! Bake diagnostics helpers used by backends for structured debug logging.

use crate::types::PixelFont;
use log::{debug, log_enabled, Level};

/// Snapshot of the geometry a backend produced.
#[derive(Debug)]
pub struct BakeDiagnostics<'a> {
    backend: &'a str,
    source: &'a str,
    width: u16,
    height: u16,
    bytes_per_line: u32,
    bytes_per_glyph: u32,
    start: u32,
    end: u32,
    table_bytes: usize,
}

impl<'a> BakeDiagnostics<'a> {
    /// Capture the snapshot for `font` as produced by `backend` from `source`.
    pub fn new(backend: &'a str, source: &'a str, font: &PixelFont) -> Self {
        Self {
            backend,
            source,
            width: font.char_px_width(),
            height: font.char_px_height(),
            bytes_per_line: font.bytes_per_line(),
            bytes_per_glyph: font.bytes_per_glyph(),
            start: font.range().start(),
            end: font.range().end(),
            table_bytes: font.table().len(),
        }
    }

    /// Emit the snapshot at debug level when logging is enabled.
    pub fn log(&self) {
        if log_enabled!(Level::Debug) {
            debug!(
                target: "pixfont::bake",
                "backend={backend} source={source} width={width} height={height} bytes_per_line={bpl} bytes_per_glyph={bpg} range=U+{start:04X}..=U+{end:04X} table_bytes={bytes}",
                backend = self.backend,
                source = self.source,
                width = self.width,
                height = self.height,
                bpl = self.bytes_per_line,
                bpg = self.bytes_per_glyph,
                start = self.start,
                end = self.end,
                bytes = self.table_bytes,
            );
        }
    }
}
