// this_file: backends/pixfont-core/src/error.rs

//! Error taxonomy shared by every baking backend.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the baking backends and exporters.
///
/// Nothing is retried internally; every variant reaches the caller.
#[derive(Error, Debug)]
pub enum PixfontError {
    /// The glyph table (or a transient buffer) could not be reserved
    #[error("Allocation of {bytes} bytes failed")]
    AllocationFailed { bytes: usize },

    /// Font or description file is unreadable
    #[error("Font file could not be opened: {path}: {source}")]
    FontFileCouldNotBeOpened {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Outline font could not be parsed by the rasterizer
    #[error("Rasterizer failed for {path}: {reason}")]
    RasterizerFailed { path: PathBuf, reason: String },

    /// No FONTBOUNDINGBOX line before end of input
    #[error("Missing FONTBOUNDINGBOX declaration")]
    MissingBoundingBox,

    /// FONTBOUNDINGBOX present but with fewer than four numeric fields
    #[error("Malformed FONTBOUNDINGBOX on line {line}: '{found}'")]
    MalformedBoundingBox { line: usize, found: String },

    /// ENCODING line without a numeric value
    #[error("Malformed ENCODING on line {line}: '{found}'")]
    MalformedCodepoint { line: usize, found: String },

    /// Truncated or non-hex BITMAP rows
    #[error("Error parsing bytes of character U+{codepoint:04X} on line {line}: {reason}")]
    ErrorParsingCharacterBytes {
        codepoint: u32,
        line: usize,
        reason: String,
    },

    /// Code-point range with start past end or beyond U+10FFFF
    #[error("Invalid code-point range: {start:#x}..={end:#x}")]
    InvalidRange { start: u32, end: u32 },

    /// Caller-supplied parameter outside its accepted domain
    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    /// Failure while emitting a baked font
    #[error("Export error: {0}")]
    Export(String),
}

impl PixfontError {
    /// Helper for unreadable input files.
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FontFileCouldNotBeOpened {
            path: path.into(),
            source,
        }
    }

    /// Helper for rasterizer-side failures.
    pub fn rasterizer(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::RasterizerFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Helper for parameter validation failures.
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Helper for exporter failures.
    pub fn export(reason: impl Into<String>) -> Self {
        Self::Export(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_open() {
        let err = PixfontError::open(
            "/fonts/missing.bdf",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("could not be opened"));
        assert!(msg.contains("/fonts/missing.bdf"));
    }

    #[test]
    fn test_error_display_character_bytes() {
        let err = PixfontError::ErrorParsingCharacterBytes {
            codepoint: 0x41,
            line: 12,
            reason: "truncated".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error parsing bytes of character U+0041 on line 12: truncated"
        );
    }
}
