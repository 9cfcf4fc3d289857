// this_file: src/job.rs

//! JSON bake job specification and results.
//!
//! A job names one glyph source, a code-point range and an output file:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "jobs": [
//!     {
//!       "id": "ascii-16",
//!       "source": {"kind": "outline", "path": "DejaVuSansMono.ttf", "height": 16},
//!       "range": {"start": 32, "end": 126},
//!       "output": {"path": "font16.c", "format": "c", "name": "Font16"}
//!     }
//!   ]
//! }
//! ```

use camino::Utf8PathBuf;
use pixfont_bdf::BdfBaker;
use pixfont_core::{Baker, PixfontError, Result};
use pixfont_outline::{OutlineBaker, OutlineParams};
use serde::{Deserialize, Serialize};

/// Supported job-spec version.
pub const SPEC_VERSION: &str = "1.0";

/// Maximum number of jobs accepted in one spec.
pub const MAX_JOBS_PER_SPEC: usize = 1000;

/// Top-level job specification.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSpec {
    /// API version (must be "1.0")
    pub version: String,
    /// Bakes to run
    pub jobs: Vec<BakeJob>,
}

impl JobSpec {
    pub fn validate(&self) -> Result<()> {
        if self.version != SPEC_VERSION {
            return Err(PixfontError::invalid_parameter(format!(
                "unsupported job spec version '{}', expected '{SPEC_VERSION}'",
                self.version
            )));
        }
        if self.jobs.is_empty() {
            return Err(PixfontError::invalid_parameter("job spec contains no jobs"));
        }
        if self.jobs.len() > MAX_JOBS_PER_SPEC {
            return Err(PixfontError::invalid_parameter(format!(
                "too many jobs ({}), max {MAX_JOBS_PER_SPEC}",
                self.jobs.len()
            )));
        }
        self.jobs.iter().try_for_each(BakeJob::validate)
    }
}

/// One bake and its export target.
#[derive(Debug, Clone, Deserialize)]
pub struct BakeJob {
    /// Identifier echoed in the result
    pub id: String,
    pub source: SourceConfig,
    pub range: RangeConfig,
    pub output: OutputConfig,
}

impl BakeJob {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(PixfontError::invalid_parameter("job id must not be empty"));
        }
        pixfont_core::CodepointRange::new(self.range.start, self.range.end)?;
        if let SourceConfig::Outline { .. } = self.source {
            self.source.outline_params().validate()?;
        }
        Ok(())
    }
}

/// Glyph source of a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// TrueType/OpenType outline font
    Outline {
        path: Utf8PathBuf,
        /// Cell height in pixels
        height: u16,
        #[serde(default = "default_threshold")]
        threshold: u8,
        #[serde(default = "default_oversample")]
        oversample: u8,
    },
    /// BDF bitmap font description
    Bdf { path: Utf8PathBuf },
}

impl SourceConfig {
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::Outline { path, .. } | Self::Bdf { path } => path,
        }
    }

    fn outline_params(&self) -> OutlineParams {
        match *self {
            Self::Outline {
                height,
                threshold,
                oversample,
                ..
            } => OutlineParams::new(height, threshold, oversample),
            Self::Bdf { .. } => OutlineParams::default(),
        }
    }

    /// Backend that bakes this source.
    pub fn baker(&self) -> Box<dyn Baker> {
        match self {
            Self::Outline { path, .. } => Box::new(OutlineBaker::new(
                path.as_std_path(),
                self.outline_params(),
            )),
            Self::Bdf { path } => Box::new(BdfBaker::new(path.as_std_path())),
        }
    }
}

fn default_threshold() -> u8 {
    128
}

fn default_oversample() -> u8 {
    1
}

/// Inclusive code-point range of a job.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RangeConfig {
    pub start: u32,
    pub end: u32,
}

/// Where and how to write the baked table.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: Utf8PathBuf,
    pub format: OutputFormat,
    /// C identifier for the `c` format
    #[serde(default)]
    pub name: Option<String>,
}

/// Export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raw packed table
    Bin,
    /// C source with `sFONT` descriptor
    C,
    /// PNG preview sheet
    Png,
}

/// Outcome of one job (one JSONL line).
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub id: String,
    /// "success" or "error"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timing: TimingInfo,
}

/// Wall-clock timing of a job in milliseconds.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TimingInfo {
    pub bake_ms: f64,
    pub export_ms: f64,
    pub total_ms: f64,
}

/// Geometry of a successful bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontSummary {
    pub width: u16,
    pub height: u16,
    pub bytes_per_line: u32,
    pub bytes_per_glyph: u32,
    pub glyphs: usize,
    pub table_bytes: usize,
}

impl From<&pixfont_core::PixelFont> for FontSummary {
    fn from(font: &pixfont_core::PixelFont) -> Self {
        Self {
            width: font.char_px_width(),
            height: font.char_px_height(),
            bytes_per_line: font.bytes_per_line(),
            bytes_per_glyph: font.bytes_per_glyph(),
            glyphs: font.glyph_count(),
            table_bytes: font.table().len(),
        }
    }
}
