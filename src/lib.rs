// this_file: src/lib.rs

//! pixfont: bake outline and BDF fonts into packed 1-bit glyph tables.
//!
//! ## Architecture
//!
//! - **pixfont-core**: table layout, bit writer, errors, the [`Baker`] seam
//! - **pixfont-outline**: TrueType/OpenType rasterization with threshold
//! - **pixfont-bdf**: streaming BDF scanner
//! - **pixfont-export**: raw, C source and PNG preview writers
//! - **job**: JSON batch jobs processed in parallel
//!
//! ## Example
//!
//! ```rust,no_run
//! use pixfont::{bake_bdf_font, c_source, CSourceOptions};
//!
//! let font = bake_bdf_font("6x13.bdf", 0x20, 0x7E)?;
//! let code = c_source(&font, &CSourceOptions::default());
//! println!("{code}");
//! # Ok::<(), pixfont::PixfontError>(())
//! ```

pub mod job;

pub use job::{
    BakeJob, FontSummary, JobResult, JobSpec, OutputConfig, OutputFormat, SourceConfig,
    TimingInfo,
};
pub use pixfont_bdf::{bake_bdf_font, bake_bdf_source, BdfBaker};
pub use pixfont_core::{
    Baker, CodepointRange, FontDescriptor, PixelFont, PixfontError, Result, MAX_CODEPOINT,
};
pub use pixfont_export::{c_source, preview_png, write_raw, CSourceOptions, PreviewOptions};
pub use pixfont_outline::{bake_outline_font, OutlineBaker, OutlineParams};

use camino::Utf8Path;
use rayon::prelude::*;
use std::time::Instant;

/// Parse a code point written as decimal, `0x41` or `U+0041`.
pub fn parse_codepoint(text: &str) -> Result<u32> {
    let text = text.trim();
    let invalid = || PixfontError::invalid_parameter(format!("invalid code point '{text}'"));
    let value = if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix("U+"))
        .or_else(|| text.strip_prefix("u+"))
    {
        u32::from_str_radix(hex, 16).map_err(|_| invalid())?
    } else {
        text.parse::<u32>().map_err(|_| invalid())?
    };
    if value > MAX_CODEPOINT {
        return Err(invalid());
    }
    Ok(value)
}

/// Serialize a baked font in the requested format.
///
/// `name` is the C identifier for [`OutputFormat::C`] and ignored otherwise.
pub fn export_font(font: &PixelFont, format: OutputFormat, name: Option<&str>) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Bin => {
            let mut out = Vec::with_capacity(font.table().len());
            write_raw(font, &mut out)?;
            Ok(out)
        }
        OutputFormat::C => {
            let options = CSourceOptions {
                name: name
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Font{}", font.char_px_height())),
                ..CSourceOptions::default()
            };
            Ok(c_source(font, &options).into_bytes())
        }
        OutputFormat::Png => preview_png(font, &PreviewOptions::default()),
    }
}

/// Export `font` and write it to `path`.
pub fn write_output(
    font: &PixelFont,
    path: &Utf8Path,
    format: OutputFormat,
    name: Option<&str>,
) -> Result<()> {
    let bytes = export_font(font, format, name)?;
    std::fs::write(path.as_std_path(), &bytes)
        .map_err(|e| PixfontError::export(format!("cannot write {path}: {e}")))?;
    log::debug!("wrote {} bytes to {path}", bytes.len());
    Ok(())
}

/// Run one job end to end; failures are reported in the result, never raised.
pub fn process_job(job: &BakeJob) -> JobResult {
    let start = Instant::now();
    let mut timing = TimingInfo::default();
    let mut backend = None;

    let result = (|| -> Result<FontSummary> {
        job.validate()?;
        let range = CodepointRange::new(job.range.start, job.range.end)?;
        let baker = job.source.baker();
        backend = Some(baker.name().to_string());

        let font = baker.bake(range)?;
        timing.bake_ms = start.elapsed().as_secs_f64() * 1000.0;

        let export_start = Instant::now();
        write_output(
            &font,
            &job.output.path,
            job.output.format,
            job.output.name.as_deref(),
        )?;
        timing.export_ms = export_start.elapsed().as_secs_f64() * 1000.0;
        Ok(FontSummary::from(&font))
    })();

    timing.total_ms = start.elapsed().as_secs_f64() * 1000.0;

    match result {
        Ok(summary) => JobResult {
            id: job.id.clone(),
            status: "success".to_string(),
            backend,
            font: Some(summary),
            error: None,
            timing,
        },
        Err(e) => {
            log::warn!("job {} failed: {e}", job.id);
            JobResult {
                id: job.id.clone(),
                status: "error".to_string(),
                backend,
                font: None,
                error: Some(e.to_string()),
                timing,
            }
        }
    }
}

/// Process jobs on a rayon pool of `workers` threads (0 = rayon default).
///
/// Results come back in input order.
pub fn process_jobs(jobs: &[BakeJob], workers: usize) -> Result<Vec<JobResult>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| PixfontError::invalid_parameter(format!("cannot start worker pool: {e}")))?;
    Ok(pool.install(|| jobs.par_iter().map(process_job).collect()))
}
