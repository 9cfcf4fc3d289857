// this_file: backends/pixfont-outline/src/lib.rs

//! Outline-font backend: rasterize, threshold and pack glyphs into fixed cells.
//!
//! For every code point the rasterizer yields a coverage bitmap placed
//! relative to the glyph origin. The bitmap is positioned in the cell with
//! `y = ascent + top`, `x = left`, clipped to the cell, thresholded against the
//! gray level and packed MSB-first through [`BitWriter`].

pub mod rasterizer;

pub use rasterizer::TtfRasterizer;

use log::{debug, warn};
use pixfont_core::{
    utils, BakeDiagnostics, Baker, BitWriter, CodepointRange, Coverage, CoverageRasterizer,
    PixelFont, PixfontError, Result,
};
use std::path::{Path, PathBuf};

/// Reference glyph whose advance defines the cell width.
pub const WIDTH_REFERENCE: char = 'W';

/// Largest accepted oversampling factor.
pub const MAX_OVERSAMPLE: u8 = 8;

/// Parameters of an outline bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineParams {
    /// Cell height in pixels
    pub cell_height_px: u16,
    /// Coverage at or above this level becomes a set bit
    pub gray_threshold: u8,
    /// Supersampling factor per axis (1 disables)
    pub oversample: u8,
}

impl OutlineParams {
    pub fn new(cell_height_px: u16, gray_threshold: u8, oversample: u8) -> Self {
        Self {
            cell_height_px,
            gray_threshold,
            oversample,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_height_px == 0 {
            return Err(PixfontError::invalid_parameter(
                "cell height must be at least 1 pixel",
            ));
        }
        if !(1..=MAX_OVERSAMPLE).contains(&self.oversample) {
            return Err(PixfontError::invalid_parameter(format!(
                "oversample must be within 1..={MAX_OVERSAMPLE}, got {}",
                self.oversample
            )));
        }
        Ok(())
    }
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            cell_height_px: 16,
            gray_threshold: 128,
            oversample: 1,
        }
    }
}

/// Bake an outline font file into a pixel font.
pub fn bake_outline_font(
    path: impl AsRef<Path>,
    cell_height_px: u16,
    cp_start: u32,
    cp_end: u32,
    gray_threshold: u8,
    oversample: u8,
) -> Result<PixelFont> {
    let range = CodepointRange::new(cp_start, cp_end)?;
    let params = OutlineParams::new(cell_height_px, gray_threshold, oversample);
    OutlineBaker::new(path.as_ref(), params).bake(range)
}

/// [`Baker`] reading an outline font from disk on every bake.
#[derive(Debug, Clone)]
pub struct OutlineBaker {
    path: PathBuf,
    params: OutlineParams,
}

impl OutlineBaker {
    pub fn new(path: impl Into<PathBuf>, params: OutlineParams) -> Self {
        Self {
            path: path.into(),
            params,
        }
    }

    pub fn params(&self) -> &OutlineParams {
        &self.params
    }
}

impl Baker for OutlineBaker {
    fn name(&self) -> &'static str {
        "outline"
    }

    fn bake(&self, range: CodepointRange) -> Result<PixelFont> {
        self.params.validate()?;
        let rasterizer = TtfRasterizer::open(&self.path)?;
        let font = bake_with_rasterizer(&rasterizer, &self.params, range)?;
        BakeDiagnostics::new(self.name(), &self.path.to_string_lossy(), &font).log();
        Ok(font)
    }
}

/// Cell geometry derived from the font metrics at the bake scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub scale: f32,
    pub width: u16,
    pub height: u16,
    pub ascent: i32,
    pub descent: i32,
}

impl CellMetrics {
    /// Compute scale, cell width (from [`WIDTH_REFERENCE`]) and ascent.
    pub fn compute<R: CoverageRasterizer + ?Sized>(
        rasterizer: &R,
        cell_height_px: u16,
    ) -> Result<Self> {
        let scale = rasterizer.scale_for_pixel_height(f32::from(cell_height_px));
        if !(scale.is_finite() && scale > 0.0) {
            return Err(PixfontError::invalid_parameter(
                "font has no vertical extent to scale",
            ));
        }

        let advance = rasterizer
            .advance_width(u32::from(WIDTH_REFERENCE))
            .unwrap_or_else(|| rasterizer.fallback_advance_width());
        let width = (advance * scale).ceil().clamp(1.0, f32::from(u16::MAX)) as u16;

        let ascent = (rasterizer.line_metrics().ascender * scale).round() as i32;
        let descent = i32::from(cell_height_px) - ascent;

        Ok(Self {
            scale,
            width,
            height: cell_height_px,
            ascent,
            descent,
        })
    }
}

/// Bake `range` with any coverage rasterizer.
pub fn bake_with_rasterizer<R: CoverageRasterizer + ?Sized>(
    rasterizer: &R,
    params: &OutlineParams,
    range: CodepointRange,
) -> Result<PixelFont> {
    params.validate()?;
    let cell = CellMetrics::compute(rasterizer, params.cell_height_px)?;
    debug!(
        "cell {}x{} scale={:.5} ascent={} descent={}",
        cell.width, cell.height, cell.scale, cell.ascent, cell.descent
    );

    let mut font = PixelFont::zeroed(cell.width, cell.height, range)?;
    let bytes_per_glyph = font.bytes_per_glyph() as usize;
    let bytes_per_line = font.bytes_per_line() as usize;
    let raster_scale = cell.scale * f32::from(params.oversample);

    let mut writer = BitWriter::new(font.table_mut());
    for (slot, codepoint) in range.iter().enumerate() {
        let coverage = match rasterizer.rasterize(codepoint, raster_scale) {
            Ok(Some(coverage)) => coverage,
            Ok(None) => {
                debug!("U+{codepoint:04X} not in font, leaving blank");
                continue;
            }
            Err(e) => {
                warn!("U+{codepoint:04X} failed to rasterize, leaving blank: {e}");
                continue;
            }
        };
        let coverage = if params.oversample > 1 {
            downsample(&coverage, u32::from(params.oversample))?
        } else {
            coverage
        };

        place_glyph(
            &mut writer,
            &coverage,
            GlyphCell {
                base: slot * bytes_per_glyph,
                bytes_per_line,
                width: i32::from(cell.width),
                height: i32::from(cell.height),
                ascent: cell.ascent,
            },
            params.gray_threshold,
        );
    }

    Ok(font)
}

/// Where one glyph slot sits in the table.
#[derive(Debug, Clone, Copy)]
struct GlyphCell {
    base: usize,
    bytes_per_line: usize,
    width: i32,
    height: i32,
    ascent: i32,
}

/// Clip `coverage` to the cell and pack thresholded bits row by row.
fn place_glyph(writer: &mut BitWriter<'_>, coverage: &Coverage, cell: GlyphCell, threshold: u8) {
    if coverage.is_empty() {
        return;
    }

    let y_start = cell.ascent + coverage.top;
    let y_end = y_start + coverage.height as i32;
    let x_start = coverage.left;
    let x_end = x_start + coverage.width as i32;

    let col_from = x_start.max(0);
    let col_to = x_end.min(cell.width);
    if col_from >= col_to {
        return;
    }

    for y in y_start.max(0)..y_end.min(cell.height) {
        writer.begin_row(cell.base, y as usize, cell.bytes_per_line, col_from as usize);
        let src_y = (y - y_start) as u32;
        for x in col_from..col_to {
            let src_x = (x - x_start) as u32;
            writer.put_bit(coverage.get(src_x, src_y) >= threshold);
        }
    }
}

/// Box-filter an oversampled coverage bitmap back down by `factor` per axis.
///
/// Output pixels are aligned to multiples of `factor` in the oversampled
/// space, so the placement offset divides exactly.
pub fn downsample(coverage: &Coverage, factor: u32) -> Result<Coverage> {
    if factor <= 1 || coverage.is_empty() {
        return Ok(coverage.clone());
    }

    let f = factor as i32;
    let left = coverage.left.div_euclid(f);
    let top = coverage.top.div_euclid(f);
    let right = (coverage.left + coverage.width as i32 + f - 1).div_euclid(f);
    let bottom = (coverage.top + coverage.height as i32 + f - 1).div_euclid(f);
    let width = (right - left) as u32;
    let height = (bottom - top) as u32;

    let cells = width as usize * height as usize;
    let mut sums: Vec<u32> = Vec::new();
    sums.try_reserve_exact(cells)
        .map_err(|_| PixfontError::AllocationFailed {
            bytes: cells * std::mem::size_of::<u32>(),
        })?;
    sums.resize(cells, 0);

    for sy in 0..coverage.height {
        let oy = ((coverage.top + sy as i32).div_euclid(f) - top) as usize;
        for sx in 0..coverage.width {
            let ox = ((coverage.left + sx as i32).div_euclid(f) - left) as usize;
            sums[oy * width as usize + ox] += u32::from(coverage.get(sx, sy));
        }
    }

    let area = factor * factor;
    let mut data = utils::try_alloc(cells)?;
    data.extend(sums.iter().map(|&sum| (sum / area) as u8));

    Ok(Coverage {
        width,
        height,
        left,
        top,
        data,
    })
}
