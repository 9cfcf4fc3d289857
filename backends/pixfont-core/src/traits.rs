// this_file: backends/pixfont-core/src/traits.rs

//! Seams between the baking pipeline, its backends, and the outline rasterizer.

use crate::{CodepointRange, PixelFont, Result};

/// A glyph source that can fill a [`PixelFont`] for a code-point range.
pub trait Baker: Send + Sync {
    /// Short backend name used in logs and job results.
    fn name(&self) -> &'static str;

    /// Allocate and populate a fresh table for `range`.
    fn bake(&self, range: CodepointRange) -> Result<PixelFont>;
}

/// Font-wide vertical metrics in font units (descender is negative).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascender: f32,
    pub descender: f32,
    pub line_gap: f32,
}

/// Grayscale coverage bitmap for one glyph.
///
/// `left`/`top` place the bitmap's top-left corner relative to the glyph
/// origin on the baseline, y growing downwards (so `top` is usually negative).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
    pub data: Vec<u8>,
}

impl Coverage {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at `(x, y)`, zero outside the bitmap.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// The external outline rasterizer capability.
///
/// Given a scale and a code point it produces a coverage bitmap with its
/// placement; everything format-specific stays behind this trait.
pub trait CoverageRasterizer {
    fn line_metrics(&self) -> LineMetrics;

    /// Horizontal advance of `codepoint` in font units, if the font maps it.
    fn advance_width(&self, codepoint: u32) -> Option<f32>;

    /// Advance used when the requested code point is unmapped (glyph 0).
    fn fallback_advance_width(&self) -> f32;

    /// Rasterize `codepoint` at `scale` pixels per font unit.
    ///
    /// `Ok(None)` means the font has no glyph for the code point.
    fn rasterize(&self, codepoint: u32, scale: f32) -> Result<Option<Coverage>>;

    /// Scale mapping `ascender - descender` onto `pixel_height` pixels.
    fn scale_for_pixel_height(&self, pixel_height: f32) -> f32 {
        let metrics = self.line_metrics();
        let span = metrics.ascender - metrics.descender;
        if span <= 0.0 {
            return 0.0;
        }
        pixel_height / span
    }
}
