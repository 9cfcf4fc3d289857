// this_file: backends/pixfont-outline/src/rasterizer.rs

//! Coverage rasterizer for TrueType/OpenType outlines.
//!
//! Metrics and outlines come from ttf-parser; coverage masks are produced by
//! zeno. This is the only place that knows anything about the font format.

use owned_ttf_parser::{AsFaceRef, OwnedFace};
use pixfont_core::{utils, Coverage, CoverageRasterizer, LineMetrics, PixfontError, Result};
use std::path::{Path, PathBuf};
use ttf_parser::{GlyphId, OutlineBuilder};
use zeno::{Command, Mask, Transform};

/// Rasterizer over an owned font face.
pub struct TtfRasterizer {
    face: OwnedFace,
    path: PathBuf,
}

impl TtfRasterizer {
    /// Read and parse the first face of the font at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let data = utils::read_file(path)?;
        Self::from_vec(data, path)
    }

    /// Parse an in-memory font; `path` is only used for error messages.
    pub fn from_vec(data: Vec<u8>, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let face = OwnedFace::from_vec(data, 0)
            .map_err(|e| PixfontError::rasterizer(&path, format!("Failed to parse font: {e}")))?;
        Ok(Self { face, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn glyph_id(&self, codepoint: u32) -> Option<GlyphId> {
        let ch = char::from_u32(codepoint)?;
        self.face.as_face_ref().glyph_index(ch)
    }
}

impl CoverageRasterizer for TtfRasterizer {
    fn line_metrics(&self) -> LineMetrics {
        let face = self.face.as_face_ref();
        LineMetrics {
            ascender: f32::from(face.ascender()),
            descender: f32::from(face.descender()),
            line_gap: f32::from(face.line_gap()),
        }
    }

    fn advance_width(&self, codepoint: u32) -> Option<f32> {
        let glyph_id = self.glyph_id(codepoint)?;
        self.face
            .as_face_ref()
            .glyph_hor_advance(glyph_id)
            .map(f32::from)
    }

    fn fallback_advance_width(&self) -> f32 {
        self.face
            .as_face_ref()
            .glyph_hor_advance(GlyphId(0))
            .map(f32::from)
            .unwrap_or(0.0)
    }

    fn rasterize(&self, codepoint: u32, scale: f32) -> Result<Option<Coverage>> {
        let Some(glyph_id) = self.glyph_id(codepoint) else {
            return Ok(None);
        };

        let mut commands = Vec::new();
        let mut pen = ZenoPen::new(&mut commands);
        if self
            .face
            .as_face_ref()
            .outline_glyph(glyph_id, &mut pen)
            .is_none()
            || commands.is_empty()
        {
            // Mapped but without contours, e.g. U+0020.
            return Ok(Some(Coverage::default()));
        }

        if !(scale.is_finite() && scale > 0.0) {
            return Err(PixfontError::rasterizer(
                &self.path,
                format!("Invalid scale {scale} for U+{codepoint:04X}"),
            ));
        }

        let path: &[Command] = &commands;
        let mut mask = Mask::new(path);
        mask.transform(Some(Transform::scale(scale, scale)));
        let (data, placement) = mask.render();

        let expected = placement.width as usize * placement.height as usize;
        if data.len() < expected {
            return Err(PixfontError::rasterizer(
                &self.path,
                format!(
                    "Mask for U+{codepoint:04X} holds {} bytes, expected {expected}",
                    data.len()
                ),
            ));
        }

        Ok(Some(Coverage {
            width: placement.width,
            height: placement.height,
            left: placement.left,
            top: placement.top,
            data,
        }))
    }
}

/// Adapter from ttf-parser outline callbacks to zeno path commands.
struct ZenoPen<'a> {
    commands: &'a mut Vec<Command>,
}

impl<'a> ZenoPen<'a> {
    fn new(commands: &'a mut Vec<Command>) -> Self {
        Self { commands }
    }
}

impl OutlineBuilder for ZenoPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(Command::MoveTo([x, -y].into())); // Flip Y for raster coordinates
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(Command::LineTo([x, -y].into()));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.commands.push(Command::QuadTo([x1, -y1].into(), [x, -y].into()));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands.push(Command::CurveTo(
            [x1, -y1].into(),
            [x2, -y2].into(),
            [x, -y].into(),
        ));
    }

    fn close(&mut self) {
        self.commands.push(Command::Close);
    }
}
