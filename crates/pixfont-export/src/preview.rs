// this_file: crates/pixfont-export/src/preview.rs

//! PNG contact sheet of every glyph in a table, for eyeballing a bake.

use log::debug;
use pixfont_core::{PixelFont, PixfontError, Result};

const INK: u8 = 0x00;
const PAPER: u8 = 0xFF;
const GUTTER: u8 = 0xC0;

/// Layout of the preview sheet.
#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    /// Glyph cells per sheet row
    pub columns: u32,
    /// Integer upscale applied to every pixel
    pub scale: u32,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            columns: 16,
            scale: 2,
        }
    }
}

/// Render all glyphs into a grayscale PNG, cells separated by 1px gutters.
pub fn preview_png(font: &PixelFont, options: &PreviewOptions) -> Result<Vec<u8>> {
    let (pixels, width, height) = render_sheet(font, options)?;
    debug!("preview sheet {width}x{height} for {} glyphs", font.glyph_count());
    encode_png(width, height, &pixels)
}

/// Grayscale sheet pixels with their dimensions.
fn render_sheet(font: &PixelFont, options: &PreviewOptions) -> Result<(Vec<u8>, u32, u32)> {
    if options.columns == 0 || options.scale == 0 {
        return Err(PixfontError::invalid_parameter(
            "preview columns and scale must be non-zero",
        ));
    }

    let count = font.glyph_count() as u32;
    let columns = options.columns.min(count);
    let rows = count.div_ceil(columns);
    let cell_w = u32::from(font.char_px_width()) * options.scale;
    let cell_h = u32::from(font.char_px_height()) * options.scale;
    let width = columns * (cell_w + 1) + 1;
    let height = rows * (cell_h + 1) + 1;

    let mut pixels = vec![GUTTER; width as usize * height as usize];
    for (index, codepoint) in font.range().iter().enumerate() {
        let index = index as u32;
        let origin_x = (index % columns) * (cell_w + 1) + 1;
        let origin_y = (index / columns) * (cell_h + 1) + 1;
        for py in 0..cell_h {
            let y = (py / options.scale) as u16;
            let row_start = ((origin_y + py) * width + origin_x) as usize;
            for px in 0..cell_w {
                let x = (px / options.scale) as u16;
                let set = font.pixel(codepoint, x, y) == Some(true);
                pixels[row_start + px as usize] = if set { INK } else { PAPER };
            }
        }
    }

    Ok((pixels, width, height))
}

fn encode_png(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|err| PixfontError::export(format!("PNG encoder error: {err}")))?;
        writer
            .write_image_data(data)
            .map_err(|err| PixfontError::export(format!("PNG write error: {err}")))?;
    }
    Ok(png_data)
}
