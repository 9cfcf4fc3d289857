// this_file: crates/pixfont-export/src/c_source.rs

//! C source emitter producing a table plus an `sFONT`-style descriptor.

use pixfont_core::PixelFont;
use std::fmt::Write;

/// Options for the generated C source.
#[derive(Debug, Clone)]
pub struct CSourceOptions {
    /// Identifier of the descriptor; the table is `<name>_Table`
    pub name: String,
    /// Header declaring `sFONT`
    pub include: String,
    /// Append a `// ..##..` pixel sketch to each row
    pub sketch: bool,
}

impl Default for CSourceOptions {
    fn default() -> Self {
        Self {
            name: "Font".to_string(),
            include: "fonts.h".to_string(),
            sketch: true,
        }
    }
}

/// Render `font` as a C translation unit.
pub fn c_source(font: &PixelFont, options: &CSourceOptions) -> String {
    let range = font.range();
    let bytes_per_line = font.bytes_per_line() as usize;
    let mut out = String::with_capacity(font.table().len() * 6 + 256);

    let _ = writeln!(
        out,
        "// {}x{} pixel font, U+{:04X}..U+{:04X}, {} bytes per glyph",
        font.char_px_width(),
        font.char_px_height(),
        range.start(),
        range.end(),
        font.bytes_per_glyph()
    );
    let _ = writeln!(out, "#include <stdint.h>");
    let _ = writeln!(out, "#include \"{}\"", options.include);
    out.push('\n');
    let _ = writeln!(out, "const uint8_t {}_Table[] = {{", options.name);

    for (slot, codepoint) in range.iter().enumerate() {
        let Some(glyph) = font.glyph(codepoint) else {
            break;
        };
        let _ = writeln!(
            out,
            "    // @{} {} (U+{codepoint:04X})",
            slot * font.bytes_per_glyph() as usize,
            label(codepoint)
        );
        for (row, bytes) in glyph.chunks(bytes_per_line).enumerate() {
            out.push_str("    ");
            for byte in bytes {
                let _ = write!(out, "0x{byte:02X}, ");
            }
            if options.sketch {
                out.push_str("// ");
                for x in 0..font.char_px_width() {
                    let set = font.pixel(codepoint, x, row as u16) == Some(true);
                    out.push(if set { '#' } else { '.' });
                }
            } else {
                out.truncate(out.trim_end().len());
            }
            out.push('\n');
        }
    }
    out.push_str("};\n\n");

    let _ = writeln!(out, "sFONT {} = {{", options.name);
    let _ = writeln!(out, "    {}_Table,", options.name);
    let _ = writeln!(out, "    {}, /* Width */", font.char_px_width());
    let _ = writeln!(out, "    {}, /* Height */", font.char_px_height());
    out.push_str("};\n");
    out
}

/// Printable label for a code point inside a C comment.
fn label(codepoint: u32) -> String {
    match char::from_u32(codepoint) {
        Some(ch) if !ch.is_control() && ch != '\\' && ch != '*' && ch != '/' => format!("'{ch}'"),
        _ => "---".to_string(),
    }
}
