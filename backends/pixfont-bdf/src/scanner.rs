// this_file: backends/pixfont-bdf/src/scanner.rs

//! Forward-only scanner over BDF text.
//!
//! The scanner is an explicit state machine:
//!
//! ```text
//! SeekingBoundingBox -> SeekingEncoding -> SeekingBitmap -> ReadingRows
//!                            ^  |  (out of range)               |
//!                            |  +--------+                      |
//!                            +----------------------------------+
//! ```
//!
//! It never moves backwards. An `ENCODING` outside the requested range sends
//! the machine straight back to `SeekingEncoding`; the skipped glyph's rows are
//! passed over by that forward search.

use log::trace;
use pixfont_core::{utils, CodepointRange, PixfontError, Result};

const FONTBOUNDINGBOX: &str = "FONTBOUNDINGBOX";
const ENCODING: &str = "ENCODING";
const BITMAP: &str = "BITMAP";
const ENDCHAR: &str = "ENDCHAR";

/// Global `FONTBOUNDINGBOX width height x_origin y_origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub width: u16,
    pub height: u16,
    pub x_origin: i32,
    pub y_origin: i32,
}

impl BoundingBox {
    pub fn bytes_per_line(&self) -> usize {
        utils::bytes_per_line(self.width) as usize
    }
}

/// Position of the scanner in the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    SeekingBoundingBox,
    SeekingEncoding,
    SeekingBitmap { codepoint: u32, line: usize },
    ReadingRows { codepoint: u32, row: u16 },
    Finished,
}

/// One in-range glyph with its rows already packed.
#[derive(Debug, PartialEq, Eq)]
pub struct ScannedGlyph<'s> {
    pub codepoint: u32,
    /// `height * bytes_per_line` bytes in row order
    pub rows: &'s [u8],
}

/// Line cursor that only ever advances.
#[derive(Debug)]
struct LineCursor<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text, line: 0 }
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        if self.rest.is_empty() {
            return None;
        }
        let (line, rest) = match self.rest.find('\n') {
            Some(idx) => (&self.rest[..idx], &self.rest[idx + 1..]),
            None => (self.rest, ""),
        };
        self.rest = rest;
        self.line += 1;
        Some((self.line, line.trim_end_matches('\r')))
    }

    /// Advance to the next line whose first token is `keyword`, returning the
    /// line number and the text after the keyword.
    fn seek_keyword(&mut self, keyword: &str) -> Option<(usize, &'a str)> {
        while let Some((number, line)) = self.next_line() {
            if let Some(rest) = line.trim_start().strip_prefix(keyword) {
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    return Some((number, rest));
                }
            }
        }
        None
    }

    /// Next line that is not blank.
    fn next_content_line(&mut self) -> Option<(usize, &'a str)> {
        while let Some((number, line)) = self.next_line() {
            let line = line.trim();
            if !line.is_empty() {
                return Some((number, line));
            }
        }
        None
    }
}

/// Scanner producing the bounding box and then every in-range glyph.
#[derive(Debug)]
pub struct BdfScanner<'a> {
    cursor: LineCursor<'a>,
    range: CodepointRange,
    state: ScanState,
    bbox: Option<BoundingBox>,
    glyph: Vec<u8>,
}

impl<'a> BdfScanner<'a> {
    pub fn new(text: &'a str, range: CodepointRange) -> Self {
        Self {
            cursor: LineCursor::new(text),
            range,
            state: ScanState::SeekingBoundingBox,
            bbox: None,
            glyph: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Locate and parse `FONTBOUNDINGBOX`; later calls return the cached box.
    pub fn bounding_box(&mut self) -> Result<BoundingBox> {
        if let Some(bbox) = self.bbox {
            return Ok(bbox);
        }
        debug_assert_eq!(self.state, ScanState::SeekingBoundingBox);

        let (line, rest) = self
            .cursor
            .seek_keyword(FONTBOUNDINGBOX)
            .ok_or(PixfontError::MissingBoundingBox)?;
        let bbox = parse_bounding_box(line, rest)?;

        let row_bytes = bbox.bytes_per_line() * usize::from(bbox.height);
        self.glyph = utils::try_alloc(row_bytes)?;
        self.bbox = Some(bbox);
        self.state = ScanState::SeekingEncoding;
        Ok(bbox)
    }

    /// Advance to the next glyph inside the range; `None` at end of input.
    pub fn next_glyph(&mut self) -> Result<Option<ScannedGlyph<'_>>> {
        let bbox = self.bounding_box()?;
        let bytes_per_line = bbox.bytes_per_line();

        loop {
            match self.state {
                ScanState::SeekingBoundingBox => unreachable!("bounding box is read first"),
                ScanState::SeekingEncoding => match self.cursor.seek_keyword(ENCODING) {
                    None => self.state = ScanState::Finished,
                    Some((line, rest)) => {
                        let value = parse_codepoint(line, rest)?;
                        match u32::try_from(value).ok().filter(|cp| self.range.contains(*cp)) {
                            Some(codepoint) => {
                                self.state = ScanState::SeekingBitmap { codepoint, line }
                            }
                            None => trace!("line {line}: ENCODING {value} outside range, skipped"),
                        }
                    }
                },
                ScanState::SeekingBitmap { codepoint, line } => {
                    if self.cursor.seek_keyword(BITMAP).is_none() {
                        return Err(PixfontError::ErrorParsingCharacterBytes {
                            codepoint,
                            line,
                            reason: "no BITMAP section before end of input".to_string(),
                        });
                    }
                    self.glyph.clear();
                    self.state = ScanState::ReadingRows { codepoint, row: 0 };
                }
                ScanState::ReadingRows { codepoint, row } if row == bbox.height => {
                    self.state = ScanState::SeekingEncoding;
                    return Ok(Some(ScannedGlyph {
                        codepoint,
                        rows: &self.glyph,
                    }));
                }
                ScanState::ReadingRows { codepoint, row } => {
                    let line_no = self.cursor.line;
                    let (line, text) = self.cursor.next_content_line().ok_or_else(|| {
                        PixfontError::ErrorParsingCharacterBytes {
                            codepoint,
                            line: line_no,
                            reason: format!("input ends after {row} of {} rows", bbox.height),
                        }
                    })?;
                    if text.starts_with(ENDCHAR) {
                        return Err(PixfontError::ErrorParsingCharacterBytes {
                            codepoint,
                            line,
                            reason: format!("ENDCHAR after {row} of {} rows", bbox.height),
                        });
                    }
                    decode_row(text, bytes_per_line, &mut self.glyph).map_err(|reason| {
                        PixfontError::ErrorParsingCharacterBytes {
                            codepoint,
                            line,
                            reason,
                        }
                    })?;
                    self.state = ScanState::ReadingRows {
                        codepoint,
                        row: row + 1,
                    };
                }
                ScanState::Finished => return Ok(None),
            }
        }
    }
}

fn parse_bounding_box(line: usize, rest: &str) -> Result<BoundingBox> {
    let malformed = || PixfontError::MalformedBoundingBox {
        line,
        found: rest.trim().to_string(),
    };

    let mut fields = [0i32; 4];
    let mut tokens = rest.split_whitespace();
    for field in &mut fields {
        *field = tokens
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or_else(malformed)?;
    }

    let [width, height, x_origin, y_origin] = fields;
    let width = u16::try_from(width)
        .ok()
        .filter(|w| *w > 0)
        .ok_or_else(malformed)?;
    let height = u16::try_from(height)
        .ok()
        .filter(|h| *h > 0)
        .ok_or_else(malformed)?;

    Ok(BoundingBox {
        width,
        height,
        x_origin,
        y_origin,
    })
}

fn parse_codepoint(line: usize, rest: &str) -> Result<i64> {
    rest.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| PixfontError::MalformedCodepoint {
            line,
            found: rest.trim().to_string(),
        })
}

/// Append `bytes_per_line` bytes decoded from two-digit hex pairs in `text`.
///
/// Whitespace between digits is skipped; digits beyond the row width are ignored.
fn decode_row(
    text: &str,
    bytes_per_line: usize,
    out: &mut Vec<u8>,
) -> std::result::Result<(), String> {
    let mut digits = text.chars().filter(|c| !c.is_ascii_whitespace());
    for index in 0..bytes_per_line {
        let (Some(high), Some(low)) = (digits.next(), digits.next()) else {
            return Err(format!(
                "row '{text}' holds {index} bytes, expected {bytes_per_line}"
            ));
        };
        let (Some(high), Some(low)) = (high.to_digit(16), low.to_digit(16)) else {
            return Err(format!("invalid hex byte '{high}{low}' in row '{text}'"));
        };
        out.push((high << 4 | low) as u8);
    }
    Ok(())
}
