// this_file: backends/pixfont-core/src/utils.rs

//! Table geometry and allocation helpers shared by the backends.

use crate::{PixfontError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes needed for one packed row of `width` pixels.
pub fn bytes_per_line(width: u16) -> u32 {
    u32::from(width).div_ceil(8)
}

/// Reserve exactly `bytes` bytes, surfacing failure instead of aborting.
pub fn try_alloc(bytes: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(bytes)
        .map_err(|_| PixfontError::AllocationFailed { bytes })?;
    Ok(buffer)
}

/// Read a whole input file into a buffer reserved up front.
///
/// The handle is dropped on every return path.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| PixfontError::open(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| PixfontError::open(path, e))?
        .len();
    let mut data = try_alloc(usize::try_from(len).unwrap_or(usize::MAX))?;
    file.read_to_end(&mut data)
        .map_err(|e| PixfontError::open(path, e))?;
    Ok(data)
}

/// Fill byte for position `index` of a table whose rows are `bytes_per_line` wide.
///
/// Unpopulated slots in description-backed tables keep this pattern, so
/// missing glyphs show up as a visible hatch instead of blank cells.
pub fn placeholder_byte(bytes_per_line: u32, index: usize) -> u8 {
    match bytes_per_line {
        1 => {
            if index % 2 == 0 {
                0xAA
            } else {
                0x55
            }
        }
        2 => {
            if (index / 2) % 2 == 0 {
                0xAA
            } else {
                0x55
            }
        }
        _ => 0xAA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_line() {
        assert_eq!(bytes_per_line(1), 1);
        assert_eq!(bytes_per_line(8), 1);
        assert_eq!(bytes_per_line(9), 2);
        assert_eq!(bytes_per_line(16), 2);
        assert_eq!(bytes_per_line(17), 3);
    }

    #[test]
    fn test_placeholder_patterns() {
        let one: Vec<u8> = (0..4).map(|i| placeholder_byte(1, i)).collect();
        assert_eq!(one, [0xAA, 0x55, 0xAA, 0x55]);

        let two: Vec<u8> = (0..6).map(|i| placeholder_byte(2, i)).collect();
        assert_eq!(two, [0xAA, 0xAA, 0x55, 0x55, 0xAA, 0xAA]);

        assert_eq!(placeholder_byte(3, 4), 0xAA);
    }

    #[test]
    fn test_try_alloc_reserves_capacity() {
        let buffer = try_alloc(64).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= 64);
    }

    #[test]
    fn test_read_file_missing_path() {
        let err = read_file(Path::new("/nonexistent/pixfont/font.bdf")).unwrap_err();
        assert!(matches!(err, PixfontError::FontFileCouldNotBeOpened { .. }));
    }

    #[test]
    fn test_try_alloc_surfaces_failure() {
        assert!(matches!(
            try_alloc(usize::MAX),
            Err(PixfontError::AllocationFailed { .. })
        ));
    }
}
