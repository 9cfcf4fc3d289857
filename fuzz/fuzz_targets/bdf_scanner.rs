// this_file: fuzz/fuzz_targets/bdf_scanner.rs

#![no_main]

use libfuzzer_sys::fuzz_target;
use pixfont_bdf::bake_bdf_source;
use pixfont_core::CodepointRange;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let start = u32::from(data[0]);
    let end = start + u32::from(data[1] % 64);
    let Ok(range) = CodepointRange::new(start, end) else {
        return;
    };
    let text = String::from_utf8_lossy(&data[2..]);
    if let Ok(font) = bake_bdf_source(&text, range) {
        assert_eq!(
            font.table().len(),
            font.bytes_per_glyph() as usize * range.len()
        );
    }
});
