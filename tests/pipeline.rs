// this_file: tests/pipeline.rs

//! End-to-end bakes through files on disk.

use camino::Utf8PathBuf;
use pixfont::{
    bake_bdf_font, bake_outline_font, process_job, process_jobs, BakeJob, JobSpec, OutputFormat,
    PixfontError,
};
use std::path::Path;
use tempfile::TempDir;

const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

const TWO_ROW_BDF: &str = "STARTFONT 2.1
FONT -misc-test
SIZE 8 75 75
FONTBOUNDINGBOX 8 2 0 0
CHARS 1
STARTCHAR A
ENCODING 65
BITMAP
81
7E
ENDCHAR
ENDFONT
";

fn write_bdf(dir: &TempDir) -> Utf8PathBuf {
    let path = dir.path().join("tiny.bdf");
    std::fs::write(&path, TWO_ROW_BDF).unwrap();
    Utf8PathBuf::from_path_buf(path).unwrap()
}

fn utf8(dir: &TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap()
}

#[test]
fn bdf_file_with_missing_glyph_keeps_placeholder() {
    let dir = TempDir::new().unwrap();
    let path = write_bdf(&dir);

    let font = bake_bdf_font(&path, 65, 66).unwrap();
    assert_eq!((font.char_px_width(), font.char_px_height()), (8, 2));
    assert_eq!(font.table(), &[0x81, 0x7E, 0xAA, 0x55]);
}

#[test]
fn missing_file_is_reported() {
    let err = bake_bdf_font("/nonexistent/dir/font.bdf", 65, 65).unwrap_err();
    assert!(matches!(err, PixfontError::FontFileCouldNotBeOpened { .. }));
}

#[test]
fn batch_jobs_write_every_format() {
    let dir = TempDir::new().unwrap();
    let source = write_bdf(&dir);
    let spec = serde_json::json!({
        "version": "1.0",
        "jobs": [
            {
                "id": "bin",
                "source": {"kind": "bdf", "path": source},
                "range": {"start": 65, "end": 65},
                "output": {"path": utf8(&dir, "a.bin"), "format": "bin"}
            },
            {
                "id": "c",
                "source": {"kind": "bdf", "path": source},
                "range": {"start": 65, "end": 65},
                "output": {"path": utf8(&dir, "a.c"), "format": "c", "name": "Tiny"}
            },
            {
                "id": "png",
                "source": {"kind": "bdf", "path": source},
                "range": {"start": 65, "end": 66},
                "output": {"path": utf8(&dir, "a.png"), "format": "png"}
            },
            {
                "id": "broken",
                "source": {"kind": "bdf", "path": utf8(&dir, "absent.bdf")},
                "range": {"start": 65, "end": 65},
                "output": {"path": utf8(&dir, "never.bin"), "format": "bin"}
            }
        ]
    });
    let spec: JobSpec = serde_json::from_value(spec).unwrap();
    spec.validate().unwrap();

    let results = process_jobs(&spec.jobs, 2).unwrap();
    let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["bin", "c", "png", "broken"]);
    assert!(results[..3].iter().all(|r| r.status == "success"));
    assert_eq!(results[3].status, "error");

    assert_eq!(std::fs::read(dir.path().join("a.bin")).unwrap(), [0x81, 0x7E]);
    let c = std::fs::read_to_string(dir.path().join("a.c")).unwrap();
    assert!(c.contains("Tiny_Table"));
    assert!(c.contains("0x81"));
    let png = std::fs::read(dir.path().join("a.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    assert!(!dir.path().join("never.bin").exists());

    let summary = results[2].font.unwrap();
    assert_eq!(summary.glyphs, 2);
    assert_eq!(summary.table_bytes, 4);
}

#[test]
fn job_result_serializes_as_json_line() {
    let dir = TempDir::new().unwrap();
    let source = write_bdf(&dir);
    let job: BakeJob = serde_json::from_value(serde_json::json!({
        "id": "line",
        "source": {"kind": "bdf", "path": source},
        "range": {"start": 65, "end": 65},
        "output": {"path": utf8(&dir, "line.bin"), "format": "bin"}
    }))
    .unwrap();
    assert_eq!(job.output.format, OutputFormat::Bin);

    let line = serde_json::to_string(&process_job(&job)).unwrap();
    assert!(!line.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["status"], "success");
    assert_eq!(value["backend"], "bdf");
    assert_eq!(value["font"]["bytes_per_glyph"], 2);
    assert!(value.get("error").is_none());
}

#[test]
fn outline_system_font_fills_ascii() {
    if !Path::new(SYSTEM_FONT).exists() {
        eprintln!("skipping: {SYSTEM_FONT} not installed");
        return;
    }

    let font = bake_outline_font(SYSTEM_FONT, 16, 0x20, 0x7E, 128, 1).unwrap();
    assert_eq!(font.char_px_height(), 16);
    assert_eq!(font.glyph_count(), 95);

    let space = font.glyph(0x20).unwrap();
    assert!(space.iter().all(|&b| b == 0));
    let letter = font.glyph(u32::from('H')).unwrap();
    assert!(letter.iter().any(|&b| b != 0));

    let smoother = bake_outline_font(SYSTEM_FONT, 16, 0x41, 0x41, 128, 4).unwrap();
    assert_eq!(smoother.char_px_width(), font.char_px_width());
}

#[test]
fn outline_rejects_bad_parameters_before_reading() {
    let err = bake_outline_font("/nonexistent.ttf", 16, 0x41, 0x41, 128, 0).unwrap_err();
    assert!(matches!(err, PixfontError::InvalidParameter { .. }));
    let err = bake_outline_font("/nonexistent.ttf", 16, 0x42, 0x41, 128, 1).unwrap_err();
    assert!(matches!(err, PixfontError::InvalidRange { .. }));
}
