// this_file: crates/pixfont-export/src/lib.rs

//! Emitters for baked pixel fonts.

pub mod c_source;
pub mod preview;
pub mod raw;

pub use c_source::{c_source, CSourceOptions};
pub use preview::{preview_png, PreviewOptions};
pub use raw::write_raw;
