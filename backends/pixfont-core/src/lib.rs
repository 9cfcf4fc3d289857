// this_file: backends/pixfont-core/src/lib.rs

//! Core traits and types for the pixfont glyph baking pipeline.

pub mod diagnostics;
pub mod error;
pub mod traits;
pub mod types;
pub mod utils;
pub mod writer;

pub use diagnostics::BakeDiagnostics;
pub use error::PixfontError;
pub use traits::{Baker, Coverage, CoverageRasterizer, LineMetrics};
pub use types::{CodepointRange, FontDescriptor, PixelFont, MAX_CODEPOINT};
pub use writer::BitWriter;

/// Result type for pixfont operations
pub type Result<T> = std::result::Result<T, PixfontError>;
