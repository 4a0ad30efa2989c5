// Renderer adapter: the contract the layout engine drives, its PDF-backed
// implementation, and the glyph metrics behind exact wrapping.

pub mod adapter;
pub mod font_metrics;
#[cfg(test)]
pub mod mock;
pub mod pdf;

pub use adapter::{CommitResult, PageRenderer, RenderError, TextStyle};
pub use pdf::PdfRenderer;
