// Pagination and multi-column layout engine.
// One linear pass per run: items → placement driver → (estimator, advancer,
// cursor table) → placement instructions → renderer adapter. Stateless
// between runs; CPU-bound, so API handlers call it inside spawn_blocking.

pub mod advance;
pub mod config;
pub mod cursor;
pub mod driver;
pub mod estimate;

use thiserror::Error;

use crate::render::adapter::RenderError;

/// Failure of a layout run.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Out-of-range configuration reached the engine.
    #[error("invalid layout config: {0}")]
    Config(String),
    /// The renderer backend failed; not recoverable at the layout level.
    #[error(transparent)]
    Render(#[from] RenderError),
}

// Re-export the public API consumed by handlers and the document pipeline.
pub use config::LayoutConfig;
pub use driver::{run_layout, ContentItem, LayoutResult, Placement};
