//! Renderer adapter contract — the seam between the layout engine and the
//! document backend.
//!
//! The engine treats the renderer as a synchronous, order-sensitive
//! collaborator: it asks for exact text wrapping (authoritative line counts),
//! issues draw calls, and requests page breaks and headers. One renderer
//! instance serves exactly one layout run; the engine is its sole caller and
//! serializes every call by construction. Reentrant use of one instance by
//! two runs is unsupported.

use thiserror::Error;

/// Failure inside the renderer backend. The engine never retries — text
/// problems are not recoverable at the layout level.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("text wrapping failed: {0}")]
    Wrap(String),
    #[error("draw failed: {0}")]
    Draw(String),
    #[error("document assembly failed: {0}")]
    Assembly(String),
}

/// Visual role of a text block. The backend picks face and weight from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Term title — bold.
    Title,
    /// Definition body — regular.
    Body,
}

/// Exact line counts measured by the renderer for one placed item. The
/// driver derives this from the wrapped line sequences and uses it — not the
/// estimate — to advance the column cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitResult {
    pub title_line_count: usize,
    pub body_line_count: usize,
}

/// The external renderer consumed by the placement driver.
pub trait PageRenderer {
    /// Exact, authoritative wrap of `text` at `font_size` into lines no
    /// wider than `available_width` mm.
    fn wrap_text(
        &mut self,
        text: &str,
        font_size: f32,
        available_width: f32,
    ) -> Result<Vec<String>, RenderError>;

    /// Draws pre-wrapped lines at `(x, y)` mm from the page's top-left
    /// corner, flowing downward one line height at a time.
    fn draw_text(
        &mut self,
        lines: &[String],
        x: f32,
        y: f32,
        font_size: f32,
        style: TextStyle,
    ) -> Result<(), RenderError>;

    /// Opens a fresh page; subsequent draw calls land on it.
    fn add_page(&mut self) -> Result<(), RenderError>;

    /// Draws the running header for `page_index` on the current page.
    fn set_page_header(&mut self, page_index: usize) -> Result<(), RenderError>;
}
