//! Layout configuration — the full parameter surface of a single layout run.
//!
//! All horizontal/vertical distances are millimeters; font sizes are points.
//! A config is supplied once per run and never mutated. `validate` is the
//! fail-fast check the engine applies before doing any work; `sanitized` is
//! the caller-side clamp applied at the API boundary before a config ever
//! reaches the engine.

use serde::{Deserialize, Serialize};

use crate::layout::LayoutError;

/// Millimeters per PostScript point (1 pt = 1/72 inch).
pub const MM_PER_PT: f32 = 0.352_778;

/// Vertical clearance between the page header line and the first item row.
pub const PAGE_HEADER_CLEARANCE_MM: f32 = 4.0;

/// Inner gutter subtracted from the column width before text wrapping,
/// keeping adjacent columns visually separated.
pub const COLUMN_GUTTER_MM: f32 = 4.0;

/// Layout parameters for one paginated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Term title font size in points.
    pub title_font_size: f32,
    /// Definition body font size in points.
    pub body_font_size: f32,
    /// Line height multiplier applied to both font sizes.
    pub line_height: f32,
    /// Maximum items per page across all columns. 0 = unlimited.
    pub max_items_per_page: u32,
    /// Number of columns, valid range [1, 3].
    pub column_count: u8,
    /// Vertical gap between consecutive items in a column (mm).
    pub item_spacing: f32,
    /// Vertical gap between an item's title block and its body block (mm).
    pub title_body_spacing: f32,
    /// Page width in mm.
    pub page_width: f32,
    /// Page height in mm.
    pub page_height: f32,
    /// Uniform page margin in mm.
    pub margin: f32,
}

impl Default for LayoutConfig {
    /// A4 portrait, two columns, 12pt titles over 10pt bodies.
    fn default() -> Self {
        LayoutConfig {
            title_font_size: 12.0,
            body_font_size: 10.0,
            line_height: 1.2,
            max_items_per_page: 0,
            column_count: 2,
            item_spacing: 4.0,
            title_body_spacing: 1.5,
            page_width: 210.0,
            page_height: 297.0,
            margin: 15.0,
        }
    }
}

impl LayoutConfig {
    /// Fails fast on out-of-range values instead of producing a silently
    /// wrong layout. The engine calls this before every run.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.column_count < 1 || self.column_count > 3 {
            return Err(LayoutError::Config(format!(
                "column_count must be in [1, 3], got {}",
                self.column_count
            )));
        }
        if self.title_font_size <= 0.0 || self.body_font_size <= 0.0 {
            return Err(LayoutError::Config(format!(
                "font sizes must be positive, got title={} body={}",
                self.title_font_size, self.body_font_size
            )));
        }
        if self.line_height <= 0.0 {
            return Err(LayoutError::Config(format!(
                "line_height must be positive, got {}",
                self.line_height
            )));
        }
        if self.item_spacing < 0.0 || self.title_body_spacing < 0.0 {
            return Err(LayoutError::Config(
                "spacing values must be non-negative".to_string(),
            ));
        }
        if self.page_width <= 2.0 * self.margin || self.page_height <= 2.0 * self.margin {
            return Err(LayoutError::Config(format!(
                "page {}x{}mm leaves no room inside a {}mm margin",
                self.page_width, self.page_height, self.margin
            )));
        }
        Ok(())
    }

    /// Caller-side clamp applied before the config reaches the engine:
    /// `column_count` into [1, 3], `item_spacing` up to at least 1mm.
    /// `max_items_per_page` is left alone; 0 stays the unlimited sentinel.
    pub fn sanitized(&self) -> Self {
        LayoutConfig {
            column_count: self.column_count.clamp(1, 3),
            item_spacing: self.item_spacing.max(1.0),
            ..self.clone()
        }
    }

    /// One printed title line in mm.
    pub fn title_line_mm(&self) -> f32 {
        self.title_font_size * MM_PER_PT * self.line_height
    }

    /// One printed body line in mm.
    pub fn body_line_mm(&self) -> f32 {
        self.body_font_size * MM_PER_PT * self.line_height
    }

    /// Usable horizontal span between the margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Width of a single column.
    pub fn column_width(&self) -> f32 {
        self.content_width() / self.column_count as f32
    }

    /// Width available to wrapped text inside a column.
    pub fn wrap_width(&self) -> f32 {
        self.column_width() - COLUMN_GUTTER_MM
    }

    /// Lowest y a placed item may extend to (bottom margin line).
    pub fn effective_page_height(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Cursor position every column starts at on a fresh page: below the
    /// margin, the page header line, and its clearance gap.
    pub fn initial_cursor_y(&self) -> f32 {
        self.margin + self.title_line_mm() + PAGE_HEADER_CLEARANCE_MM
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
