//! Column cursor table — per-column vertical offsets for the current page.
//!
//! Owned exclusively by one layout run; no other component reads or writes
//! cursor state directly. All cursors reset together on a page break.

/// Vertical cursor position for each column of the current page, in mm from
/// the top edge.
#[derive(Debug, Clone)]
pub struct ColumnCursors {
    cursors: Vec<f32>,
}

impl ColumnCursors {
    /// One cursor per column, all starting at `initial_y`.
    pub fn new(column_count: usize, initial_y: f32) -> Self {
        ColumnCursors {
            cursors: vec![initial_y; column_count],
        }
    }

    /// Current cursor of `column_index`. The index is always in range:
    /// the advancer never emits a column outside `[0, column_count)`.
    pub fn get(&self, column_index: usize) -> f32 {
        self.cursors[column_index]
    }

    pub fn set(&mut self, column_index: usize, cursor_y: f32) {
        self.cursors[column_index] = cursor_y;
    }

    /// Page break: every column returns to `initial_y`.
    pub fn reset_all(&mut self, initial_y: f32) {
        for cursor in &mut self.cursors {
            *cursor = initial_y;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_all_columns_at_initial_y() {
        let cursors = ColumnCursors::new(3, 25.0);
        for col in 0..3 {
            assert!((cursors.get(col) - 25.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_set_moves_only_that_column() {
        let mut cursors = ColumnCursors::new(2, 25.0);
        cursors.set(1, 80.0);
        assert!((cursors.get(0) - 25.0).abs() < 1e-6);
        assert!((cursors.get(1) - 80.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_all_returns_every_column() {
        let mut cursors = ColumnCursors::new(3, 25.0);
        cursors.set(0, 100.0);
        cursors.set(2, 200.0);
        cursors.reset_all(25.0);
        for col in 0..3 {
            assert!((cursors.get(col) - 25.0).abs() < 1e-6);
        }
    }
}
