//! Page/column advancer — the state machine that decides, once per item,
//! whether the item stays in the current column, moves to the next column,
//! or opens a new page.
//!
//! # Fill order
//! Columns fill sequentially: column 0 absorbs items until it overflows by
//! height, then column 1 begins at its own existing cursor, and so on. This
//! is NOT row-major distribution, and it is intentional — do not "fix" it.
//!
//! # Count vs. height overflow
//! `items_on_page` counts items per *page*, not per column, so a count
//! overflow can never be cured by advancing to the next column; it forces a
//! page break directly. Only a height overflow tries the next column first.
//! This keeps the per-page item cap exact for every column count.

/// Advancement decision for the item about to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Neither predicate fired: place in the current column.
    Stay,
    /// Height overflow with columns to spare: place at the next column's
    /// existing cursor.
    NextColumn,
    /// Page break: all cursors reset, per-page counter cleared, page header
    /// redrawn before the item.
    NewPage,
}

/// Mutable state of one layout run's pagination, threaded through the
/// per-item step. Initial state is `{0, 0, 0}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceState {
    pub column_index: usize,
    pub items_on_page: u32,
    pub page_index: usize,
}

impl AdvanceState {
    pub fn new() -> Self {
        AdvanceState {
            column_index: 0,
            items_on_page: 0,
            page_index: 0,
        }
    }

    /// Evaluates the transition policy for the next item. Called exactly
    /// once per item, before placement; the decision is not re-evaluated
    /// against the destination column.
    pub fn step(
        &mut self,
        estimated_height: f32,
        cursor_y: f32,
        effective_page_height: f32,
        max_items_per_page: u32,
        column_count: u8,
    ) -> Advance {
        let count_overflow = max_items_per_page > 0 && self.items_on_page >= max_items_per_page;
        let height_overflow = cursor_y + estimated_height > effective_page_height;

        if count_overflow {
            self.start_new_page();
            return Advance::NewPage;
        }
        if !height_overflow {
            return Advance::Stay;
        }
        if self.column_index + 1 < column_count as usize {
            self.column_index += 1;
            Advance::NextColumn
        } else {
            self.start_new_page();
            Advance::NewPage
        }
    }

    /// Records that an item landed on the current page.
    pub fn record_placement(&mut self) {
        self.items_on_page += 1;
    }

    fn start_new_page(&mut self) {
        self.page_index += 1;
        self.column_index = 0;
        self.items_on_page = 0;
    }
}

impl Default for AdvanceState {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_H: f32 = 282.0; // 297mm page, 15mm bottom margin

    #[test]
    fn test_initial_state_is_zeroed() {
        let state = AdvanceState::new();
        assert_eq!(state.column_index, 0);
        assert_eq!(state.items_on_page, 0);
        assert_eq!(state.page_index, 0);
    }

    #[test]
    fn test_no_overflow_stays() {
        let mut state = AdvanceState::new();
        let advance = state.step(20.0, 25.0, PAGE_H, 0, 2);
        assert_eq!(advance, Advance::Stay);
        assert_eq!(state.column_index, 0);
        assert_eq!(state.page_index, 0);
    }

    #[test]
    fn test_height_overflow_moves_to_next_column() {
        let mut state = AdvanceState::new();
        let advance = state.step(50.0, 260.0, PAGE_H, 0, 2);
        assert_eq!(advance, Advance::NextColumn);
        assert_eq!(state.column_index, 1);
        assert_eq!(state.page_index, 0, "column advance is not a page break");
    }

    #[test]
    fn test_height_overflow_in_last_column_breaks_page() {
        let mut state = AdvanceState::new();
        state.column_index = 1;
        state.items_on_page = 7;
        let advance = state.step(50.0, 260.0, PAGE_H, 0, 2);
        assert_eq!(advance, Advance::NewPage);
        assert_eq!(state.page_index, 1);
        assert_eq!(state.column_index, 0);
        assert_eq!(state.items_on_page, 0);
    }

    #[test]
    fn test_single_column_height_overflow_breaks_page() {
        let mut state = AdvanceState::new();
        let advance = state.step(50.0, 260.0, PAGE_H, 0, 1);
        assert_eq!(advance, Advance::NewPage);
    }

    #[test]
    fn test_count_overflow_breaks_page_even_with_columns_left() {
        let mut state = AdvanceState::new();
        state.items_on_page = 2;
        // Column 0 of 3, plenty of height left — the cap still forces a page.
        let advance = state.step(10.0, 25.0, PAGE_H, 2, 3);
        assert_eq!(advance, Advance::NewPage);
        assert_eq!(state.items_on_page, 0);
    }

    #[test]
    fn test_count_cap_zero_means_unlimited() {
        let mut state = AdvanceState::new();
        state.items_on_page = 500;
        let advance = state.step(10.0, 25.0, PAGE_H, 0, 1);
        assert_eq!(advance, Advance::Stay);
    }

    #[test]
    fn test_exact_fit_does_not_overflow() {
        let mut state = AdvanceState::new();
        // cursor + height == page height exactly: strict `>` means it fits
        let advance = state.step(32.0, 250.0, PAGE_H, 0, 1);
        assert_eq!(advance, Advance::Stay);
    }

    #[test]
    fn test_sequential_fill_stays_in_second_column() {
        let mut state = AdvanceState::new();
        assert_eq!(state.step(50.0, 260.0, PAGE_H, 0, 2), Advance::NextColumn);
        state.record_placement();
        // Next item is evaluated against column 1's cursor and stays there.
        assert_eq!(state.step(50.0, 80.0, PAGE_H, 0, 2), Advance::Stay);
        assert_eq!(state.column_index, 1);
    }

    #[test]
    fn test_record_placement_counts_per_page() {
        let mut state = AdvanceState::new();
        state.record_placement();
        state.record_placement();
        assert_eq!(state.items_on_page, 2);
        state.column_index = 1; // column moves do not reset the counter
        state.record_placement();
        assert_eq!(state.items_on_page, 3);
    }
}
