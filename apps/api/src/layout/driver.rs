//! Placement driver — one linear pass turning items into placement
//! instructions via the estimate-then-commit protocol.
//!
//! Per item: the estimator decides *whether* to break (cheap, width-blind),
//! the advancer reacts, the item is drawn, and the renderer's exact wrap
//! counts decide *how far* the column cursor actually moves. The two heights
//! are never required to agree; when the exact commit overshoots the page
//! bound the discrepancy is logged and preserved, not corrected. Whether
//! overflow should be re-checked after the exact commit is a known open
//! point — the engine deliberately does not.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layout::advance::{Advance, AdvanceState};
use crate::layout::config::LayoutConfig;
use crate::layout::cursor::ColumnCursors;
use crate::layout::estimate::estimated_item_height;
use crate::layout::LayoutError;
use crate::render::adapter::{CommitResult, PageRenderer, TextStyle};

/// One title+body unit to be placed. Immutable once handed to the engine;
/// identity is `id` and uniqueness is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: u32,
    pub title: String,
    pub body: String,
}

/// Where one item landed: the unit handed to the renderer adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub item_id: u32,
    pub page_index: usize,
    pub column_index: usize,
    /// Left edge of the item's column, mm from the page's left edge.
    pub x: f32,
    /// Top of the item's title block, mm from the page's top edge.
    pub y: f32,
    pub title_text: String,
    pub body_text: String,
    pub title_font_size: f32,
    pub body_font_size: f32,
}

/// Ordered placements (one per input item, input order) plus the total page
/// count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub placements: Vec<Placement>,
    pub page_count: usize,
}

/// Lays out `items` against `config`, driving `renderer` for exact wrapping
/// and drawing. Allocates all pagination state internally and discards it on
/// return; nothing is shared across runs.
///
/// Zero items yield an empty result with zero pages. Out-of-range config
/// fails fast with `LayoutError::Config` before any renderer call.
pub fn run_layout<R: PageRenderer>(
    items: &[ContentItem],
    config: &LayoutConfig,
    renderer: &mut R,
) -> Result<LayoutResult, LayoutError> {
    config.validate()?;
    if items.is_empty() {
        return Ok(LayoutResult {
            placements: Vec::new(),
            page_count: 0,
        });
    }

    let initial_y = config.initial_cursor_y();
    let effective_height = config.effective_page_height();
    let wrap_width = config.wrap_width();
    let mut cursors = ColumnCursors::new(config.column_count as usize, initial_y);
    let mut state = AdvanceState::new();
    let mut placements = Vec::with_capacity(items.len());

    // The first page exists before the first item; only its header is drawn.
    renderer.set_page_header(0)?;

    for item in items {
        let estimated_height = estimated_item_height(&item.title, &item.body, config);
        let advance = state.step(
            estimated_height,
            cursors.get(state.column_index),
            effective_height,
            config.max_items_per_page,
            config.column_count,
        );
        if advance == Advance::NewPage {
            cursors.reset_all(initial_y);
            renderer.add_page()?;
            renderer.set_page_header(state.page_index)?;
        }

        let column_index = state.column_index;
        let x = config.margin + column_index as f32 * config.column_width();
        let y = cursors.get(column_index);

        let title_lines = renderer.wrap_text(&item.title, config.title_font_size, wrap_width)?;
        renderer.draw_text(&title_lines, x, y, config.title_font_size, TextStyle::Title)?;

        let body_y =
            y + title_lines.len() as f32 * config.title_line_mm() + config.title_body_spacing;
        let body_lines = renderer.wrap_text(&item.body, config.body_font_size, wrap_width)?;
        renderer.draw_text(&body_lines, x, body_y, config.body_font_size, TextStyle::Body)?;

        // Commit: the exact counts, not the estimate, move the cursor.
        let commit = CommitResult {
            title_line_count: title_lines.len(),
            body_line_count: body_lines.len(),
        };
        let consumed = commit.title_line_count as f32 * config.title_line_mm()
            + config.title_body_spacing
            + commit.body_line_count as f32 * config.body_line_mm();
        let next_cursor = y + consumed + config.item_spacing;
        if next_cursor > effective_height + config.item_spacing {
            warn!(
                item_id = item.id,
                page = state.page_index,
                column = column_index,
                estimated_mm = estimated_height,
                committed_mm = consumed,
                "exact wrap exceeded the column bound after placement (estimate/commit mismatch)"
            );
        }
        cursors.set(column_index, next_cursor);
        state.record_placement();

        placements.push(Placement {
            item_id: item.id,
            page_index: state.page_index,
            column_index,
            x,
            y,
            title_text: item.title.clone(),
            body_text: item.body.clone(),
            title_font_size: config.title_font_size,
            body_font_size: config.body_font_size,
        });
    }

    Ok(LayoutResult {
        placements,
        page_count: state.page_index + 1,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mock::MockRenderer;
    use std::collections::HashMap;

    fn make_items(texts: &[(&str, &str)]) -> Vec<ContentItem> {
        texts
            .iter()
            .enumerate()
            .map(|(i, (title, body))| ContentItem {
                id: i as u32 + 1,
                title: title.to_string(),
                body: body.to_string(),
            })
            .collect()
    }

    fn short_items(n: usize) -> Vec<ContentItem> {
        (0..n)
            .map(|i| ContentItem {
                id: i as u32 + 1,
                title: format!("Term {i}"),
                body: "short".to_string(),
            })
            .collect()
    }

    fn make_config() -> LayoutConfig {
        LayoutConfig::default()
    }

    // ── coverage and ordering ───────────────────────────────────────────────

    #[test]
    fn test_one_placement_per_item_in_input_order() {
        let items = short_items(7);
        let mut renderer = MockRenderer::new(40);
        let result = run_layout(&items, &make_config(), &mut renderer).unwrap();
        assert_eq!(result.placements.len(), 7);
        let ids: Vec<u32> = result.placements.iter().map(|p| p.item_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7], "input order must survive");
    }

    #[test]
    fn test_empty_input_yields_zero_pages() {
        let mut renderer = MockRenderer::new(40);
        let result = run_layout(&[], &make_config(), &mut renderer).unwrap();
        assert!(result.placements.is_empty());
        assert_eq!(result.page_count, 0);
        assert_eq!(renderer.headers.len(), 0, "no renderer calls for no items");
    }

    #[test]
    fn test_invalid_config_fails_before_rendering() {
        let config = LayoutConfig {
            column_count: 0,
            ..make_config()
        };
        let mut renderer = MockRenderer::new(40);
        let err = run_layout(&short_items(1), &config, &mut renderer).unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));
        assert_eq!(renderer.headers.len(), 0);
    }

    // ── invariants over a mixed workload ────────────────────────────────────

    #[test]
    fn test_pages_monotonic_and_columns_in_bounds() {
        let config = LayoutConfig {
            column_count: 3,
            ..make_config()
        };
        let items = make_items(
            &(0..40)
                .map(|_| ("A term", "some body text that wraps a little bit more"))
                .collect::<Vec<_>>(),
        );
        let mut renderer = MockRenderer::new(40);
        let result = run_layout(&items, &config, &mut renderer).unwrap();

        let mut last_page = 0;
        for p in &result.placements {
            assert!(p.page_index >= last_page, "page_index must not decrease");
            last_page = p.page_index;
            assert!(p.column_index < 3, "column out of bounds: {}", p.column_index);
        }
        assert_eq!(result.page_count, last_page + 1);
    }

    #[test]
    fn test_cursor_monotonic_within_page_column() {
        let items = short_items(30);
        let mut renderer = MockRenderer::new(40);
        let result = run_layout(&items, &make_config(), &mut renderer).unwrap();

        let mut last_y: HashMap<(usize, usize), f32> = HashMap::new();
        for p in &result.placements {
            let key = (p.page_index, p.column_index);
            if let Some(prev) = last_y.get(&key) {
                assert!(
                    p.y > *prev,
                    "y must strictly increase within page {} column {}",
                    p.page_index,
                    p.column_index
                );
            }
            last_y.insert(key, p.y);
        }
    }

    #[test]
    fn test_count_cap_holds_across_columns() {
        let config = LayoutConfig {
            column_count: 3,
            max_items_per_page: 4,
            ..make_config()
        };
        let items = short_items(23);
        let mut renderer = MockRenderer::new(40);
        let result = run_layout(&items, &config, &mut renderer).unwrap();

        let mut per_page: HashMap<usize, usize> = HashMap::new();
        for p in &result.placements {
            *per_page.entry(p.page_index).or_default() += 1;
        }
        for (page, count) in per_page {
            assert!(count <= 4, "page {page} holds {count} items, cap is 4");
        }
    }

    // ── scenario A: count-capped single column ──────────────────────────────

    #[test]
    fn test_scenario_a_five_items_two_per_page() {
        let config = LayoutConfig {
            column_count: 1,
            max_items_per_page: 2,
            ..make_config()
        };
        let items = short_items(5);
        let mut renderer = MockRenderer::new(40);
        let result = run_layout(&items, &config, &mut renderer).unwrap();

        let pages: Vec<usize> = result.placements.iter().map(|p| p.page_index).collect();
        assert_eq!(pages, vec![0, 0, 1, 1, 2]);
        assert_eq!(result.page_count, 3);
        assert_eq!(renderer.pages_added, 2, "two page breaks after the first page");
        assert_eq!(renderer.headers, vec![0, 1, 2], "a header per page, in order");
    }

    // ── scenario B: sequential column fill by height ────────────────────────

    #[test]
    fn test_scenario_b_column_zero_fills_before_column_one() {
        let config = LayoutConfig {
            column_count: 2,
            max_items_per_page: 0,
            ..make_config()
        };
        // Tall bodies: ~15 estimated lines each, so a column holds ~3 items.
        let tall_body = "x".repeat(600);
        let items = make_items(
            &(0..10)
                .map(|_| ("Term", tall_body.as_str()))
                .collect::<Vec<_>>(),
        );
        let mut renderer = MockRenderer::new(40);
        let result = run_layout(&items, &config, &mut renderer).unwrap();

        let first_page: Vec<usize> = result
            .placements
            .iter()
            .filter(|p| p.page_index == 0)
            .map(|p| p.column_index)
            .collect();
        // Column indices on page 0 must be a run of 0s followed by a run of 1s.
        let first_one = first_page.iter().position(|c| *c == 1);
        let split = first_one.expect("column 1 should receive overflow items");
        assert!(split > 0, "column 0 must absorb items first");
        assert!(first_page[..split].iter().all(|c| *c == 0));
        assert!(first_page[split..].iter().all(|c| *c == 1));
        assert!(
            result.page_count > 1,
            "ten tall items should overflow onto a second page"
        );
    }

    #[test]
    fn test_next_column_keeps_existing_cursor() {
        let config = LayoutConfig {
            column_count: 2,
            ..make_config()
        };
        let tall_body = "x".repeat(600);
        let items = make_items(
            &(0..8)
                .map(|_| ("Term", tall_body.as_str()))
                .collect::<Vec<_>>(),
        );
        let mut renderer = MockRenderer::new(40);
        let result = run_layout(&items, &config, &mut renderer).unwrap();

        let first_in_col1 = result
            .placements
            .iter()
            .find(|p| p.page_index == 0 && p.column_index == 1)
            .expect("column 1 used on page 0");
        assert!(
            (first_in_col1.y - config.initial_cursor_y()).abs() < 1e-4,
            "column 1 starts at its untouched initial cursor"
        );
    }

    // ── scenario C: estimate/commit mismatch ────────────────────────────────

    #[test]
    fn test_scenario_c_undercounted_wrap_still_places() {
        let config = LayoutConfig {
            column_count: 1,
            ..make_config()
        };
        // One long unbroken word: the estimator assumes 40 chars/line, the
        // mock renderer wraps at 8, so the true count far exceeds the guess.
        let long_word = "w".repeat(400);
        let items = make_items(&[("Term", long_word.as_str())]);
        let mut renderer = MockRenderer::new(8);
        let result = run_layout(&items, &config, &mut renderer).unwrap();

        assert_eq!(result.placements.len(), 1, "mismatch must not drop the item");
        let p = &result.placements[0];
        assert!(
            (p.y - config.initial_cursor_y()).abs() < 1e-4,
            "placement sits at the pre-overflow cursor position"
        );
        assert_eq!(result.page_count, 1);
    }

    // ── commit advances by exact counts ─────────────────────────────────────

    #[test]
    fn test_cursor_advance_uses_exact_wrap_counts() {
        let config = LayoutConfig {
            column_count: 1,
            ..make_config()
        };
        // 2 items; the 8-char words wrap to exactly 3 lines at 10 chars/line.
        let items = make_items(&[("T", "aaaaaaaa bbbbbbbb cccccccc"), ("U", "short")]);
        let mut renderer = MockRenderer::new(10);
        let result = run_layout(&items, &config, &mut renderer).unwrap();

        let consumed = config.title_line_mm() // 1 title line
            + config.title_body_spacing
            + 3.0 * config.body_line_mm()
            + config.item_spacing;
        let expected_y = result.placements[0].y + consumed;
        assert!(
            (result.placements[1].y - expected_y).abs() < 1e-4,
            "second item must start exactly where the exact commit left off: {} vs {}",
            result.placements[1].y,
            expected_y
        );
    }

    // ── renderer failures propagate ─────────────────────────────────────────

    #[test]
    fn test_wrap_failure_propagates_as_render_error() {
        let mut renderer = MockRenderer::new(40);
        renderer.wrap_failure = Some("bad glyph run".to_string());
        let err = run_layout(&short_items(1), &make_config(), &mut renderer).unwrap_err();
        assert!(matches!(err, LayoutError::Render(_)));
    }

    // ── idempotence ─────────────────────────────────────────────────────────

    #[test]
    fn test_identical_runs_produce_identical_results() {
        let items = short_items(12);
        let config = LayoutConfig {
            column_count: 2,
            max_items_per_page: 5,
            ..make_config()
        };
        let mut r1 = MockRenderer::new(40);
        let mut r2 = MockRenderer::new(40);
        let a = run_layout(&items, &config, &mut r1).unwrap();
        let b = run_layout(&items, &config, &mut r2).unwrap();
        assert_eq!(a, b, "no hidden randomness or time dependence");
    }
}
