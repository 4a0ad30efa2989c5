//! Line estimator — the cheap predictor behind every break decision.
//!
//! The estimate is a character-count heuristic, deliberately independent of
//! the rendered column width: `ceil(chars / chars_per_line)` plus one line
//! per explicit line break. It exists only to decide *whether* the next item
//! overflows the current column before paying for exact wrapping. The
//! renderer's exact wrap count (which moves the cursor afterwards) is
//! allowed to disagree; see `driver.rs` for how the mismatch is handled.

use crate::layout::config::{LayoutConfig, MM_PER_PT};

/// Default characters-per-line assumption of the heuristic.
pub const DEFAULT_CHARS_PER_LINE: usize = 40;

/// Estimates how many printed lines `text` occupies.
///
/// `ceil(char_count / chars_per_line) + explicit_newline_count`. Empty text
/// estimates to zero lines. Pure and deterministic.
pub fn estimate_lines(text: &str, chars_per_line: usize) -> usize {
    let chars_per_line = chars_per_line.max(1);
    let char_count = text.chars().filter(|c| *c != '\n').count();
    let breaks = text.matches('\n').count();
    char_count.div_ceil(chars_per_line) + breaks
}

/// Estimated vertical footprint of one item in mm: estimated title and body
/// line counts scaled by their line heights, plus the title/body gap and the
/// trailing item gap.
pub fn estimated_item_height(title: &str, body: &str, config: &LayoutConfig) -> f32 {
    let title_lines = estimate_lines(title, DEFAULT_CHARS_PER_LINE) as f32;
    let body_lines = estimate_lines(body, DEFAULT_CHARS_PER_LINE) as f32;
    title_lines * config.title_line_mm()
        + config.title_body_spacing
        + body_lines * config.body_line_mm()
        + config.item_spacing
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_estimates_zero_lines() {
        assert_eq!(estimate_lines("", 40), 0);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(estimate_lines("osmosis", 40), 1);
    }

    #[test]
    fn test_exact_multiple_has_no_partial_line() {
        let text = "a".repeat(80);
        assert_eq!(estimate_lines(&text, 40), 2);
    }

    #[test]
    fn test_one_char_over_rounds_up() {
        let text = "a".repeat(81);
        assert_eq!(estimate_lines(&text, 40), 3);
    }

    #[test]
    fn test_explicit_breaks_add_lines() {
        // 10 visible chars on 3 physical lines: ceil(10/40)=1, plus 2 breaks.
        assert_eq!(estimate_lines("abc\ndefg\nhij", 40), 3);
    }

    #[test]
    fn test_zero_chars_per_line_treated_as_one() {
        assert_eq!(estimate_lines("ab", 0), 2);
    }

    #[test]
    fn test_estimate_is_multibyte_safe() {
        // 4 chars, not 8 bytes
        assert_eq!(estimate_lines("αβγδ", 40), 1);
    }

    #[test]
    fn test_item_height_sums_title_body_and_gaps() {
        let config = LayoutConfig::default();
        let h = estimated_item_height("Osmosis", "Movement of solvent molecules.", &config);
        let expected = config.title_line_mm()
            + config.title_body_spacing
            + config.body_line_mm()
            + config.item_spacing;
        assert!(
            (h - expected).abs() < 1e-4,
            "one title line + one body line expected, got {h} vs {expected}"
        );
    }

    #[test]
    fn test_item_height_grows_with_body_length() {
        let config = LayoutConfig::default();
        let short = estimated_item_height("Term", "short", &config);
        let long = estimated_item_height("Term", &"word ".repeat(40), &config);
        assert!(long > short);
    }

    #[test]
    fn test_mm_per_pt_constant_sane() {
        // 72pt = 1in = 25.4mm
        assert!((72.0 * MM_PER_PT - 25.4).abs() < 0.01);
    }
}
