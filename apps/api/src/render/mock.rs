//! Deterministic mock renderer for layout tests.
//!
//! Wraps at a fixed character count per line regardless of font size or
//! width, so tests can steer the exact wrap count independently of the
//! estimator's 40-chars-per-line heuristic and observe the estimate/commit
//! mismatch on demand.

use crate::render::adapter::{PageRenderer, RenderError, TextStyle};

/// One recorded `draw_text` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub line_count: usize,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub style: TextStyle,
}

pub struct MockRenderer {
    /// Fixed wrap width in characters.
    pub wrap_chars: usize,
    /// When set, every `wrap_text` call fails with this message.
    pub wrap_failure: Option<String>,
    /// Number of `add_page` calls (the first page is implicit).
    pub pages_added: usize,
    /// Page indices passed to `set_page_header`, in call order.
    pub headers: Vec<usize>,
    pub draw_calls: Vec<DrawCall>,
}

impl MockRenderer {
    pub fn new(wrap_chars: usize) -> Self {
        MockRenderer {
            wrap_chars: wrap_chars.max(1),
            wrap_failure: None,
            pages_added: 0,
            headers: Vec::new(),
            draw_calls: Vec::new(),
        }
    }
}

impl PageRenderer for MockRenderer {
    fn wrap_text(
        &mut self,
        text: &str,
        _font_size: f32,
        _available_width: f32,
    ) -> Result<Vec<String>, RenderError> {
        if let Some(msg) = &self.wrap_failure {
            return Err(RenderError::Wrap(msg.clone()));
        }
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            if paragraph.is_empty() {
                lines.push(String::new());
                continue;
            }
            let chars: Vec<char> = paragraph.chars().collect();
            for chunk in chars.chunks(self.wrap_chars) {
                lines.push(chunk.iter().collect());
            }
        }
        Ok(lines)
    }

    fn draw_text(
        &mut self,
        lines: &[String],
        x: f32,
        y: f32,
        font_size: f32,
        style: TextStyle,
    ) -> Result<(), RenderError> {
        self.draw_calls.push(DrawCall {
            line_count: lines.len(),
            x,
            y,
            font_size,
            style,
        });
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), RenderError> {
        self.pages_added += 1;
        Ok(())
    }

    fn set_page_header(&mut self, page_index: usize) -> Result<(), RenderError> {
        self.headers.push(page_index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_wraps_by_character_count() {
        let mut mock = MockRenderer::new(4);
        let lines = mock.wrap_text("abcdefghij", 10.0, 80.0).unwrap();
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_mock_empty_text_no_lines() {
        let mut mock = MockRenderer::new(4);
        assert!(mock.wrap_text("", 10.0, 80.0).unwrap().is_empty());
    }

    #[test]
    fn test_mock_failure_mode() {
        let mut mock = MockRenderer::new(4);
        mock.wrap_failure = Some("boom".to_string());
        assert!(mock.wrap_text("x", 10.0, 80.0).is_err());
    }
}
