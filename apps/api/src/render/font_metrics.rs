//! Static glyph-width tables for the two base-14 faces the PDF backend uses.
//!
//! Widths are in em units (relative to font size), covering ASCII
//! 0x20..=0x7E with an average-width fallback for everything else. Index =
//! `(char as usize) - 32`. These tables drive the *exact* greedy word-wrap
//! that the layout engine commits cursor advances against — exact relative
//! to what the backend draws, since the same tables position the glyphs.

use crate::layout::config::MM_PER_PT;

/// The two faces embedded in every generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

/// Character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
pub struct GlyphWidths {
    pub face: FontFace,
    widths: [f32; 95],
    /// Fallback for non-ASCII codepoints.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl GlyphWidths {
    /// Rendered width of `s` in em units. Non-ASCII characters fall back to
    /// `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Rendered width of `s` in mm at `font_size` points.
    pub fn measure_mm(&self, s: &str, font_size: f32) -> f32 {
        self.measure_str(s) * font_size * MM_PER_PT
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_mm`.
    ///
    /// Explicit line breaks are honored. Words are kept intact unless a
    /// single word alone exceeds the available width, in which case it is
    /// split at character granularity — the forced wrap the original
    /// renderer applies to unbroken runs. Empty text wraps to no lines.
    pub fn wrap_to_width(&self, text: &str, font_size: f32, max_width_mm: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            self.wrap_paragraph(paragraph, font_size, max_width_mm, &mut lines);
        }
        // A trailing/lone newline still counts as a printed (blank) line,
        // but fully empty input does not.
        if text.is_empty() {
            lines.clear();
        }
        lines
    }

    fn wrap_paragraph(
        &self,
        paragraph: &str,
        font_size: f32,
        max_width_mm: f32,
        lines: &mut Vec<String>,
    ) {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            return;
        }

        let space_mm = self.space_width * font_size * MM_PER_PT;
        let mut current = String::new();
        let mut current_mm = 0.0_f32;

        for word in words {
            let word_mm = self.measure_mm(word, font_size);
            if word_mm > max_width_mm {
                // Overlong unbroken run: flush, then split by characters.
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_mm = 0.0;
                }
                let (head_lines, tail, tail_mm) =
                    self.split_long_word(word, font_size, max_width_mm);
                lines.extend(head_lines);
                current = tail;
                current_mm = tail_mm;
                continue;
            }
            let gap = if current.is_empty() { 0.0 } else { space_mm };
            if !current.is_empty() && current_mm + gap + word_mm > max_width_mm {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_mm = word_mm;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_mm += gap + word_mm;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    /// Splits a word wider than the line at character granularity. Returns
    /// the full lines plus the remaining partial line and its width.
    fn split_long_word(
        &self,
        word: &str,
        font_size: f32,
        max_width_mm: f32,
    ) -> (Vec<String>, String, f32) {
        let mut full = Vec::new();
        let mut current = String::new();
        let mut current_mm = 0.0_f32;
        for c in word.chars() {
            let char_mm = self.measure_mm(&c.to_string(), font_size);
            if !current.is_empty() && current_mm + char_mm > max_width_mm {
                full.push(std::mem::take(&mut current));
                current_mm = 0.0;
            }
            current.push(c);
            current_mm += char_mm;
        }
        (full, current, current_mm)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables (standard AFM metrics, 95 printable ASCII chars each)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
static HELVETICA: GlyphWidths = GlyphWidths {
    face: FontFace::Helvetica,
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.513,
    space_width: 0.278,
};

#[rustfmt::skip]
static HELVETICA_BOLD: GlyphWidths = GlyphWidths {
    face: FontFace::HelveticaBold,
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.536,
    space_width: 0.278,
};

/// Returns the static width table for a face.
pub fn glyph_widths(face: FontFace) -> &'static GlyphWidths {
    match face {
        FontFace::Helvetica => &HELVETICA,
        FontFace::HelveticaBold => &HELVETICA_BOLD,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
