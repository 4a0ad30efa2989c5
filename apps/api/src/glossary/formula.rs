//! Plain-text formula substitution — a pure string utility for the
//! clipboard/prompt path.
//!
//! Replaces ASCII spellings of common formula notation with their Unicode
//! forms: reaction arrows, comparison operators, and `_`/`^` digit markers
//! as sub/superscripts. Never applied inside the layout engine or the PDF
//! path (the base-14 fonts cannot encode these glyphs).

/// Multi-character sequences, longest first so `<=>` wins over `<=`.
const SEQUENCES: [(&str, &str); 8] = [
    ("<=>", "⇌"),
    ("<->", "↔"),
    ("->", "→"),
    ("<-", "←"),
    ("<=", "≤"),
    (">=", "≥"),
    ("!=", "≠"),
    ("+-", "±"),
];

const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Substitutes formula notation in `text`. Pure and deterministic; text
/// without markers passes through unchanged.
pub fn substitute_formula_text(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    'outer: while i < chars.len() {
        for (pattern, replacement) in SEQUENCES {
            if matches_at(&chars, i, pattern) {
                out.push_str(replacement);
                i += pattern.chars().count();
                continue 'outer;
            }
        }
        if chars[i] == '_' && i + 1 < chars.len() {
            if let Some(d) = chars[i + 1].to_digit(10) {
                out.push(SUBSCRIPTS[d as usize]);
                i += 2;
                continue;
            }
        }
        if chars[i] == '^' && i + 1 < chars.len() {
            let next = chars[i + 1];
            if let Some(d) = next.to_digit(10) {
                out.push(SUPERSCRIPTS[d as usize]);
                i += 2;
                continue;
            }
            if next == '+' || next == '-' {
                out.push(if next == '+' { '⁺' } else { '⁻' });
                i += 2;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn matches_at(chars: &[char], start: usize, pattern: &str) -> bool {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    chars.len() >= start + pattern_chars.len()
        && chars[start..start + pattern_chars.len()] == pattern_chars[..]
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
