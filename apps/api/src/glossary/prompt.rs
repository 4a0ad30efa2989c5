//! Clipboard prompt generation — builds the LLM prompt a user pastes into
//! their assistant of choice to obtain definitions for bare terms. The
//! response JSON feeds straight back into `ingest::parse_json_items`.

use crate::glossary::formula::substitute_formula_text;

pub const DEFINITION_PROMPT_TEMPLATE: &str = r#"Write a concise glossary definition (1-3 sentences, plain text, no markdown) for each of the {count} terms below.

Terms:
{term_list}

Respond with ONLY a JSON array, one object per term, in the same order:
[{"name": "<term>", "definition": "<definition>"}]"#;

/// Builds the definition prompt for `names`. Formula notation in the terms
/// is substituted to its plain-text Unicode form so the pasted prompt reads
/// naturally.
pub fn build_definition_prompt(names: &[String]) -> String {
    let term_list = names
        .iter()
        .map(|name| format!("- {}", substitute_formula_text(name)))
        .collect::<Vec<_>>()
        .join("\n");
    DEFINITION_PROMPT_TEMPLATE
        .replace("{count}", &names.len().to_string())
        .replace("{term_list}", &term_list)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
