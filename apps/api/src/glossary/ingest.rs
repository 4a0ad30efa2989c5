//! Glossary ingestion — turns pasted JSON or plain text lines into selected
//! items, rejecting empty input before the layout engine is ever involved.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::glossary::models::{select_items, GlossaryItem, RawItem};

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// JSON array of raw items, as exported by the UI or an LLM response.
    #[serde(default)]
    pub raw_json: Option<String>,
    /// One item per line: `name: definition` or `name - definition`.
    #[serde(default)]
    pub raw_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub items: Vec<GlossaryItem>,
    /// Items removed because the client deselected them.
    pub dropped_count: usize,
}

/// Parses whichever input form the request carries (JSON wins when both are
/// present) and filters deselected items. Zero selected items is a
/// validation failure — callers never hand an empty list to the engine.
pub fn ingest_items(request: &IngestRequest) -> Result<IngestResponse, AppError> {
    let raw = match (&request.raw_json, &request.raw_text) {
        (Some(json), _) if !json.trim().is_empty() => parse_json_items(json)?,
        (_, Some(text)) if !text.trim().is_empty() => parse_text_items(text),
        _ => {
            return Err(AppError::Validation(
                "provide raw_json or raw_text with at least one item".to_string(),
            ))
        }
    };
    let raw_count = raw.len();
    let items = select_items(raw);
    if items.is_empty() {
        return Err(AppError::Validation(
            "no items remain after filtering deselected entries".to_string(),
        ));
    }
    Ok(IngestResponse {
        dropped_count: raw_count - items.len(),
        items,
    })
}

/// Parses a JSON array of `RawItem`s.
pub fn parse_json_items(input: &str) -> Result<Vec<RawItem>, AppError> {
    serde_json::from_str(input)
        .map_err(|e| AppError::Validation(format!("item JSON did not parse: {e}")))
}

/// Parses plain text, one item per non-empty line. The name/definition
/// separator is the first `:` or ` - `; a line without one becomes a
/// definition-less item to be filled via the prompt flow.
pub fn parse_text_items(input: &str) -> Vec<RawItem> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (name, definition) = split_line(line);
            RawItem {
                id: None,
                name: name.trim().to_string(),
                definition: definition.trim().to_string(),
                checked: None,
            }
        })
        .collect()
}

fn split_line(line: &str) -> (&str, &str) {
    if let Some((name, definition)) = line.split_once(':') {
        return (name, definition);
    }
    if let Some((name, definition)) = line.split_once(" - ") {
        return (name, definition);
    }
    (line, "")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
