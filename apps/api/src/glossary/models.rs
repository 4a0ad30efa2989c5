//! Glossary item model and the wire format accepted from paste/upload.

use serde::{Deserialize, Serialize};

use crate::layout::ContentItem;

/// One item as supplied by the client. `checked: Some(false)` means the user
/// deselected the item; it is filtered out before the layout engine ever
/// sees it. Missing ids are assigned from input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub checked: Option<bool>,
}

/// A selected, id-bearing item ready for layout or persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryItem {
    pub id: u32,
    pub name: String,
    pub definition: String,
}

impl GlossaryItem {
    pub fn to_content_item(&self) -> ContentItem {
        ContentItem {
            id: self.id,
            title: self.name.clone(),
            body: self.definition.clone(),
        }
    }
}

/// Drops deselected items and assigns sequential ids (1-based input order)
/// where the client supplied none. Order is preserved; uniqueness of
/// client-supplied ids is the client's responsibility.
pub fn select_items(raw: Vec<RawItem>) -> Vec<GlossaryItem> {
    raw.into_iter()
        .filter(|item| item.checked != Some(false))
        .enumerate()
        .map(|(index, item)| GlossaryItem {
            id: item.id.unwrap_or(index as u32 + 1),
            name: item.name,
            definition: item.definition,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
