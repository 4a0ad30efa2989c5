// Glossary intake and persistence: paste/upload ingestion, append-only
// saved glossaries, and the clipboard prompt flow with formula substitution.

pub mod formula;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod prompt;
pub mod store;

pub use models::{select_items, GlossaryItem, RawItem};
