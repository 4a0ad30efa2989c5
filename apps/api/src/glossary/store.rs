//! Saved glossaries — append-only versioned persistence.
//!
//! Every save INSERTs a new version row, never UPDATEs; reads resolve the
//! latest version per glossary. Items are stored as a jsonb snapshot of the
//! selected `GlossaryItem` list.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::glossary::models::GlossaryItem;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GlossaryRow {
    pub user_id: Uuid,
    pub glossary_id: Uuid,
    pub version: i32,
    pub title: String,
    pub items: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl GlossaryRow {
    /// Deserializes the jsonb item snapshot.
    pub fn decode_items(&self) -> Result<Vec<GlossaryItem>, AppError> {
        serde_json::from_value(self.items.clone()).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "stored glossary {} v{} has a corrupt item snapshot: {e}",
                self.glossary_id,
                self.version
            ))
        })
    }
}

/// Saves a glossary as a new version. A `None` glossary_id starts a new
/// glossary at version 1; `Some` appends the next version to it.
pub async fn save_glossary(
    pool: &PgPool,
    user_id: Uuid,
    glossary_id: Option<Uuid>,
    title: &str,
    items: &[GlossaryItem],
) -> Result<GlossaryRow, AppError> {
    let glossary_id = glossary_id.unwrap_or_else(Uuid::new_v4);
    let current: Option<i32> = sqlx::query_scalar(
        "SELECT MAX(version) FROM glossaries WHERE user_id = $1 AND glossary_id = $2",
    )
    .bind(user_id)
    .bind(glossary_id)
    .fetch_one(pool)
    .await?;
    let version = current.unwrap_or(0) + 1;

    let snapshot = serde_json::to_value(items)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("item snapshot encoding failed: {e}")))?;

    let row: GlossaryRow = sqlx::query_as(
        r#"
        INSERT INTO glossaries (user_id, glossary_id, version, title, items, created_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        RETURNING user_id, glossary_id, version, title, items, created_at
        "#,
    )
    .bind(user_id)
    .bind(glossary_id)
    .bind(version)
    .bind(title)
    .bind(snapshot)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Latest version of one glossary, or `None` if it does not exist.
pub async fn load_glossary(
    pool: &PgPool,
    user_id: Uuid,
    glossary_id: Uuid,
) -> Result<Option<GlossaryRow>, AppError> {
    let row = sqlx::query_as(
        r#"
        SELECT user_id, glossary_id, version, title, items, created_at
        FROM glossaries
        WHERE user_id = $1 AND glossary_id = $2
        ORDER BY version DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(glossary_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Latest version of every glossary the user owns, newest first.
pub async fn list_glossaries(pool: &PgPool, user_id: Uuid) -> Result<Vec<GlossaryRow>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT DISTINCT ON (glossary_id)
            user_id, glossary_id, version, title, items, created_at
        FROM glossaries
        WHERE user_id = $1
        ORDER BY glossary_id, version DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
