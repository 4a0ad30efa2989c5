use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::glossary::ingest::{ingest_items, IngestRequest, IngestResponse};
use crate::glossary::models::GlossaryItem;
use crate::glossary::prompt::build_definition_prompt;
use crate::glossary::store::{list_glossaries, load_glossary, save_glossary, GlossaryRow};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// POST /api/v1/glossary/ingest
pub async fn handle_ingest(
    Json(req): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, AppError> {
    Ok(Json(ingest_items(&req)?))
}

/// POST /api/v1/glossary/ingest/upload
///
/// Accepts a single multipart file field holding either the item JSON array
/// or plain `name: definition` lines; the payload shape is sniffed from the
/// first non-whitespace character.
pub async fn handle_ingest_upload(
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("multipart read failed: {e}")))?
        .ok_or_else(|| AppError::Validation("upload contained no file field".to_string()))?;
    let content = field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("uploaded file is not valid text: {e}")))?;

    let request = if content.trim_start().starts_with('[') {
        IngestRequest {
            raw_json: Some(content),
            raw_text: None,
        }
    } else {
        IngestRequest {
            raw_json: None,
            raw_text: Some(content),
        }
    };
    Ok(Json(ingest_items(&request)?))
}

#[derive(Deserialize)]
pub struct SaveGlossaryRequest {
    pub user_id: Uuid,
    /// Omit to create a new glossary; supply to append a version.
    pub glossary_id: Option<Uuid>,
    pub title: String,
    pub items: Vec<GlossaryItem>,
}

/// POST /api/v1/glossaries
pub async fn handle_save_glossary(
    State(state): State<AppState>,
    Json(req): Json<SaveGlossaryRequest>,
) -> Result<Json<GlossaryRow>, AppError> {
    if req.items.is_empty() {
        return Err(AppError::Validation(
            "a glossary needs at least one item".to_string(),
        ));
    }
    let row = save_glossary(
        &state.db,
        req.user_id,
        req.glossary_id,
        &req.title,
        &req.items,
    )
    .await?;
    Ok(Json(row))
}

/// GET /api/v1/glossaries
pub async fn handle_list_glossaries(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<GlossaryRow>>, AppError> {
    Ok(Json(list_glossaries(&state.db, params.user_id).await?))
}

/// GET /api/v1/glossaries/:id
pub async fn handle_get_glossary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<GlossaryRow>, AppError> {
    load_glossary(&state.db, params.user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Glossary {id} not found")))
}

#[derive(Deserialize)]
pub struct PromptRequest {
    pub names: Vec<String>,
}

#[derive(Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}

/// POST /api/v1/glossary/prompt
pub async fn handle_build_prompt(
    Json(req): Json<PromptRequest>,
) -> Result<Json<PromptResponse>, AppError> {
    if req.names.is_empty() {
        return Err(AppError::Validation(
            "no term names to build a prompt for".to_string(),
        ));
    }
    Ok(Json(PromptResponse {
        prompt: build_definition_prompt(&req.names),
    }))
}
