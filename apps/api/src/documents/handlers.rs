//! Document generation and retrieval.
//!
//! Generation resolves the item list (inline or from a saved glossary),
//! runs the layout pass against the PDF renderer on a blocking thread, and
//! stores the result in the object store with a TTL-bound preview reference.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::documents::storage::{lookup_preview, record_preview, DocumentStore, PreviewRef};
use crate::errors::AppError;
use crate::glossary::models::{select_items, RawItem};
use crate::glossary::store::load_glossary;
use crate::layout::{run_layout, ContentItem, LayoutConfig};
use crate::render::PdfRenderer;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateDocumentRequest {
    pub user_id: Uuid,
    pub title: Option<String>,
    /// Inline items; ignored when `glossary_id` is set.
    pub items: Option<Vec<RawItem>>,
    /// Build from the latest version of a saved glossary instead.
    pub glossary_id: Option<Uuid>,
    /// Overrides the server layout defaults.
    pub config: Option<LayoutConfig>,
}

#[derive(Serialize)]
pub struct GenerateDocumentResponse {
    pub document_id: Uuid,
    pub page_count: usize,
    pub item_count: usize,
    pub preview_url: String,
    pub download_url: String,
}

fn document_key(user_id: Uuid, document_id: Uuid) -> String {
    format!("documents/{user_id}/{document_id}.pdf")
}

/// Resolves the request into renderable items. Formula notation is left in
/// its ASCII form: the base-14 fonts cannot encode the substituted glyphs,
/// so substitution stays on the prompt/clipboard path.
async fn resolve_items(
    state: &AppState,
    req: &GenerateDocumentRequest,
) -> Result<Vec<ContentItem>, AppError> {
    let items = if let Some(glossary_id) = req.glossary_id {
        let row = load_glossary(&state.db, req.user_id, glossary_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Glossary {glossary_id} not found")))?;
        row.decode_items()?
    } else {
        let raw = req
            .items
            .clone()
            .ok_or_else(|| AppError::Validation("items or glossary_id is required".to_string()))?;
        select_items(raw)
    };
    if items.is_empty() {
        return Err(AppError::Validation(
            "no selected items to lay out".to_string(),
        ));
    }
    Ok(items.iter().map(|item| item.to_content_item()).collect())
}

/// POST /api/v1/documents
pub async fn handle_generate_document(
    State(state): State<AppState>,
    Json(req): Json<GenerateDocumentRequest>,
) -> Result<Json<GenerateDocumentResponse>, AppError> {
    let items = resolve_items(&state, &req).await?;
    let item_count = items.len();
    // Only client-supplied configs pass through the boundary clamp; the
    // server defaults keep max_items_per_page = 0 (unlimited) as-is.
    let config = req
        .config
        .map(|c| c.sanitized())
        .unwrap_or_else(|| state.layout_defaults.clone());
    let title = req.title.unwrap_or_else(|| "Glossary".to_string());

    // Layout and PDF assembly are CPU-bound; keep them off the async runtime.
    let (bytes, page_count) = tokio::task::spawn_blocking(move || {
        let mut renderer = PdfRenderer::new(&config, &title);
        let result = run_layout(&items, &config, &mut renderer)?;
        let bytes = renderer.finish()?;
        Ok::<_, AppError>((bytes, result.page_count))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("layout task panicked: {e}")))??;

    let document_id = Uuid::new_v4();
    let key = document_key(req.user_id, document_id);
    state.store.put_document(&key, bytes::Bytes::from(bytes)).await?;

    let preview = PreviewRef {
        s3_key: key.clone(),
        page_count,
        item_count,
    };
    record_preview(
        &state.redis,
        document_id,
        &preview,
        state.config.preview_ttl_secs,
    )
    .await?;

    let download_url = state
        .store
        .presign_download(&key, state.config.preview_ttl_secs)
        .await?;
    info!(%document_id, page_count, item_count, "document generated");

    Ok(Json(GenerateDocumentResponse {
        document_id,
        page_count,
        item_count,
        preview_url: format!("/api/v1/documents/{document_id}"),
        download_url,
    }))
}

#[derive(Serialize)]
pub struct DocumentPreviewResponse {
    pub document_id: Uuid,
    pub page_count: usize,
    pub item_count: usize,
    pub download_url: String,
}

/// GET /api/v1/documents/:id
///
/// Re-presigns the stored object as long as the preview reference is alive.
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<DocumentPreviewResponse>, AppError> {
    let preview = lookup_preview(&state.redis, document_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document {document_id} not found")))?;
    let download_url = state
        .store
        .presign_download(&preview.s3_key, state.config.preview_ttl_secs)
        .await?;
    Ok(Json(DocumentPreviewResponse {
        document_id,
        page_count: preview.page_count,
        item_count: preview.item_count,
        download_url,
    }))
}
