pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::glossary::handlers as glossary;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Glossary intake
        .route("/api/v1/glossary/ingest", post(glossary::handle_ingest))
        .route(
            "/api/v1/glossary/ingest/upload",
            post(glossary::handle_ingest_upload),
        )
        .route(
            "/api/v1/glossary/prompt",
            post(glossary::handle_build_prompt),
        )
        // Saved glossaries (append-only versions)
        .route(
            "/api/v1/glossaries",
            post(glossary::handle_save_glossary).get(glossary::handle_list_glossaries),
        )
        .route("/api/v1/glossaries/:id", get(glossary::handle_get_glossary))
        // Document generation and preview
        .route(
            "/api/v1/documents",
            post(documents::handle_generate_document),
        )
        .route(
            "/api/v1/documents/:id",
            get(documents::handle_get_document),
        )
        .with_state(state)
}
