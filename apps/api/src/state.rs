use std::sync::Arc;

use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::documents::DocumentStore;
use crate::layout::LayoutConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Redis client backing the TTL-bound document preview references.
    pub redis: RedisClient,
    /// Object store for generated PDFs. Production: S3/MinIO.
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
    /// Server layout defaults, applied when a generation request carries no
    /// config override.
    pub layout_defaults: LayoutConfig,
}
