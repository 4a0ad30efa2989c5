// Document generation: layout + PDF assembly, object storage, and the
// TTL-bound preview references that back the preview/download endpoints.

pub mod handlers;
pub mod storage;

pub use storage::{DocumentStore, S3DocumentStore};
