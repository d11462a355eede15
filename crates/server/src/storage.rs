use std::future::Future;

use axum::body::Body;

/// Failure reported by the object store, with the raw provider text.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StorageError(pub String);

/// Read-only view of the bucket. One handle is built at startup and shared by
/// every request.
pub trait ObjectStore: Clone + Send + Sync + 'static {
    /// Every key under `prefix`, following pagination to the end.
    fn list_keys(&self, prefix: &str)
        -> impl Future<Output = Result<Vec<String>, StorageError>> + Send;

    fn exists(&self, key: &str) -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// Open an object as a response body that streams as the client reads.
    fn stream(&self, key: &str) -> impl Future<Output = Result<Body, StorageError>> + Send;
}
