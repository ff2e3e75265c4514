//! Persistence abstraction trait
//!
//! This module defines the UploadStore trait that all persistence backends
//! must implement.

use async_trait::async_trait;
use pafolio_core::models::UploadRecord;
use thiserror::Error;

/// Persistence operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Endpoint returned status {status}")]
    Endpoint { status: u16 },

    /// The collaborator answered with something that is not the expected
    /// JSON, typically an HTML interstitial when sharing is misconfigured.
    #[error("Endpoint returned a non-JSON response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store configuration error: {0}")]
    Config(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence abstraction trait
///
/// Backends are fire-and-forget on the write path: `create` and `delete`
/// completing successfully does not guarantee the change is visible to the
/// next `list`: the remote collaborator's read path lags its writes, and a
/// server-side rejection is only observable as absence from a later `list`.
/// Callers own optimistic state and reconcile after a settle delay.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Fetch all records. Ordering is the collaborator's ("most recent
    /// reasonably first") and is preserved as delivered.
    async fn list(&self) -> StoreResult<Vec<UploadRecord>>;

    /// Persist a new record. No response body is expected.
    async fn create(&self, record: &UploadRecord) -> StoreResult<()>;

    /// Remove a record by id. No response body is expected.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Public URL of the published portfolio, when this backend has one.
    fn publish_target(&self) -> Option<String>;
}
