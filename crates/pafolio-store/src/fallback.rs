//! Read-path fallback composition.
//!
//! Wraps a primary (remote) store and a local fallback. Reads that fail on
//! the primary are answered from the fallback so the gallery stays usable
//! offline. Writes go to the primary only: a failed write must surface so
//! the caller can revert its optimistic state, not silently land in a store
//! nobody publishes from.

use async_trait::async_trait;
use pafolio_core::models::UploadRecord;
use std::sync::Arc;

use crate::traits::{StoreResult, UploadStore};

/// Primary store with a local read fallback.
pub struct FallbackStore {
    primary: Arc<dyn UploadStore>,
    fallback: Arc<dyn UploadStore>,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn UploadStore>, fallback: Arc<dyn UploadStore>) -> Self {
        FallbackStore { primary, fallback }
    }
}

#[async_trait]
impl UploadStore for FallbackStore {
    async fn list(&self) -> StoreResult<Vec<UploadRecord>> {
        match self.primary.list().await {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(error = %e, "Primary store unreachable, serving local fallback");
                self.fallback.list().await
            }
        }
    }

    async fn create(&self, record: &UploadRecord) -> StoreResult<()> {
        self.primary.create(record).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.primary.delete(id).await
    }

    fn publish_target(&self) -> Option<String> {
        self.primary.publish_target()
    }
}
