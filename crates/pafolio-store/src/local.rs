//! Local JSON-file fallback store.
//!
//! Used when the remote collaborator is unconfigured or unreachable. One
//! JSON array in one file, newest record first, with the same three
//! operations as the remote store. First read seeds a sample record so a
//! fresh installation shows a populated gallery.

use async_trait::async_trait;
use chrono::Utc;
use pafolio_core::models::{MediaKind, UploadRecord};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::traits::{StoreError, StoreResult, UploadStore};

/// JSON-file persistence for upload records.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn seed() -> Vec<UploadRecord> {
        vec![UploadRecord {
            id: Uuid::new_v4(),
            indicator_id: "d1-4".to_string(),
            payload: "https://picsum.photos/800/600".to_string(),
            media_kind: MediaKind::Image,
            created_at: Utc::now(),
            caption: "Teaching material on renewable energy (sample)".to_string(),
            thumbnail_url: Some("https://picsum.photos/800/600".to_string()),
        }]
    }

    async fn read_all(&self) -> StoreResult<Vec<UploadRecord>> {
        match fs::read_to_string(&self.path).await {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                StoreError::InvalidResponse(format!(
                    "Corrupt local store {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let seed = Self::seed();
                self.write_all(&seed).await?;
                tracing::info!(path = %self.path.display(), "Seeded local store");
                Ok(seed)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, records: &[UploadRecord]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let text = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::InvalidResponse(format!("Serialize local store: {}", e)))?;
        fs::write(&self.path, text).await?;
        Ok(())
    }
}

#[async_trait]
impl UploadStore for LocalStore {
    async fn list(&self) -> StoreResult<Vec<UploadRecord>> {
        self.read_all().await
    }

    async fn create(&self, record: &UploadRecord) -> StoreResult<()> {
        let mut records = self.read_all().await?;
        records.insert(0, record.clone());
        self.write_all(&records).await?;
        tracing::debug!(id = %record.id, path = %self.path.display(), "Stored record locally");
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records = self.read_all().await?;
        records.retain(|r| r.id.to_string() != id);
        self.write_all(&records).await?;
        tracing::debug!(id = %id, path = %self.path.display(), "Deleted record locally");
        Ok(())
    }

    fn publish_target(&self) -> Option<String> {
        None
    }
}
