use pafolio_core::Config;
use std::sync::Arc;

use crate::{FallbackStore, LocalStore, SheetStore, StoreResult, UploadStore};

/// Create the persistence backend for a configuration.
///
/// With a remote endpoint configured the store is the remote sheet with the
/// local file as read fallback; without one, the local file alone.
pub fn create_store(config: &Config) -> StoreResult<Arc<dyn UploadStore>> {
    let local = LocalStore::new(&config.local_store_path);

    match &config.sheet_url {
        Some(endpoint) => {
            let sheet = SheetStore::new(endpoint.clone())?;
            tracing::info!(endpoint = %endpoint, "Using remote sheet store with local fallback");
            Ok(Arc::new(FallbackStore::new(
                Arc::new(sheet),
                Arc::new(local),
            )))
        }
        None => {
            tracing::info!(path = %config.local_store_path.display(), "No remote endpoint configured, using local store");
            Ok(Arc::new(local))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(sheet_url: Option<String>) -> Config {
        let dir = std::env::temp_dir().join(format!("pafolio-factory-{}", uuid::Uuid::new_v4()));
        Config {
            sheet_url,
            local_store_path: dir.join("store.json"),
            preview_dir: std::env::temp_dir().join("pafolio-previews"),
            gemini_api_key: None,
            settle_create: Duration::from_millis(0),
            settle_delete: Duration::from_millis(0),
        }
    }

    #[tokio::test]
    async fn unconfigured_remote_yields_a_working_local_store() {
        let store = create_store(&config(None)).unwrap();
        assert!(store.publish_target().is_none());
        assert!(!store.list().await.unwrap().is_empty());
    }

    #[test]
    fn configured_remote_yields_a_publish_target() {
        let store = create_store(&config(Some("https://script.example.com/exec".into()))).unwrap();
        assert_eq!(
            store.publish_target(),
            Some("https://script.example.com/exec".to_string())
        );
    }
}
