//! Remote spreadsheet web-app store.
//!
//! The collaborator is a script bound to a spreadsheet, exposed as a web
//! app. Its contract is narrow and quirky:
//!
//! - reads are plain GETs returning a JSON array, but a misconfigured
//!   deployment serves an HTML login page instead; the body is read as text
//!   and parsed explicitly so that case maps to `StoreError::InvalidResponse`;
//! - the read path is cached aggressively, so every GET carries a
//!   cache-busting timestamp parameter;
//! - writes are POSTs with a `text/plain;charset=utf-8` body (anything else
//!   triggers a preflight the web app cannot answer) wrapping the action in a
//!   small envelope, and the response body carries no information.

use async_trait::async_trait;
use chrono::Utc;
use pafolio_core::models::UploadRecord;
use serde_json::json;
use std::time::Duration;

use crate::traits::{StoreError, StoreResult, UploadStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Store backed by the remote spreadsheet web app.
#[derive(Debug, Clone)]
pub struct SheetStore {
    client: reqwest::Client,
    endpoint: String,
}

impl SheetStore {
    pub fn new(endpoint: impl Into<String>) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(SheetStore {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_action(&self, body: serde_json::Value) -> StoreResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/plain;charset=utf-8")
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Endpoint {
                status: status.as_u16(),
            });
        }

        // Fire-and-forget: the web app's response body is meaningless.
        Ok(())
    }
}

#[async_trait]
impl UploadStore for SheetStore {
    async fn list(&self) -> StoreResult<Vec<UploadRecord>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("t", Utc::now().timestamp_millis().to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Endpoint {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let records: Vec<UploadRecord> = serde_json::from_str(&text).map_err(|_| {
            StoreError::InvalidResponse(text.chars().take(100).collect::<String>())
        })?;

        tracing::debug!(count = records.len(), "Fetched records from sheet endpoint");
        Ok(records)
    }

    async fn create(&self, record: &UploadRecord) -> StoreResult<()> {
        self.post_action(json!({ "action": "save", "payload": record }))
            .await?;
        tracing::info!(id = %record.id, indicator = %record.indicator_id, "Sent record to sheet endpoint");
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.post_action(json!({ "action": "delete", "id": id }))
            .await?;
        tracing::info!(id = %id, "Sent delete to sheet endpoint");
        Ok(())
    }

    fn publish_target(&self) -> Option<String> {
        Some(self.endpoint.clone())
    }
}
