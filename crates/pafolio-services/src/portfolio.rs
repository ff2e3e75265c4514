//! Portfolio orchestrator.
//!
//! Owns the upload list as a single explicitly-scoped state container and
//! mediates every write against the persistence collaborator:
//!
//! - writes apply optimistically so the UI updates immediately;
//! - at most one write is outstanding at a time (`Busy` replaces queuing);
//! - after the collaborator acknowledges, the settle policy waits out its
//!   read lag before the authoritative refresh;
//! - a failed write reverts the optimistic change, and a delete the
//!   collaborator did not honor surfaces as a reconcile error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use pafolio_core::models::UploadRecord;
use pafolio_store::{StoreError, UploadStore};

use crate::settle::SettlePolicy;

#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("Another write is still in flight")]
    Busy,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Record {id} is still present after the settle delay; the delete may not have been applied")]
    ReconcileFailed { id: Uuid },

    #[error("No remote endpoint is configured to publish to")]
    NotPublishable,
}

/// Orchestrator state: the upload list plus write bookkeeping.
pub struct Portfolio {
    store: Arc<dyn UploadStore>,
    settle: SettlePolicy,
    records: RwLock<Vec<UploadRecord>>,
    write_pending: AtomicBool,
}

/// Clears the busy flag when a write path exits, on success and error alike.
struct WriteSlot<'a>(&'a AtomicBool);

impl Drop for WriteSlot<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Portfolio {
    pub fn new(store: Arc<dyn UploadStore>, settle: SettlePolicy) -> Self {
        Portfolio {
            store,
            settle,
            records: RwLock::new(Vec::new()),
            write_pending: AtomicBool::new(false),
        }
    }

    /// Whether a create or delete is currently outstanding. The UI disables
    /// its submit triggers while this holds.
    pub fn is_busy(&self) -> bool {
        self.write_pending.load(Ordering::SeqCst)
    }

    fn claim_write_slot(&self) -> Result<WriteSlot<'_>, PortfolioError> {
        if self.write_pending.swap(true, Ordering::SeqCst) {
            return Err(PortfolioError::Busy);
        }
        Ok(WriteSlot(&self.write_pending))
    }

    /// Replace local state with the collaborator's authoritative list.
    pub async fn refresh(&self) -> Result<(), PortfolioError> {
        let fetched = self.store.list().await?;
        *self.records.write().await = fetched;
        Ok(())
    }

    /// Current list, in the collaborator's delivered order.
    pub async fn records(&self) -> Vec<UploadRecord> {
        self.records.read().await.clone()
    }

    /// Records for one indicator, order preserved.
    pub async fn records_for(&self, indicator_id: &str) -> Vec<UploadRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.indicator_id == indicator_id)
            .cloned()
            .collect()
    }

    /// Create a record: optimistic prepend, collaborator write, settle,
    /// authoritative refresh. A collaborator failure reverts the prepend.
    pub async fn create(&self, record: UploadRecord) -> Result<(), PortfolioError> {
        let _slot = self.claim_write_slot()?;

        self.records.write().await.insert(0, record.clone());

        if let Err(e) = self.store.create(&record).await {
            self.records.write().await.retain(|r| r.id != record.id);
            tracing::error!(id = %record.id, error = %e, "Create failed, optimistic record reverted");
            return Err(e.into());
        }

        self.settle.settle_create().await;
        if let Err(e) = self.refresh().await {
            // Best effort: the optimistic state stands until the next
            // successful refresh.
            tracing::warn!(error = %e, "Refresh after create failed, keeping optimistic state");
        }

        Ok(())
    }

    /// Delete a record: optimistic removal, collaborator write, settle,
    /// authoritative refresh. A collaborator failure restores the record; a
    /// refresh that still contains it adopts the authoritative list (the
    /// record reappears) and reports the disagreement.
    pub async fn delete(&self, id: Uuid) -> Result<(), PortfolioError> {
        let _slot = self.claim_write_slot()?;

        let previous = self.records.read().await.clone();
        self.records.write().await.retain(|r| r.id != id);

        if let Err(e) = self.store.delete(&id.to_string()).await {
            *self.records.write().await = previous;
            tracing::error!(id = %id, error = %e, "Delete failed, optimistic removal reverted");
            return Err(e.into());
        }

        self.settle.settle_delete().await;
        match self.refresh().await {
            Ok(()) => {
                if self.records.read().await.iter().any(|r| r.id == id) {
                    tracing::warn!(id = %id, "Record survived its delete past the settle delay");
                    return Err(PortfolioError::ReconcileFailed { id });
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Refresh after delete failed, keeping optimistic state");
            }
        }

        Ok(())
    }

    /// Public URL the portfolio is published under, when a remote
    /// collaborator is configured.
    pub fn publish(&self) -> Result<String, PortfolioError> {
        self.store
            .publish_target()
            .ok_or(PortfolioError::NotPublishable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use pafolio_core::models::MediaKind;
    use pafolio_store::StoreResult;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    fn record(indicator: &str) -> UploadRecord {
        UploadRecord {
            id: Uuid::new_v4(),
            indicator_id: indicator.to_string(),
            payload: "https://example.com/x.png".to_string(),
            media_kind: MediaKind::Image,
            created_at: Utc::now(),
            caption: String::new(),
            thumbnail_url: None,
        }
    }

    /// In-memory store with switchable failure modes.
    #[derive(Default)]
    struct FakeStore {
        records: Mutex<Vec<UploadRecord>>,
        fail_writes: bool,
        /// Keep serving a deleted record from `list`, simulating the
        /// collaborator's read lag outlasting the settle delay.
        ignore_deletes: bool,
    }

    impl FakeStore {
        fn seeded(records: Vec<UploadRecord>) -> Self {
            FakeStore {
                records: Mutex::new(records),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl UploadStore for FakeStore {
        async fn list(&self) -> StoreResult<Vec<UploadRecord>> {
            Ok(self.records.lock().unwrap().clone())
        }

        async fn create(&self, record: &UploadRecord) -> StoreResult<()> {
            if self.fail_writes {
                return Err(StoreError::Endpoint { status: 500 });
            }
            self.records.lock().unwrap().insert(0, record.clone());
            Ok(())
        }

        async fn delete(&self, id: &str) -> StoreResult<()> {
            if self.fail_writes {
                return Err(StoreError::Endpoint { status: 500 });
            }
            if !self.ignore_deletes {
                self.records
                    .lock()
                    .unwrap()
                    .retain(|r| r.id.to_string() != id);
            }
            Ok(())
        }

        fn publish_target(&self) -> Option<String> {
            None
        }
    }

    fn portfolio(store: FakeStore) -> Portfolio {
        Portfolio::new(Arc::new(store), SettlePolicy::immediate())
    }

    #[tokio::test]
    async fn create_appends_then_reconciles() {
        let p = portfolio(FakeStore::default());
        p.refresh().await.unwrap();

        let rec = record("d1-1");
        p.create(rec.clone()).await.unwrap();

        let records = p.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, rec.id);
        assert!(!p.is_busy());
    }

    #[tokio::test]
    async fn failed_create_reverts_the_optimistic_append() {
        let p = portfolio(FakeStore {
            fail_writes: true,
            ..Default::default()
        });
        p.refresh().await.unwrap();

        let err = p.create(record("d1-1")).await.unwrap_err();
        assert!(matches!(err, PortfolioError::Store(_)));
        assert!(p.records().await.is_empty());
        assert!(!p.is_busy());
    }

    #[tokio::test]
    async fn optimistic_delete_removes_immediately_and_reconciles() {
        let a = record("d1-1");
        let b = record("d1-1");
        let c = record("d1-1");
        let p = portfolio(FakeStore::seeded(vec![a.clone(), b.clone(), c.clone()]));
        p.refresh().await.unwrap();

        p.delete(b.id).await.unwrap();
        let records = p.records().await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.id != b.id));
        // Order of the survivors is preserved.
        assert_eq!(records[0].id, a.id);
        assert_eq!(records[1].id, c.id);
    }

    #[tokio::test]
    async fn unhonored_delete_reverts_and_reports() {
        let a = record("d1-1");
        let b = record("d1-1");
        let c = record("d1-1");
        let p = portfolio(FakeStore {
            records: Mutex::new(vec![a.clone(), b.clone(), c.clone()]),
            ignore_deletes: true,
            ..Default::default()
        });
        p.refresh().await.unwrap();

        let err = p.delete(b.id).await.unwrap_err();
        assert!(matches!(err, PortfolioError::ReconcileFailed { id } if id == b.id));
        // The authoritative list wins: B is visible again.
        assert_eq!(p.records().await.len(), 3);
        assert!(!p.is_busy());
    }

    #[tokio::test]
    async fn failed_delete_restores_the_record() {
        let a = record("d1-1");
        let p = portfolio(FakeStore {
            records: Mutex::new(vec![a.clone()]),
            fail_writes: true,
            ..Default::default()
        });
        p.refresh().await.unwrap();

        let err = p.delete(a.id).await.unwrap_err();
        assert!(matches!(err, PortfolioError::Store(_)));
        assert_eq!(p.records().await.len(), 1);
    }

    /// Store whose writes block until the test releases them.
    struct BlockedStore {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl UploadStore for BlockedStore {
        async fn list(&self) -> StoreResult<Vec<UploadRecord>> {
            Ok(Vec::new())
        }

        async fn create(&self, _record: &UploadRecord) -> StoreResult<()> {
            self.gate.notified().await;
            Ok(())
        }

        async fn delete(&self, _id: &str) -> StoreResult<()> {
            Ok(())
        }

        fn publish_target(&self) -> Option<String> {
            None
        }
    }

    #[tokio::test]
    async fn second_write_is_rejected_while_one_is_pending() {
        let gate = Arc::new(Notify::new());
        let p = Arc::new(Portfolio::new(
            Arc::new(BlockedStore { gate: gate.clone() }),
            SettlePolicy::immediate(),
        ));

        let spawned = {
            let p = p.clone();
            tokio::spawn(async move { p.create(record("d1-1")).await })
        };

        // Let the spawned create claim the write slot and park on the gate.
        while !p.is_busy() {
            tokio::task::yield_now().await;
        }

        let err = p.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, PortfolioError::Busy));

        gate.notify_one();
        spawned.await.unwrap().unwrap();
        assert!(!p.is_busy());
    }

    #[tokio::test]
    async fn records_for_filters_by_indicator() {
        let a = record("d1-1");
        let b = record("d2-9");
        let p = portfolio(FakeStore::seeded(vec![a.clone(), b.clone()]));
        p.refresh().await.unwrap();

        let filtered = p.records_for("d2-9").await;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, b.id);
    }

    #[tokio::test]
    async fn publish_requires_a_remote_target() {
        let p = portfolio(FakeStore::default());
        assert!(matches!(p.publish(), Err(PortfolioError::NotPublishable)));
    }
}
