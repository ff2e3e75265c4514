//! Settle policy for the eventually-consistent persistence collaborator.
//!
//! The collaborator acknowledges writes before its read path reflects them:
//! a list issued right after a create or delete can return the old state.
//! This is a limitation of the collaborator, not of this system; the policy
//! makes the workaround explicit and configurable instead of burying sleeps
//! in the write paths. Deletes need a longer interval than creates in
//! practice.

use std::time::Duration;

use pafolio_core::constants::{DEFAULT_SETTLE_CREATE_MS, DEFAULT_SETTLE_DELETE_MS};
use pafolio_core::Config;

/// Settle intervals to wait after a write before trusting a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    pub after_create: Duration,
    pub after_delete: Duration,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        SettlePolicy {
            after_create: Duration::from_millis(DEFAULT_SETTLE_CREATE_MS),
            after_delete: Duration::from_millis(DEFAULT_SETTLE_DELETE_MS),
        }
    }
}

impl SettlePolicy {
    pub fn from_config(config: &Config) -> Self {
        SettlePolicy {
            after_create: config.settle_create,
            after_delete: config.settle_delete,
        }
    }

    /// Zero-delay policy for tests and synchronous-equivalent backends.
    pub fn immediate() -> Self {
        SettlePolicy {
            after_create: Duration::ZERO,
            after_delete: Duration::ZERO,
        }
    }

    pub async fn settle_create(&self) {
        Self::wait(self.after_create).await;
    }

    pub async fn settle_delete(&self) {
        Self::wait(self.after_delete).await;
    }

    async fn wait(interval: Duration) {
        if !interval.is_zero() {
            tracing::debug!(
                settle_ms = interval.as_millis() as u64,
                "Waiting for the collaborator's read path to catch up"
            );
            tokio::time::sleep(interval).await;
        }
    }
}
