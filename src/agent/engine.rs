//! The two-phase reconciliation cycle.

use crate::error::Result;
use crate::logger::log;
use crate::model::Account;
use crate::store::Store;

use super::diff::diff_accounts;
use super::{InboundManager, TrafficQuery};

/// Owns the known account set and drives one cycle at a time.
///
/// Each cycle runs traffic accounting over the known set first, then
/// reconciles the known set against the store. Both phases always run;
/// a failure in the first never suppresses the second, though the
/// cycle still reports it.
pub struct ReconcileEngine {
    store: Store,
    traffic: Box<dyn TrafficQuery>,
    managers: Vec<Box<dyn InboundManager>>,
    node_id: i64,
    class_threshold: i32,
    known: Vec<Account>,
}

impl ReconcileEngine {
    pub fn new(
        store: Store,
        traffic: Box<dyn TrafficQuery>,
        managers: Vec<Box<dyn InboundManager>>,
        node_id: i64,
        class_threshold: i32,
    ) -> Self {
        Self {
            store,
            traffic,
            managers,
            node_id,
            class_threshold,
            known: Vec::new(),
        }
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    pub fn known_emails(&self) -> Vec<&str> {
        self.known.iter().map(|a| a.email.as_str()).collect()
    }

    /// Run one full cycle. Returns the first phase error, but only
    /// after both phases have had their turn.
    pub async fn run_cycle(&mut self) -> Result<()> {
        let traffic = self.flush_traffic().await;
        if let Err(err) = &traffic {
            log::warn!(error = %err, "Traffic accounting failed");
        }
        let sync = self.sync_accounts().await;
        if let Err(err) = &sync {
            log::warn!(error = %err, "Account sync failed");
        }
        traffic.and(sync)
    }

    /// Phase one: read-and-reset each known account's counters and
    /// persist the non-idle snapshots, one scoped transaction per
    /// account. Per-account failures are logged and skipped; only the
    /// closing heartbeat write fails the phase.
    async fn flush_traffic(&self) -> Result<()> {
        let mut bandwidth: i64 = 0;
        let mut active: usize = 0;

        for account in &self.known {
            let snapshot = match self.traffic.user_traffic(&account.email, true).await {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    log::warn!(email = %account.email, error = %err, "Traffic query failed");
                    continue;
                }
            };

            bandwidth += snapshot.total();
            if snapshot.is_idle() {
                continue;
            }

            match self
                .store
                .record_account_traffic(self.node_id, account, &snapshot)
                .await
            {
                Ok(()) => active += 1,
                Err(err) => {
                    log::warn!(email = %account.email, error = %err, "Failed to persist traffic");
                }
            }
        }

        if active > 0 {
            log::info!(active = active, "Traffic accounted");
        }
        self.store.heartbeat(self.node_id, bandwidth).await
    }

    /// Phase two: fetch the eligible set, diff it against the known
    /// set, push the changes to every inbound and adopt the eligible
    /// set as the new known set. A fetch failure leaves the known set
    /// untouched; per-user apply failures do not.
    async fn sync_accounts(&mut self) -> Result<()> {
        let eligible = self
            .store
            .fetch_eligible_accounts(self.class_threshold)
            .await?;
        let diff = diff_accounts(&self.known, &eligible);

        if !diff.is_empty() {
            log::info!(
                added = diff.added.len(),
                modified = diff.modified.len(),
                removed = diff.removed.len(),
                "Account set changed"
            );
        }

        for manager in &self.managers {
            for email in &diff.removed {
                if let Err(err) = manager.remove_user(email).await {
                    log::warn!(email = %email, tag = %manager.tag(), error = %err, "Failed to remove user");
                }
            }

            // Modified users are removed first so the re-add installs
            // the new credential instead of colliding with the old one.
            for account in &diff.modified {
                if let Err(err) = manager.remove_user(&account.email).await {
                    log::warn!(email = %account.email, tag = %manager.tag(), error = %err, "Failed to remove user");
                }
                if let Err(err) = manager.add_user(account).await {
                    log::warn!(email = %account.email, tag = %manager.tag(), error = %err, "Failed to re-add user");
                }
            }

            for account in &diff.added {
                if let Err(err) = manager.add_user(account).await {
                    log::warn!(email = %account.email, tag = %manager.tag(), error = %err, "Failed to add user");
                }
            }
        }

        self.known = eligible;
        Ok(())
    }
}
