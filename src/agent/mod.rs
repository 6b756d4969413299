//! The reconciliation engine and its collaborator seams.
//!
//! The engine drives two remote surfaces it does not own: the proxy's
//! per-inbound user table and its traffic counters. Both are consumed
//! through traits so the cycle logic can be exercised against fakes.

mod diff;
mod engine;
pub mod scheduler;

pub use engine::ReconcileEngine;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Account, TrafficSnapshot};

/// One remote inbound listener accepting user add/remove operations.
///
/// A manager is bound to a single inbound tag for its lifetime; the
/// engine iterates a list of managers rather than branching on
/// protocol.
#[async_trait]
pub trait InboundManager: Send + Sync {
    /// Inbound tag this manager is bound to.
    fn tag(&self) -> &str;

    /// Provision one user on the inbound.
    async fn add_user(&self, account: &Account) -> Result<()>;

    /// Remove one user from the inbound by email.
    async fn remove_user(&self, email: &str) -> Result<()>;
}

/// Source of per-account traffic counters.
#[async_trait]
pub trait TrafficQuery: Send + Sync {
    /// Read one account's counters; with `reset` the read-and-zero is a
    /// single atomic remote operation, so callers must not query twice
    /// expecting the same value.
    async fn user_traffic(&self, email: &str, reset: bool) -> Result<TrafficSnapshot>;
}
