//! Fixed-period cycle driver.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

use crate::logger::log;

use super::ReconcileEngine;

/// Run reconciliation cycles until shutdown is signalled.
///
/// Cycles never overlap: the next tick is not serviced until the
/// current cycle returns. Delay rather than Skip on missed ticks, so a
/// slow cycle is followed by a prompt one instead of a doubled gap.
/// The first cycle runs immediately. Cycle errors are logged and the
/// loop continues.
pub async fn run(
    engine: &mut ReconcileEngine,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    log::info!(period = ?period, "Reconciliation scheduler started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = engine.run_cycle().await {
                    log::warn!(error = %err, "Cycle finished with errors");
                }
            }
            _ = shutdown.changed() => {
                log::info!("Scheduler shutting down");
                break;
            }
        }
    }
}
