//! Management API connection establishment.

use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

use crate::error::{AgentError, Result};
use crate::logger::log;

/// Pause between dial attempts.
const DIAL_INTERVAL: Duration = Duration::from_millis(500);

/// Dial the proxy's management endpoint, retrying until the overall
/// `connect_timeout` elapses.
///
/// The returned channel carries `rpc_timeout` as a per-call deadline on
/// every subsequent request. The overall window is enforced with an
/// outer timer, so a hanging dial attempt cannot block past it; the
/// failure is reported as [`AgentError::ConnectTimeout`].
pub async fn connect(
    address: &str,
    connect_timeout: Duration,
    rpc_timeout: Duration,
) -> Result<Channel> {
    let endpoint = Endpoint::from_shared(format!("http://{}", address))
        .map_err(|e| AgentError::Config(format!("invalid management API address: {}", e)))?
        .connect_timeout(connect_timeout)
        .timeout(rpc_timeout);

    let dial = async {
        let mut tick = tokio::time::interval(DIAL_INTERVAL);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            match endpoint.connect().await {
                Ok(channel) => return channel,
                Err(e) => {
                    log::debug!(address = %address, error = %e, "Dial attempt failed, retrying");
                }
            }
        }
    };

    match tokio::time::timeout(connect_timeout, dial).await {
        Ok(channel) => {
            log::info!(address = %address, "Connected to management API");
            Ok(channel)
        }
        Err(_) => Err(AgentError::ConnectTimeout(connect_timeout)),
    }
}
