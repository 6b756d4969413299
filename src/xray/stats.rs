//! Traffic counter queries against StatsService.
//!
//! The proxy names per-account counters
//! `user>>>{email}>>>traffic>>>{client-ip}>>>{uplink|downlink}`; one
//! query with the reset flag reads and zeroes every counter matching
//! the account's prefix in a single remote operation.

use async_trait::async_trait;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

use super::proto;
use crate::agent::TrafficQuery;
use crate::error::Result;
use crate::model::TrafficSnapshot;

const QUERY_STATS_PATH: &str = "/v2ray.core.app.stats.command.StatsService/QueryStats";

const UPLINK_SUFFIX: &str = ">>>uplink";
const DOWNLINK_SUFFIX: &str = ">>>downlink";

/// Fold the counters matching one account into a snapshot.
///
/// Uplink counter names carry the client source address as the fourth
/// `>>>` segment; each distinct address counts as one client.
fn fold_snapshot(email: &str, stats: &[proto::Stat]) -> TrafficSnapshot {
    let mut snapshot = TrafficSnapshot {
        email: email.to_string(),
        ..Default::default()
    };

    for stat in stats {
        if stat.name.contains(DOWNLINK_SUFFIX) && stat.value > 0 {
            snapshot.downloads += stat.value;
        }
        if stat.name.contains(UPLINK_SUFFIX) && stat.value > 0 {
            snapshot.uploads += stat.value;
            let fields: Vec<&str> = stat.name.split(">>>").collect();
            if fields.len() == 5 {
                let ip = fields[3];
                if !snapshot.ips.iter().any(|known| known == ip) {
                    snapshot.ips.push(ip.to_string());
                    snapshot.clients += 1;
                }
            }
        }
    }

    snapshot
}

/// Stats query client for the proxy's management API.
#[derive(Clone)]
pub struct StatsServiceClient {
    grpc: Grpc<Channel>,
}

impl StatsServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            grpc: Grpc::new(channel),
        }
    }

    async fn query_stats(&self, pattern: String, reset: bool) -> Result<Vec<proto::Stat>> {
        let request = proto::QueryStatsRequest { pattern, reset };
        let mut grpc = self.grpc.clone();
        grpc.ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("service not ready: {}", e)))?;
        let codec: tonic::codec::ProstCodec<proto::QueryStatsRequest, proto::QueryStatsResponse> =
            tonic::codec::ProstCodec::default();
        let response = grpc
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(QUERY_STATS_PATH),
                codec,
            )
            .await?;
        Ok(response.into_inner().stat)
    }
}

#[async_trait]
impl TrafficQuery for StatsServiceClient {
    async fn user_traffic(&self, email: &str, reset: bool) -> Result<TrafficSnapshot> {
        let pattern = format!("user>>>{}>>>traffic", email);
        let stats = self.query_stats(pattern, reset).await?;
        Ok(fold_snapshot(email, &stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(name: &str, value: i64) -> proto::Stat {
        proto::Stat {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_fold_aggregates_directions_and_clients() {
        let stats = vec![
            stat("user>>>a@x>>>traffic>>>1.2.3.4>>>uplink", 100),
            stat("user>>>a@x>>>traffic>>>1.2.3.4>>>downlink", 50),
            stat("user>>>a@x>>>traffic>>>5.6.7.8>>>uplink", 30),
        ];
        let snap = fold_snapshot("a@x", &stats);
        assert_eq!(snap.uploads, 130);
        assert_eq!(snap.downloads, 50);
        assert_eq!(snap.clients, 2);
        assert_eq!(snap.ips, vec!["1.2.3.4", "5.6.7.8"]);
    }

    #[test]
    fn test_fold_counts_distinct_clients_once() {
        let stats = vec![
            stat("user>>>a@x>>>traffic>>>1.2.3.4>>>uplink", 10),
            stat("user>>>a@x>>>traffic>>>1.2.3.4>>>uplink", 20),
        ];
        let snap = fold_snapshot("a@x", &stats);
        assert_eq!(snap.uploads, 30);
        assert_eq!(snap.clients, 1);
    }

    #[test]
    fn test_fold_ignores_nonpositive_values() {
        let stats = vec![
            stat("user>>>a@x>>>traffic>>>1.2.3.4>>>uplink", 0),
            stat("user>>>a@x>>>traffic>>>1.2.3.4>>>downlink", -5),
        ];
        let snap = fold_snapshot("a@x", &stats);
        assert!(snap.is_idle());
        assert_eq!(snap.clients, 0);
    }

    #[test]
    fn test_fold_handles_aggregate_counter_names() {
        // Counters without a per-client segment still count traffic but
        // contribute no client address.
        let stats = vec![
            stat("user>>>a@x>>>traffic>>>uplink", 40),
            stat("user>>>a@x>>>traffic>>>downlink", 60),
        ];
        let snap = fold_snapshot("a@x", &stats);
        assert_eq!(snap.uploads, 40);
        assert_eq!(snap.downloads, 60);
        assert_eq!(snap.clients, 0);
        assert!(snap.ips.is_empty());
    }

    #[test]
    fn test_fold_empty_stats_is_idle() {
        let snap = fold_snapshot("a@x", &[]);
        assert!(snap.is_idle());
        assert_eq!(snap.email, "a@x");
    }
}
