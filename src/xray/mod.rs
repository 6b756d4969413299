//! Remote management client for the proxy's gRPC API.
//!
//! - `connect`: retry-with-timeout dialing
//! - `handler`: per-inbound user add/remove (HandlerService)
//! - `stats`: traffic query-and-reset (StatsService)
//! - `proto`: vendored wire message types

mod connect;
mod handler;
mod stats;

pub mod proto;

pub use connect::connect;
pub use handler::{HandlerServiceClient, Protocol};
pub use stats::StatsServiceClient;
