//! Reconciliation agent for a v2ray/xray proxy node.
//!
//! Architecture:
//! - `store/`: panel database access (eligible accounts, usage persistence)
//! - `xray/`: remote management API wrappers (user add/remove, traffic query)
//! - `agent/`: the reconciliation engine and its fixed-interval driver
//! - `config` / `logger` / `error`: process plumbing

pub mod agent;
pub mod config;
pub mod error;
pub mod logger;
pub mod model;
pub mod store;
pub mod utils;
pub mod xray;
