//! Entities for the panel tables the agent touches. The panel owns the
//! schema; the agent never migrates it.

pub mod account;
pub mod alive_client_ip;
pub mod node;
pub mod node_online_log;
pub mod usage_log;
