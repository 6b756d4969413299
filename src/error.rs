use std::time::Duration;
use thiserror::Error;

/// Unified error type for the agent library.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Management API dial window elapsed
    #[error("Connect timeout after {0:?}")]
    ConnectTimeout(Duration),

    /// Management API transport error
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// Management API call failed or returned an application error
    #[error("RPC error: {0}")]
    Rpc(#[from] tonic::Status),

    /// Panel database error
    #[error("Database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AgentError>;

impl From<sea_orm::TransactionError<sea_orm::DbErr>> for AgentError {
    fn from(err: sea_orm::TransactionError<sea_orm::DbErr>) -> Self {
        match err {
            sea_orm::TransactionError::Connection(e) => AgentError::Db(e),
            sea_orm::TransactionError::Transaction(e) => AgentError::Db(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = AgentError::Config("node id must be positive".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Configuration error"));
        assert!(display.contains("node id must be positive"));
    }

    #[test]
    fn test_connect_timeout_display() {
        let err = AgentError::ConnectTimeout(Duration::from_secs(6));
        let display = format!("{}", err);
        assert!(display.contains("Connect timeout"));
        assert!(display.contains("6s"));
    }

    #[test]
    fn test_rpc_error_from_status() {
        let status = tonic::Status::unavailable("inbound not found");
        let err: AgentError = status.into();
        let display = format!("{}", err);
        assert!(display.contains("RPC error"));
        assert!(display.contains("inbound not found"));
    }

    #[test]
    fn test_db_error_from_dberr() {
        let db_err = sea_orm::DbErr::Custom("connection reset".to_string());
        let err: AgentError = db_err.into();
        assert!(format!("{}", err).contains("Database error"));
    }

    #[test]
    fn test_transaction_error_flattens() {
        let tx_err = sea_orm::TransactionError::Transaction(sea_orm::DbErr::Custom(
            "usage_log insert failed".to_string(),
        ));
        let err: AgentError = tx_err.into();
        assert!(matches!(err, AgentError::Db(_)));
    }
}
