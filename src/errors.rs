use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigError;
use crate::storage::StoreError;

/// Error type that captures failures of a balance computation.
///
/// An absent balance is not an error; it is reported as `None` inside a
/// [`BalanceResult`](crate::balance::BalanceResult).
#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Goal not found: {0}")]
    GoalNotFound(Uuid),
    #[error("Cache error: {0}")]
    Cache(String),
    #[error("Task failed: {0}")]
    Task(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, BalanceError>;

impl From<tokio::task::JoinError> for BalanceError {
    fn from(err: tokio::task::JoinError) -> Self {
        BalanceError::Task(err.to_string())
    }
}

impl From<ConfigError> for BalanceError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => BalanceError::Io(io),
            ConfigError::Serde(message) | ConfigError::Invalid(message) => {
                BalanceError::Config(message)
            }
        }
    }
}
