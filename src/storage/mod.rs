//! Read-side collaborator contracts and the reference stores behind them.

pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::calendar::DayInterval;
use crate::domain::{Adjustment, Expense, Goal};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures reported by a storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Store lock poisoned: {0}")]
    Poisoned(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Source of isolated, read-only views of goal data.
pub trait GoalStore: Send + Sync {
    /// Takes a snapshot; later writes to the store are not visible through it.
    fn snapshot(&self) -> Result<Arc<dyn StoreSnapshot>>;
}

/// An immutable point-in-time view of goals and their records.
pub trait StoreSnapshot: Send + Sync {
    fn goal(&self, id: Uuid) -> Result<Option<Goal>>;

    /// Expenses of `goal_id` whose day falls inside `interval`.
    fn expenses(&self, goal_id: Uuid, interval: &DayInterval) -> Result<Vec<Expense>>;

    /// Adjustments of `goal_id` whose effective range shares at least one day with `interval`.
    fn adjustments(&self, goal_id: Uuid, interval: &DayInterval) -> Result<Vec<Adjustment>>;
}

/// Key-value persistence for last shown balances.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Decimal>>;
    fn set(&self, key: &str, amount: Decimal) -> Result<()>;
}

pub use json_backend::JsonCacheStore;
pub use memory::{MemoryCacheStore, MemoryStore};
