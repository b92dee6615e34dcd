//! Last balance shown per goal, kept only for continuity across restarts.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::{BalanceError, Result};
use crate::storage::CacheStore;

/// Goal-keyed view over a [`CacheStore`].
#[derive(Clone)]
pub struct BalanceCache {
    store: Arc<dyn CacheStore>,
}

impl BalanceCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Last recorded balance, or zero when none was recorded.
    pub fn get(&self, goal_id: Uuid) -> Result<Decimal> {
        self.store
            .get(&Self::key(goal_id))
            .map(|value| value.unwrap_or(Decimal::ZERO))
            .map_err(|err| BalanceError::Cache(err.to_string()))
    }

    pub fn set(&self, goal_id: Uuid, amount: Decimal) -> Result<()> {
        self.store
            .set(&Self::key(goal_id), amount)
            .map_err(|err| BalanceError::Cache(err.to_string()))
    }

    fn key(goal_id: Uuid) -> String {
        goal_id.hyphenated().to_string()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::storage::MemoryCacheStore;

    #[test]
    fn absent_goal_reads_as_zero() {
        let cache = BalanceCache::new(Arc::new(MemoryCacheStore::new()));
        assert_eq!(cache.get(Uuid::new_v4()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn set_then_get_per_goal() {
        let cache = BalanceCache::new(Arc::new(MemoryCacheStore::new()));
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        cache.set(a, dec!(85.25)).unwrap();
        cache.set(b, dec!(-3)).unwrap();
        cache.set(a, dec!(80)).unwrap();
        assert_eq!(cache.get(a).unwrap(), dec!(80));
        assert_eq!(cache.get(b).unwrap(), dec!(-3));
    }
}
