//! In-memory stores used by tests and by hosts without their own persistence layer.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use rust_decimal::Decimal;
use uuid::Uuid;

use super::{CacheStore, GoalStore, Result, StoreError, StoreSnapshot};
use crate::calendar::DayInterval;
use crate::domain::common::{for_goal, remove_by_id, BelongsToGoal};
use crate::domain::{Adjustment, Expense, Goal};

#[derive(Debug, Clone, Default)]
struct StoreData {
    goals: HashMap<Uuid, Goal>,
    expenses: Vec<Expense>,
    adjustments: Vec<Adjustment>,
}

/// Thread-safe goal store whose snapshots are cheap immutable copies.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_goal(&self, goal: Goal) -> Result<Uuid> {
        let id = goal.id;
        self.write(|data| {
            data.goals.insert(id, goal);
        })?;
        Ok(id)
    }

    /// Applies `update` to the stored goal, returning whether it existed.
    pub fn update_goal<F>(&self, id: Uuid, update: F) -> Result<bool>
    where
        F: FnOnce(&mut Goal),
    {
        self.write(|data| match data.goals.get_mut(&id) {
            Some(goal) => {
                update(goal);
                true
            }
            None => false,
        })
    }

    /// Removes a goal together with its expenses and adjustments.
    pub fn remove_goal(&self, id: Uuid) -> Result<Option<Goal>> {
        self.write(|data| {
            data.expenses.retain(|expense| expense.goal_id() != id);
            data.adjustments.retain(|adjustment| adjustment.goal_id() != id);
            data.goals.remove(&id)
        })
    }

    pub fn add_expense(&self, expense: Expense) -> Result<Uuid> {
        let id = expense.id;
        self.write(|data| data.expenses.push(expense))?;
        Ok(id)
    }

    pub fn remove_expense(&self, id: Uuid) -> Result<bool> {
        self.write(|data| remove_by_id(&mut data.expenses, id))
    }

    pub fn add_adjustment(&self, adjustment: Adjustment) -> Result<Uuid> {
        let id = adjustment.id;
        self.write(|data| data.adjustments.push(adjustment))?;
        Ok(id)
    }

    pub fn remove_adjustment(&self, id: Uuid) -> Result<bool> {
        self.write(|data| remove_by_id(&mut data.adjustments, id))
    }

    fn write<T>(&self, apply: impl FnOnce(&mut StoreData) -> T) -> Result<T> {
        let mut guard = self
            .data
            .write()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        Ok(apply(&mut guard))
    }
}

impl GoalStore for MemoryStore {
    fn snapshot(&self) -> Result<Arc<dyn StoreSnapshot>> {
        let guard = self
            .data
            .read()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        Ok(Arc::new(MemorySnapshot {
            data: guard.clone(),
        }))
    }
}

/// Frozen copy of a [`MemoryStore`].
#[derive(Debug)]
struct MemorySnapshot {
    data: StoreData,
}

impl StoreSnapshot for MemorySnapshot {
    fn goal(&self, id: Uuid) -> Result<Option<Goal>> {
        Ok(self.data.goals.get(&id).cloned())
    }

    fn expenses(&self, goal_id: Uuid, interval: &DayInterval) -> Result<Vec<Expense>> {
        Ok(for_goal(&self.data.expenses, goal_id)
            .filter(|expense| interval.contains(expense.day))
            .cloned()
            .collect())
    }

    fn adjustments(&self, goal_id: Uuid, interval: &DayInterval) -> Result<Vec<Adjustment>> {
        Ok(for_goal(&self.data.adjustments, goal_id)
            .filter(|adjustment| adjustment.overlaps(interval))
            .cloned()
            .collect())
    }
}

/// Cache store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, Decimal>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<Decimal>> {
        let entries = self
            .entries
            .lock()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        Ok(entries.get(key).copied())
    }

    fn set(&self, key: &str, amount: Decimal) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|err| StoreError::Poisoned(err.to_string()))?;
        entries.insert(key.to_string(), amount);
        Ok(())
    }
}
