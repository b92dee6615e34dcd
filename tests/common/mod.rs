#![allow(dead_code)]

use std::sync::Arc;

use goal_balance::{
    domain::{Adjustment, Expense, Goal, PaySchedule},
    storage::{GoalStore, MemoryStore, StoreError, StoreSnapshot},
    CalendarDay, Period,
};
use rust_decimal_macros::dec;
use uuid::Uuid;

pub fn day(y: i32, m: u32, d: u32) -> CalendarDay {
    CalendarDay::from_ymd_opt(y, m, d).expect("valid calendar day")
}

/// Monthly goal from 2024-01-01 paid 310 per month, with 19.75 spent and 5.00 adjusted in
/// January plus records outside January that must not count.
pub fn january_goal(store: &MemoryStore) -> Uuid {
    let mut goal = Goal::new("Groceries", Period::months(1), day(2024, 1, 1));
    goal.add_schedule(PaySchedule::new(goal.id, dec!(310), Period::months(1), day(2024, 1, 1)));
    let goal_id = store.insert_goal(goal).expect("insert goal");

    for (amount, on) in [
        (dec!(12.50), day(2024, 1, 3)),
        (dec!(7.25), day(2024, 1, 28)),
        (dec!(40), day(2023, 12, 31)),
        (dec!(60), day(2024, 2, 1)),
    ] {
        store
            .add_expense(Expense::new(goal_id, amount, on))
            .expect("add expense");
    }
    store
        .add_adjustment(Adjustment::new(goal_id, dec!(1), day(2024, 1, 20), day(2024, 1, 23)))
        .expect("add adjustment");
    store
        .add_adjustment(Adjustment::new(goal_id, dec!(1), day(2023, 12, 31), day(2024, 1, 1)))
        .expect("add adjustment");
    goal_id
}

/// Fortnightly goal from Monday 2024-01-01 paid 140 every two weeks.
pub fn fortnight_goal(store: &MemoryStore) -> Uuid {
    let mut goal = Goal::new("Transport", Period::weeks(2), day(2024, 1, 1));
    goal.add_schedule(PaySchedule::new(goal.id, dec!(140), Period::weeks(2), day(2024, 1, 1)));
    let goal_id = store.insert_goal(goal).expect("insert goal");
    store
        .add_expense(Expense::new(goal_id, dec!(9), day(2024, 1, 16)))
        .expect("add expense");
    goal_id
}

pub fn seeded_store() -> (Arc<MemoryStore>, Uuid, Uuid) {
    let store = Arc::new(MemoryStore::new());
    let monthly = january_goal(&store);
    let fortnightly = fortnight_goal(&store);
    (store, monthly, fortnightly)
}

/// Store whose snapshots can never be taken.
pub struct UnavailableStore;

impl GoalStore for UnavailableStore {
    fn snapshot(&self) -> Result<Arc<dyn StoreSnapshot>, StoreError> {
        Err(StoreError::Unavailable("database offline".into()))
    }
}
