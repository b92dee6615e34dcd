//! The three independently computed totals that make up a balance.
//!
//! Each total sits behind its own trait so hosts and tests can substitute an alternative
//! computation without touching the aggregator.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::calendar::{CalendarDate, CalendarDay, DayInterval};
use crate::domain::Goal;
use crate::period::CalendarPeriod;
use crate::storage::{Result, StoreSnapshot};

/// Computes the amount paid into a goal from the start of `period` through `day`.
pub trait PaidAmountSource: Send + Sync {
    /// Returns `None` when no schedule is active on `day`.
    fn total_paid(
        &self,
        snapshot: &dyn StoreSnapshot,
        goal: &Goal,
        day: CalendarDay,
        period: &CalendarPeriod,
    ) -> Result<Option<Decimal>>;
}

/// Computes the total spent against a goal within a period.
pub trait ExpenseSource: Send + Sync {
    fn total_expenses(
        &self,
        snapshot: &dyn StoreSnapshot,
        goal: &Goal,
        period: &CalendarPeriod,
    ) -> Result<Decimal>;
}

/// Computes the net manual adjustments falling within a period.
pub trait AdjustmentSource: Send + Sync {
    fn total_adjustments(
        &self,
        snapshot: &dyn StoreSnapshot,
        goal: &Goal,
        period: &CalendarPeriod,
    ) -> Result<Decimal>;
}

/// Daily-prorated income from the goal's pay schedules.
///
/// Each day from the period start through the target day inclusive accrues the share of the
/// active schedule's amount for that day's pay period.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProratedPaidAmount;

impl PaidAmountSource for ProratedPaidAmount {
    fn total_paid(
        &self,
        _snapshot: &dyn StoreSnapshot,
        goal: &Goal,
        day: CalendarDay,
        period: &CalendarPeriod,
    ) -> Result<Option<Decimal>> {
        if goal.active_schedule(day).is_none() {
            return Ok(None);
        }
        let from = period.start();
        let until = day.add(1);
        let total = goal
            .schedule_segments()
            .map(|(schedule, segment)| {
                let lo = from.max(segment.start);
                let hi = segment.end.map_or(until, |end| end.min(until));
                if lo < hi {
                    schedule.accrued(lo, hi)
                } else {
                    Decimal::ZERO
                }
            })
            .sum();
        Ok(Some(total))
    }
}

/// Sum of expenses booked on days inside the period.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodExpenseTotal;

impl ExpenseSource for PeriodExpenseTotal {
    fn total_expenses(
        &self,
        snapshot: &dyn StoreSnapshot,
        goal: &Goal,
        period: &CalendarPeriod,
    ) -> Result<Decimal> {
        let interval = period.interval();
        Ok(snapshot
            .expenses(goal.id, &interval)?
            .iter()
            .filter(|expense| interval.contains(expense.day))
            .map(|expense| expense.amount)
            .sum())
    }
}

/// Sum of adjustments, each weighted by the days it shares with the period.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapAdjustmentTotal;

impl AdjustmentSource for OverlapAdjustmentTotal {
    fn total_adjustments(
        &self,
        snapshot: &dyn StoreSnapshot,
        goal: &Goal,
        period: &CalendarPeriod,
    ) -> Result<Decimal> {
        let interval = period.interval();
        Ok(snapshot
            .adjustments(goal.id, &interval)?
            .iter()
            .map(|adjustment| {
                overlapping_amount(
                    adjustment.amount_per_day,
                    adjustment.first_day,
                    adjustment.last_day,
                    &interval,
                )
            })
            .sum())
    }
}

/// Portion of a daily-rate amount over `first..=last` that falls inside `interval`.
pub fn overlapping_amount(
    amount_per_day: Decimal,
    first: CalendarDay,
    last: CalendarDay,
    interval: &DayInterval,
) -> Decimal {
    amount_per_day * Decimal::from(interval.overlap_days(first, last))
}

/// The set of strategies a [`BalanceAggregator`](super::BalanceAggregator) combines.
#[derive(Clone)]
pub struct BalanceSources {
    pub paid: Arc<dyn PaidAmountSource>,
    pub expenses: Arc<dyn ExpenseSource>,
    pub adjustments: Arc<dyn AdjustmentSource>,
}

impl BalanceSources {
    pub fn with_paid(mut self, paid: impl PaidAmountSource + 'static) -> Self {
        self.paid = Arc::new(paid);
        self
    }

    pub fn with_expenses(mut self, expenses: impl ExpenseSource + 'static) -> Self {
        self.expenses = Arc::new(expenses);
        self
    }

    pub fn with_adjustments(mut self, adjustments: impl AdjustmentSource + 'static) -> Self {
        self.adjustments = Arc::new(adjustments);
        self
    }
}

impl Default for BalanceSources {
    fn default() -> Self {
        Self {
            paid: Arc::new(ProratedPaidAmount),
            expenses: Arc::new(PeriodExpenseTotal),
            adjustments: Arc::new(OverlapAdjustmentTotal),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{Adjustment, Expense, PaySchedule};
    use crate::period::Period;
    use crate::storage::{GoalStore, MemoryStore};

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        CalendarDay::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_goal() -> Goal {
        let mut goal = Goal::new("Groceries", Period::months(1), day(2024, 1, 1));
        goal.add_schedule(PaySchedule::new(goal.id, dec!(310), Period::months(1), day(2024, 1, 1)));
        goal
    }

    #[test]
    fn overlap_weighting_counts_only_shared_days() {
        let interval = DayInterval::bounded(day(2024, 1, 8), day(2024, 1, 11));
        let amount = overlapping_amount(dec!(2), day(2024, 1, 1), day(2024, 1, 10), &interval);
        assert_eq!(amount, dec!(6));
        let disjoint = overlapping_amount(dec!(2), day(2024, 2, 1), day(2024, 2, 10), &interval);
        assert_eq!(disjoint, Decimal::ZERO);
    }

    #[test]
    fn prorated_paid_amount_runs_through_target_day() {
        let store = MemoryStore::new();
        let snapshot = store.snapshot().unwrap();
        let goal = monthly_goal();
        let period = goal.period_for(day(2024, 1, 10)).unwrap();
        let paid = ProratedPaidAmount
            .total_paid(snapshot.as_ref(), &goal, day(2024, 1, 10), &period)
            .unwrap();
        assert_eq!(paid, Some(dec!(100)));
    }

    #[test]
    fn paid_amount_switches_schedule_mid_period() {
        let store = MemoryStore::new();
        let snapshot = store.snapshot().unwrap();
        let mut goal = monthly_goal();
        goal.add_schedule(PaySchedule::new(goal.id, dec!(620), Period::months(1), day(2024, 1, 11)));
        let period = goal.period_for(day(2024, 1, 20)).unwrap();
        // Ten days at 310/31, then ten days at 620/31. Month-scoped pay periods start on the
        // first, so the new schedule's pay period is still January.
        let paid = ProratedPaidAmount
            .total_paid(snapshot.as_ref(), &goal, day(2024, 1, 20), &period)
            .unwrap();
        assert_eq!(paid, Some(dec!(300)));
    }

    #[test]
    fn paid_amount_is_absent_without_active_schedule() {
        let store = MemoryStore::new();
        let snapshot = store.snapshot().unwrap();
        let goal = Goal::new("Empty", Period::months(1), day(2024, 1, 1));
        let period = goal.period_for(day(2024, 1, 5)).unwrap();
        let paid = ProratedPaidAmount
            .total_paid(snapshot.as_ref(), &goal, day(2024, 1, 5), &period)
            .unwrap();
        assert_eq!(paid, None);
    }

    #[test]
    fn expense_and_adjustment_totals_are_period_scoped() {
        let store = MemoryStore::new();
        let goal = monthly_goal();
        let goal_id: Uuid = store.insert_goal(goal.clone()).unwrap();
        store.add_expense(Expense::new(goal_id, dec!(12.50), day(2024, 1, 3))).unwrap();
        store.add_expense(Expense::new(goal_id, dec!(7.25), day(2024, 1, 31))).unwrap();
        store.add_expense(Expense::new(goal_id, dec!(100), day(2024, 2, 1))).unwrap();
        store
            .add_adjustment(Adjustment::new(goal_id, dec!(1), day(2023, 12, 30), day(2024, 1, 2)))
            .unwrap();
        store
            .add_adjustment(Adjustment::new(goal_id, dec!(-0.5), day(2024, 1, 30), day(2024, 2, 10)))
            .unwrap();

        let snapshot = store.snapshot().unwrap();
        let period = goal.period_for(day(2024, 1, 15)).unwrap();
        let expenses = PeriodExpenseTotal
            .total_expenses(snapshot.as_ref(), &goal, &period)
            .unwrap();
        let adjustments = OverlapAdjustmentTotal
            .total_adjustments(snapshot.as_ref(), &goal, &period)
            .unwrap();
        assert_eq!(expenses, dec!(19.75));
        // Two days of +1 and two days of -0.5.
        assert_eq!(adjustments, dec!(1));
    }
}
