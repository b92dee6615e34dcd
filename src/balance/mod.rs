//! Balance aggregation: paid-in amount plus adjustments minus expenses, per billing period.

pub mod aggregator;
pub mod cache;
pub mod sources;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use aggregator::{BalanceAggregator, BatchError, BatchItem};
pub use cache::BalanceCache;
pub use sources::{
    overlapping_amount, AdjustmentSource, BalanceSources, ExpenseSource, OverlapAdjustmentTotal,
    PaidAmountSource, PeriodExpenseTotal, ProratedPaidAmount,
};

use crate::calendar::CalendarDay;

/// A goal's balance on a day; `amount` is `None` when no schedule or period covers the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalanceResult {
    pub goal_id: Uuid,
    pub day: CalendarDay,
    pub amount: Option<Decimal>,
}

impl BalanceResult {
    pub fn absent(goal_id: Uuid, day: CalendarDay) -> Self {
        Self {
            goal_id,
            day,
            amount: None,
        }
    }

    /// `paid + adjustments - expenses`, or absent when nothing was paid in.
    pub fn combine(
        goal_id: Uuid,
        day: CalendarDay,
        paid: Option<Decimal>,
        expenses: Decimal,
        adjustments: Decimal,
    ) -> Self {
        Self {
            goal_id,
            day,
            amount: paid.map(|paid| paid + adjustments - expenses),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.amount.is_none()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn combine_applies_signed_formula() {
        let day = CalendarDay::from_ymd_opt(2024, 1, 10).unwrap();
        let result = BalanceResult::combine(Uuid::nil(), day, Some(dec!(100.00)), dec!(19.75), dec!(5.00));
        assert_eq!(result.amount, Some(dec!(85.25)));
    }

    #[test]
    fn combine_propagates_absence() {
        let day = CalendarDay::from_ymd_opt(2024, 1, 10).unwrap();
        let result = BalanceResult::combine(Uuid::nil(), day, None, dec!(19.75), dec!(5.00));
        assert!(result.is_absent());
    }
}
