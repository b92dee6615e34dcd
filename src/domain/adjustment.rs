use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{CalendarDay, DayInterval};
use crate::domain::common::*;

/// A manual correction spread at a daily rate over an inclusive range of days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Adjustment {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub amount_per_day: Decimal,
    pub first_day: CalendarDay,
    pub last_day: CalendarDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Adjustment {
    /// Creates an adjustment; `first_day` and `last_day` are swapped if given in reverse.
    pub fn new(
        goal_id: Uuid,
        amount_per_day: Decimal,
        first_day: CalendarDay,
        last_day: CalendarDay,
    ) -> Self {
        let (first_day, last_day) = if last_day < first_day {
            (last_day, first_day)
        } else {
            (first_day, last_day)
        };
        Self {
            id: Uuid::new_v4(),
            goal_id,
            amount_per_day,
            first_day,
            last_day,
            note: None,
        }
    }

    /// Spreads `total` evenly over `first_day..=last_day`.
    pub fn spread(
        goal_id: Uuid,
        total: Decimal,
        first_day: CalendarDay,
        last_day: CalendarDay,
    ) -> Self {
        let mut adjustment = Self::new(goal_id, Decimal::ZERO, first_day, last_day);
        adjustment.amount_per_day = total / Decimal::from(adjustment.days());
        adjustment
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Number of days in the effective range.
    pub fn days(&self) -> i64 {
        self.last_day.days_since(&self.first_day) + 1
    }

    /// Full value of the adjustment over its whole range.
    pub fn total(&self) -> Decimal {
        self.amount_per_day * Decimal::from(self.days())
    }

    pub fn overlaps(&self, interval: &DayInterval) -> bool {
        interval.intersects(self.first_day, self.last_day)
    }
}

impl Identifiable for Adjustment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToGoal for Adjustment {
    fn goal_id(&self) -> Uuid {
        self.goal_id
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        CalendarDay::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn spread_divides_total_by_inclusive_days() {
        let adjustment = Adjustment::spread(Uuid::new_v4(), dec!(50), day(2024, 1, 1), day(2024, 1, 10));
        assert_eq!(adjustment.days(), 10);
        assert_eq!(adjustment.amount_per_day, dec!(5));
        assert_eq!(adjustment.total(), dec!(50));
    }

    #[test]
    fn reversed_range_is_normalized() {
        let adjustment = Adjustment::new(Uuid::new_v4(), dec!(1), day(2024, 2, 5), day(2024, 2, 1));
        assert_eq!(adjustment.first_day, day(2024, 2, 1));
        assert_eq!(adjustment.last_day, day(2024, 2, 5));
    }
}
