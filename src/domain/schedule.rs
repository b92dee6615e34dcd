use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{CalendarDate, CalendarDay, DayInterval};
use crate::domain::common::*;
use crate::period::{CalendarPeriod, Period};

/// A recurring amount credited to a goal, e.g. 300 per month.
///
/// Pay periods are phase-aligned to `start`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaySchedule {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub amount: Decimal,
    pub period: Period,
    pub start: CalendarDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<CalendarDay>,
}

impl PaySchedule {
    pub fn new(goal_id: Uuid, amount: Decimal, period: Period, start: CalendarDay) -> Self {
        Self {
            id: Uuid::new_v4(),
            goal_id,
            amount,
            period,
            start,
            end: None,
        }
    }

    /// Stops the schedule before `end` (exclusive).
    pub fn ending(mut self, end: CalendarDay) -> Self {
        self.end = Some(end);
        self
    }

    pub fn interval(&self) -> DayInterval {
        DayInterval::new(self.start, self.end)
    }

    pub fn is_active_on(&self, day: CalendarDay) -> bool {
        !self.period.is_none() && self.interval().contains(day)
    }

    /// The pay period instance containing `day`.
    pub fn pay_period_for(&self, day: CalendarDay) -> Option<CalendarPeriod> {
        CalendarPeriod::containing(day, self.period, self.start)
    }

    /// Amount accrued over `[from, until)`, prorated per day of each pay period.
    ///
    /// A day inside a pay period of `n` days accrues `amount / n`. Days outside the
    /// schedule's own interval accrue nothing.
    pub fn accrued(&self, from: CalendarDay, until: CalendarDay) -> Decimal {
        let from = from.max(self.start);
        let until = match self.end {
            Some(end) => until.min(end),
            None => until,
        };
        if from >= until {
            return Decimal::ZERO;
        }
        CalendarPeriod::covering(from, until, self.period, self.start)
            .filter_map(|pay_period| {
                let days = pay_period.days()?;
                let overlap = pay_period.interval().overlap_days(from, until.subtract(1));
                (overlap > 0 && days > 0)
                    .then(|| self.amount * Decimal::from(overlap) / Decimal::from(days))
            })
            .sum()
    }
}

impl Identifiable for PaySchedule {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToGoal for PaySchedule {
    fn goal_id(&self) -> Uuid {
        self.goal_id
    }
}
