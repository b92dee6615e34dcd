use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{CalendarDay, DayInterval};
use crate::config::{ConfigError, EngineConfig};
use crate::domain::{common::*, PaySchedule};
use crate::period::{CalendarPeriod, Period};

/// A savings or spending goal whose balance is tracked per billing period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    /// Billing period the balance resets on.
    pub period: Period,
    /// Phase reference for billing periods and the first day the goal is active.
    pub start: CalendarDay,
    /// First day the goal is no longer active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<CalendarDay>,
    /// Pay schedules ordered by start day; a later schedule supersedes earlier ones.
    #[serde(default)]
    pub schedules: Vec<PaySchedule>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(name: impl Into<String>, period: Period, start: CalendarDay) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            period,
            start,
            end: None,
            schedules: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Creates a goal billed on the configured `default_period`.
    pub fn from_config(
        name: impl Into<String>,
        start: CalendarDay,
        config: &EngineConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(name, config.default_period()?, start))
    }

    pub fn ending(mut self, end: CalendarDay) -> Self {
        self.end = Some(end);
        self
    }

    /// Adds a schedule, keeping the list ordered by start day.
    pub fn add_schedule(&mut self, mut schedule: PaySchedule) -> Uuid {
        schedule.goal_id = self.id;
        let id = schedule.id;
        let index = self
            .schedules
            .partition_point(|existing| existing.start <= schedule.start);
        self.schedules.insert(index, schedule);
        id
    }

    /// Removes the schedule with `id`, returning whether it was present.
    pub fn remove_schedule(&mut self, id: Uuid) -> bool {
        remove_by_id(&mut self.schedules, id)
    }

    pub fn interval(&self) -> DayInterval {
        DayInterval::new(self.start, self.end)
    }

    pub fn is_active_on(&self, day: CalendarDay) -> bool {
        self.interval().contains(day)
    }

    /// The billing period containing `day`, or `None` when the goal is not active that day.
    pub fn period_for(&self, day: CalendarDay) -> Option<CalendarPeriod> {
        if !self.is_active_on(day) {
            return None;
        }
        CalendarPeriod::containing(day, self.period, self.start)
    }

    /// The schedule paying into the goal on `day`.
    ///
    /// Only the most recently started schedule is considered; if it has ended, nothing is
    /// active until a newer one begins.
    pub fn active_schedule(&self, day: CalendarDay) -> Option<&PaySchedule> {
        self.schedules
            .iter()
            .rev()
            .find(|schedule| schedule.start <= day)
            .filter(|schedule| schedule.is_active_on(day))
    }

    /// Each schedule paired with the days it is in charge of.
    pub fn schedule_segments(&self) -> impl Iterator<Item = (&PaySchedule, DayInterval)> + '_ {
        self.schedules.iter().enumerate().map(|(index, schedule)| {
            let superseded_at = self.schedules.get(index + 1).map(|next| next.start);
            let end = match (schedule.end, superseded_at) {
                (Some(end), Some(next)) => Some(end.min(next)),
                (end, next) => end.or(next),
            };
            (schedule, DayInterval::new(schedule.start, end))
        })
    }
}

impl Identifiable for Goal {
    fn id(&self) -> Uuid {
        self.id
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
    fn period_for_respects_goal_bounds() {
        let goal = Goal::new("Groceries", Period::months(1), day(2024, 1, 1)).ending(day(2024, 6, 1));
        assert!(goal.period_for(day(2023, 12, 31)).is_none());
        assert!(goal.period_for(day(2024, 6, 1)).is_none());
        let period = goal.period_for(day(2024, 5, 31)).unwrap();
        assert_eq!(period.start(), day(2024, 5, 1));
    }

    #[test]
    fn config_supplies_default_billing_period() {
        let config = EngineConfig {
            default_period: "2 weeks".into(),
            ..EngineConfig::default()
        };
        let goal = Goal::from_config("Commute", day(2024, 1, 1), &config).unwrap();
        assert_eq!(goal.period, Period::weeks(2));
        assert_eq!(goal.period_for(day(2024, 1, 20)).unwrap().start(), day(2024, 1, 15));

        let monthly = Goal::from_config("Rent", day(2024, 1, 1), &EngineConfig::default()).unwrap();
        assert_eq!(monthly.period, Period::months(1));

        let bad = EngineConfig {
            default_period: "sometimes".into(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            Goal::from_config("Nope", day(2024, 1, 1), &bad),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn removing_a_schedule_hands_days_back_to_the_previous_one() {
        let mut goal = Goal::new("Dining", Period::months(1), day(2024, 1, 1));
        goal.add_schedule(PaySchedule::new(goal.id, dec!(100), Period::months(1), day(2024, 1, 1)));
        let newer =
            goal.add_schedule(PaySchedule::new(goal.id, dec!(200), Period::months(1), day(2024, 3, 1)));
        assert!(goal.remove_schedule(newer));
        assert!(!goal.remove_schedule(newer));
        assert_eq!(goal.active_schedule(day(2024, 3, 10)).unwrap().amount, dec!(100));
    }

    #[test]
    fn goal_without_billing_period_has_no_periods() {
        let goal = Goal::new("Loose", Period::NONE, day(2024, 1, 1));
        assert!(goal.period_for(day(2024, 2, 1)).is_none());
    }

    #[test]
    fn newer_schedule_supersedes_older_one() {
        let mut goal = Goal::new("Dining", Period::months(1), day(2024, 1, 1));
        goal.add_schedule(PaySchedule::new(goal.id, dec!(200), Period::months(1), day(2024, 3, 1)));
        goal.add_schedule(PaySchedule::new(goal.id, dec!(100), Period::months(1), day(2024, 1, 1)));
        assert_eq!(goal.schedules[0].amount, dec!(100));
        assert_eq!(goal.active_schedule(day(2024, 2, 10)).unwrap().amount, dec!(100));
        assert_eq!(goal.active_schedule(day(2024, 3, 1)).unwrap().amount, dec!(200));
        assert!(goal.active_schedule(day(2023, 12, 1)).is_none());

        let segments: Vec<_> = goal.schedule_segments().map(|(_, interval)| interval).collect();
        assert_eq!(segments[0], DayInterval::bounded(day(2024, 1, 1), day(2024, 3, 1)));
        assert_eq!(segments[1], DayInterval::new(day(2024, 3, 1), None));
    }

    #[test]
    fn ended_latest_schedule_leaves_no_active_schedule() {
        let mut goal = Goal::new("Travel", Period::months(1), day(2024, 1, 1));
        goal.add_schedule(
            PaySchedule::new(goal.id, dec!(50), Period::weeks(1), day(2024, 1, 1)).ending(day(2024, 2, 1)),
        );
        assert!(goal.active_schedule(day(2024, 1, 31)).is_some());
        assert!(goal.active_schedule(day(2024, 2, 1)).is_none());
    }
}
