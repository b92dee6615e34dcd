//! Recurring period descriptions and their concrete calendar instances.

pub mod calendar_period;

use std::{fmt, str::FromStr};

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use calendar_period::{CalendarPeriod, CalendarPeriods};

use crate::calendar::CalendarDay;

/// Unit a [`Period`] is measured in.
///
/// Variant order is significant: scopes compare `None < Day < Week < Month`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum PeriodScope {
    #[default]
    None,
    Day,
    Week,
    Month,
}

impl PeriodScope {
    /// True iff `day` is the first day of the unit this scope denotes.
    pub fn conforms_to_date(self, day: CalendarDay) -> bool {
        match self {
            PeriodScope::None => false,
            PeriodScope::Day => true,
            PeriodScope::Week => day.weekday() == Weekday::Mon,
            PeriodScope::Month => day.day_of_month() == 1,
        }
    }

    fn noun(self) -> &'static str {
        match self {
            PeriodScope::None => "None",
            PeriodScope::Day => "Day",
            PeriodScope::Week => "Week",
            PeriodScope::Month => "Month",
        }
    }
}

impl fmt::Display for PeriodScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// An abstract recurring interval such as "2 weeks".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub scope: PeriodScope,
    pub multiplier: u32,
}

impl Period {
    /// The "no period" sentinel.
    pub const NONE: Period = Period {
        scope: PeriodScope::None,
        multiplier: 0,
    };

    /// Builds a period; `PeriodScope::None` always yields [`Period::NONE`].
    ///
    /// # Panics
    ///
    /// Panics when `multiplier` is zero for a real scope.
    pub fn new(scope: PeriodScope, multiplier: u32) -> Self {
        if scope == PeriodScope::None {
            return Self::NONE;
        }
        assert!(multiplier >= 1, "period multiplier must be at least 1");
        Self { scope, multiplier }
    }

    pub fn days(multiplier: u32) -> Self {
        Self::new(PeriodScope::Day, multiplier)
    }

    pub fn weeks(multiplier: u32) -> Self {
        Self::new(PeriodScope::Week, multiplier)
    }

    pub fn months(multiplier: u32) -> Self {
        Self::new(PeriodScope::Month, multiplier)
    }

    pub fn is_none(&self) -> bool {
        self.scope == PeriodScope::None
    }

    pub fn scope_conforms_to_date(&self, day: CalendarDay) -> bool {
        self.scope.conforms_to_date(day)
    }

    pub fn cadence_label(&self) -> String {
        match (self.scope, self.multiplier) {
            (PeriodScope::None, _) => "Never".into(),
            (PeriodScope::Day, 1) => "Daily".into(),
            (PeriodScope::Week, 1) => "Weekly".into(),
            (PeriodScope::Month, 1) => "Monthly".into(),
            (_, _) => format!("Every {}", self),
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.scope, self.multiplier) {
            (PeriodScope::None, _) => f.write_str("None"),
            (scope, 1) => f.write_str(scope.noun()),
            (scope, n) => write!(f, "{} {}s", n, scope.noun()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodParseError {
    #[error("empty period")]
    Empty,
    #[error("unknown period unit `{0}`")]
    UnknownUnit(String),
    #[error("invalid period multiplier `{0}`")]
    InvalidMultiplier(String),
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut parts = lowered.split_whitespace();
        let first = parts.next().ok_or(PeriodParseError::Empty)?;
        let (multiplier, unit) = match parts.next() {
            Some(unit) => {
                let multiplier = first
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n >= 1)
                    .ok_or_else(|| PeriodParseError::InvalidMultiplier(first.to_string()))?;
                (multiplier, unit)
            }
            None => (1, first),
        };
        if let Some(extra) = parts.next() {
            return Err(PeriodParseError::UnknownUnit(extra.to_string()));
        }
        let scope = match unit {
            "none" | "never" => return Ok(Period::NONE),
            "day" | "days" | "daily" => PeriodScope::Day,
            "week" | "weeks" | "weekly" => PeriodScope::Week,
            "month" | "months" | "monthly" => PeriodScope::Month,
            other => return Err(PeriodParseError::UnknownUnit(other.to_string())),
        };
        Ok(Period::new(scope, multiplier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        CalendarDay::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn orders_by_scope_then_multiplier() {
        let mut periods = vec![
            Period::months(1),
            Period::days(10),
            Period::weeks(2),
            Period::NONE,
            Period::weeks(1),
        ];
        periods.sort();
        assert_eq!(
            periods,
            vec![
                Period::NONE,
                Period::days(10),
                Period::weeks(1),
                Period::weeks(2),
                Period::months(1),
            ]
        );
    }

    #[test]
    fn formats_singular_and_plural() {
        assert_eq!(Period::weeks(1).to_string(), "Week");
        assert_eq!(Period::weeks(3).to_string(), "3 Weeks");
        assert_eq!(Period::days(2).to_string(), "2 Days");
        assert_eq!(Period::NONE.to_string(), "None");
        assert_eq!(Period::months(1).cadence_label(), "Monthly");
        assert_eq!(Period::weeks(2).cadence_label(), "Every 2 Weeks");
    }

    #[test]
    fn scope_conformance() {
        let monday = day(2024, 4, 1);
        let tuesday = day(2024, 4, 2);
        assert!(Period::weeks(1).scope_conforms_to_date(monday));
        assert!(!Period::weeks(1).scope_conforms_to_date(tuesday));
        assert!(Period::months(1).scope_conforms_to_date(monday));
        assert!(!Period::months(1).scope_conforms_to_date(tuesday));
        assert!(Period::days(1).scope_conforms_to_date(tuesday));
        assert!(!Period::NONE.scope_conforms_to_date(monday));
    }

    #[test]
    fn parses_common_forms() {
        assert_eq!("2 weeks".parse::<Period>().unwrap(), Period::weeks(2));
        assert_eq!("Month".parse::<Period>().unwrap(), Period::months(1));
        assert_eq!(" 10 Days ".parse::<Period>().unwrap(), Period::days(10));
        assert_eq!("none".parse::<Period>().unwrap(), Period::NONE);
        assert_eq!(
            "0 weeks".parse::<Period>(),
            Err(PeriodParseError::InvalidMultiplier("0".into()))
        );
        assert_eq!(
            "3 fortnights".parse::<Period>(),
            Err(PeriodParseError::UnknownUnit("fortnights".into()))
        );
        assert_eq!("".parse::<Period>(), Err(PeriodParseError::Empty));
    }

    #[test]
    #[should_panic(expected = "multiplier")]
    fn zero_multiplier_is_rejected() {
        let _ = Period::weeks(0);
    }
}
