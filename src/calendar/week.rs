use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::{CalendarDate, CalendarDay};
use crate::period::PeriodScope;

/// A Monday-to-Sunday week, identified by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarWeek(CalendarDay);

impl CalendarWeek {
    pub fn monday(&self) -> CalendarDay {
        self.0
    }
}

impl CalendarDate for CalendarWeek {
    const SCOPE: PeriodScope = PeriodScope::Week;

    fn containing(day: CalendarDay) -> Self {
        let delta = day.date().weekday().num_days_from_monday() as i64;
        Self(day.subtract(delta))
    }

    fn first_day(&self) -> CalendarDay {
        self.0
    }

    fn checked_add(&self, n: i64) -> Option<Self> {
        self.0.checked_add(n.checked_mul(7)?).map(Self)
    }

    fn units_since(&self, earlier: &Self) -> i64 {
        // Both ends are Mondays so the day difference is an exact multiple of seven.
        self.0.days_since(&earlier.0) / 7
    }
}

impl fmt::Display for CalendarWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week of {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        CalendarDay::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn normalizes_to_monday() {
        // 2024-03-14 is a Thursday, 2024-03-17 a Sunday.
        assert_eq!(CalendarWeek::containing(day(2024, 3, 14)).monday(), day(2024, 3, 11));
        assert_eq!(CalendarWeek::containing(day(2024, 3, 17)).monday(), day(2024, 3, 11));
        assert_eq!(CalendarWeek::containing(day(2024, 3, 18)).monday(), day(2024, 3, 18));
        assert_eq!(
            CalendarWeek::containing(day(2024, 3, 14)).monday().weekday(),
            Weekday::Mon
        );
    }

    #[test]
    fn units_since_is_signed() {
        let a = CalendarWeek::containing(day(2024, 1, 3));
        let b = CalendarWeek::containing(day(2024, 2, 1));
        assert_eq!(b.units_since(&a), 4);
        assert_eq!(a.units_since(&b), -4);
    }

    #[test]
    fn add_spans_year_end() {
        let week = CalendarWeek::containing(day(2024, 12, 25));
        assert_eq!(week.add(1).monday(), day(2024, 12, 30));
        assert_eq!(week.add(2).monday(), day(2025, 1, 6));
    }
}
