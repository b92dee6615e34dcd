use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{CalendarDate, CalendarDay};
use crate::period::PeriodScope;

/// A calendar month, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarMonth(CalendarDay);

impl CalendarMonth {
    pub fn year(&self) -> i32 {
        self.0.date().year()
    }

    pub fn month(&self) -> u32 {
        self.0.date().month()
    }

    pub fn days_in_month(&self) -> u32 {
        self.days() as u32
    }

    fn index(&self) -> i64 {
        self.year() as i64 * 12 + self.month() as i64 - 1
    }

    fn from_index(index: i64) -> Option<Self> {
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = index.rem_euclid(12) as u32 + 1;
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self(CalendarDay::from_date(first)))
    }
}

impl CalendarDate for CalendarMonth {
    const SCOPE: PeriodScope = PeriodScope::Month;

    fn containing(day: CalendarDay) -> Self {
        let date = day.date();
        Self(CalendarDay::from_date(date - Days::new(u64::from(date.day0()))))
    }

    fn first_day(&self) -> CalendarDay {
        self.0
    }

    fn checked_add(&self, n: i64) -> Option<Self> {
        Self::from_index(self.index().checked_add(n)?)
    }

    fn units_since(&self, earlier: &Self) -> i64 {
        self.index() - earlier.index()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.date().format("%Y-%m"))
    }
}
