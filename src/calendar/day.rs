use std::fmt;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::CalendarDate;
use crate::period::PeriodScope;

/// A civil day, normalized to GMT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The day containing `instant` as observed in GMT.
    pub fn from_gmt(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    /// The day containing `instant` as observed in its own zone.
    ///
    /// A late-evening instant in UTC-5 yields that local date, not the following GMT date.
    pub fn from_local<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.date_naive())
    }

    /// Today on the host's local calendar.
    pub fn today() -> Self {
        Self::from_local(&Local::now())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Midnight GMT at the start of the day.
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn day_of_month(&self) -> u32 {
        self.0.day()
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(&self, earlier: &CalendarDay) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl CalendarDate for CalendarDay {
    const SCOPE: PeriodScope = PeriodScope::Day;

    fn containing(day: CalendarDay) -> Self {
        day
    }

    fn first_day(&self) -> CalendarDay {
        *self
    }

    fn checked_add(&self, n: i64) -> Option<Self> {
        let days = Days::new(n.unsigned_abs());
        let shifted = if n >= 0 {
            self.0.checked_add_days(days)
        } else {
            self.0.checked_sub_days(days)
        };
        shifted.map(Self)
    }

    fn units_since(&self, earlier: &Self) -> i64 {
        self.days_since(earlier)
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
