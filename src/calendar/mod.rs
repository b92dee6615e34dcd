//! Timezone-independent calendar units.
//!
//! Every value is normalized to the first day of its unit on the civil calendar in GMT, so
//! equality and ordering never depend on the caller's local timezone.

pub mod day;
pub mod interval;
pub mod month;
pub mod week;

use std::{fmt, hash::Hash};

pub use day::CalendarDay;
pub use interval::DayInterval;
pub use month::CalendarMonth;
pub use week::CalendarWeek;

use crate::period::PeriodScope;

/// Shared contract of the day, week and month units.
pub trait CalendarDate: Copy + Ord + Hash + fmt::Debug + Send + Sync {
    /// Period scope this unit represents.
    const SCOPE: PeriodScope;

    /// The unit containing `day`.
    fn containing(day: CalendarDay) -> Self;

    /// First day of the unit.
    fn first_day(&self) -> CalendarDay;

    /// The unit `n` whole units later (earlier for negative `n`), or `None` when it falls
    /// outside the representable calendar.
    fn checked_add(&self, n: i64) -> Option<Self>;

    /// Signed number of whole units from `earlier` to `self`.
    fn units_since(&self, earlier: &Self) -> i64;

    /// Returns the unit `n` whole units later (earlier for negative `n`).
    ///
    /// # Panics
    ///
    /// Panics when the result falls outside the representable calendar.
    fn add(&self, n: i64) -> Self {
        self.checked_add(n)
            .unwrap_or_else(|| panic!("calendar arithmetic out of range: {self:?} + {n}"))
    }

    fn checked_subtract(&self, n: i64) -> Option<Self> {
        self.checked_add(n.checked_neg()?)
    }

    fn subtract(&self, n: i64) -> Self {
        self.add(-n)
    }

    /// First day of the following unit.
    fn end_day(&self) -> CalendarDay {
        self.add(1).first_day()
    }

    /// Last day belonging to the unit.
    fn last_day(&self) -> CalendarDay {
        self.end_day().subtract(1)
    }

    /// Number of days the unit spans.
    fn days(&self) -> i64 {
        self.end_day().days_since(&self.first_day())
    }

    fn contains(&self, day: CalendarDay) -> bool {
        day >= self.first_day() && day < self.end_day()
    }
}
