//! Concrete period instances aligned to a reference start.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Period, PeriodScope};
use crate::calendar::{CalendarDate, CalendarDay, CalendarMonth, CalendarWeek, DayInterval};

/// The concrete `[start, end)` instance of a [`Period`] that contains some anchor day.
///
/// Boundaries are phase-aligned to `reference`: a two-week period referenced on a given
/// Monday always starts on that Monday plus a multiple of two weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarPeriod {
    start: CalendarDay,
    end: Option<CalendarDay>,
    period: Period,
    reference: CalendarDay,
    previous_start: CalendarDay,
}

impl CalendarPeriod {
    /// Finds the instance of `period` containing `anchor`, aligned to `reference`.
    ///
    /// Returns `None` for [`Period::NONE`], and when the instance or its predecessor would
    /// reach past the representable calendar (e.g. `Period::days(u32::MAX)`).
    ///
    /// # Panics
    ///
    /// Panics when the period has a real scope and a zero multiplier.
    pub fn containing(anchor: CalendarDay, period: Period, reference: CalendarDay) -> Option<Self> {
        match period.scope {
            PeriodScope::None => None,
            PeriodScope::Day => Self::align::<CalendarDay>(anchor, period, reference),
            PeriodScope::Week => Self::align::<CalendarWeek>(anchor, period, reference),
            PeriodScope::Month => Self::align::<CalendarMonth>(anchor, period, reference),
        }
    }

    /// An instance beginning at the unit containing `start` with no end.
    pub fn open_ended(start: CalendarDay, period: Period) -> Option<Self> {
        Self::containing(start, period, start).map(|aligned| Self {
            end: None,
            ..aligned
        })
    }

    fn align<D: CalendarDate>(
        anchor: CalendarDay,
        period: Period,
        reference: CalendarDay,
    ) -> Option<Self> {
        assert!(
            period.multiplier >= 1,
            "calendar period requires a multiplier of at least 1, got {}",
            period.multiplier
        );
        let k = i64::from(period.multiplier);
        let anchor_unit = D::containing(anchor);
        let reference_unit = D::containing(reference);
        let offset = anchor_unit.units_since(&reference_unit).rem_euclid(k);
        let start = anchor_unit.checked_subtract(offset)?;
        Some(Self {
            start: start.first_day(),
            end: Some(start.checked_add(k)?.first_day()),
            period,
            reference,
            previous_start: start.checked_subtract(k)?.first_day(),
        })
    }

    fn rederive(&self, anchor: CalendarDay) -> Option<Self> {
        Self::containing(anchor, self.period, self.reference)
    }

    pub fn start(&self) -> CalendarDay {
        self.start
    }

    pub fn end(&self) -> Option<CalendarDay> {
        self.end
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn reference(&self) -> CalendarDay {
        self.reference
    }

    pub fn previous_start(&self) -> CalendarDay {
        self.previous_start
    }

    /// The following instance; open-ended instances have none.
    pub fn next(&self) -> Option<Self> {
        self.end.and_then(|end| self.rederive(end))
    }

    /// The preceding instance. Open-ended instances have one too; it is `None` only at the
    /// lower edge of the representable calendar.
    pub fn previous(&self) -> Option<Self> {
        self.rederive(self.previous_start)
    }

    pub fn contains(&self, day: CalendarDay) -> bool {
        self.interval().contains(day)
    }

    pub fn days(&self) -> Option<i64> {
        self.interval().days()
    }

    pub fn interval(&self) -> DayInterval {
        DayInterval::new(self.start, self.end)
    }

    /// Consecutive instances covering `[from, until)`, starting with the one containing `from`.
    pub fn covering(
        from: CalendarDay,
        until: CalendarDay,
        period: Period,
        reference: CalendarDay,
    ) -> CalendarPeriods {
        CalendarPeriods {
            next: Self::containing(from, period, reference).filter(|_| from < until),
            until,
        }
    }
}

impl fmt::Display for CalendarPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.interval(), self.period)
    }
}

/// Iterator returned by [`CalendarPeriod::covering`].
#[derive(Debug, Clone)]
pub struct CalendarPeriods {
    next: Option<CalendarPeriod>,
    until: CalendarDay,
}

impl Iterator for CalendarPeriods {
    type Item = CalendarPeriod;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next().filter(|next| next.start < self.until);
        Some(current)
    }
}
