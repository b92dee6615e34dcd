use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CalendarDate, CalendarDay};

/// Half-open run of days `[start, end)`; an absent `end` extends indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayInterval {
    pub start: CalendarDay,
    pub end: Option<CalendarDay>,
}

impl DayInterval {
    pub fn new(start: CalendarDay, end: Option<CalendarDay>) -> Self {
        Self { start, end }
    }

    pub fn bounded(start: CalendarDay, end: CalendarDay) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn contains(&self, day: CalendarDay) -> bool {
        day >= self.start && self.end.map_or(true, |end| day < end)
    }

    /// Number of days, or `None` when open-ended.
    pub fn days(&self) -> Option<i64> {
        self.end.map(|end| end.days_since(&self.start).max(0))
    }

    /// Whether the inclusive range `first..=last` shares at least one day with the interval.
    pub fn intersects(&self, first: CalendarDay, last: CalendarDay) -> bool {
        self.overlap_days(first, last) > 0
    }

    /// Days shared with the inclusive range `first..=last`.
    ///
    /// `last` may be the final representable day; the count stays inclusive of it.
    pub fn overlap_days(&self, first: CalendarDay, last: CalendarDay) -> i64 {
        let lo = first.max(self.start);
        let hi = match self.end {
            Some(end) => match end.checked_subtract(1) {
                Some(last_inside) => last.min(last_inside),
                None => return 0,
            },
            None => last,
        };
        (hi.days_since(&lo) + 1).max(0)
    }
}

impl fmt::Display for DayInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}..{}", self.start, end),
            None => write!(f, "{}..", self.start),
        }
    }
}
