use chrono::{DateTime, Local, Utc};

use crate::calendar::CalendarDay;

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current day. Defaults to the GMT day of `now()`.
    fn today(&self) -> CalendarDay {
        CalendarDay::from_gmt(self.now())
    }
}

/// Wall clock whose `today` follows the host's local calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> CalendarDay {
        CalendarDay::from_local(&Local::now())
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDay);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.start_instant()
    }

    fn today(&self) -> CalendarDay {
        self.0
    }
}
