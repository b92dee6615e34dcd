#![doc(test(attr(deny(warnings))))]

//! Goal Balance provides calendar periods that stay phase-aligned to a reference day and a
//! concurrent engine that turns pay schedules, expenses and adjustments into per-period
//! goal balances.

pub mod balance;
pub mod calendar;
pub mod config;
pub mod domain;
pub mod errors;
pub mod period;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

pub use balance::{BalanceAggregator, BalanceResult, BatchError};
pub use calendar::{CalendarDate, CalendarDay, CalendarMonth, CalendarWeek, DayInterval};
pub use errors::{BalanceError, Result};
pub use period::{CalendarPeriod, Period, PeriodScope};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    init_logging(None);
}

/// Like [`init`], honouring the configured `log_filter`.
pub fn init_with_config(config: &config::EngineConfig) {
    init_logging(config.log_filter.as_deref());
}

fn init_logging(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("Goal balance tracing initialized.");
    });
}
