//! Goal-side records consumed by the balance engine.

pub mod adjustment;
pub mod common;
pub mod expense;
pub mod goal;
pub mod schedule;

pub use adjustment::Adjustment;
pub use common::{BelongsToGoal, Identifiable};
pub use expense::Expense;
pub use goal::Goal;
pub use schedule::PaySchedule;
