use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::CalendarDay;
use crate::domain::common::*;

/// Money spent against a goal on a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub goal_id: Uuid,
    pub amount: Decimal,
    pub day: CalendarDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Expense {
    pub fn new(goal_id: Uuid, amount: Decimal, day: CalendarDay) -> Self {
        Self {
            id: Uuid::new_v4(),
            goal_id,
            amount,
            day,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl BelongsToGoal for Expense {
    fn goal_id(&self) -> Uuid {
        self.goal_id
    }
}
