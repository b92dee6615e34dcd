//! Shared traits for goal-scoped records.

use uuid::Uuid;

/// Exposes a stable identifier for stored records.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Associates a record with the goal it is booked against.
pub trait BelongsToGoal {
    fn goal_id(&self) -> Uuid;
}

/// Records booked against `goal_id`.
pub fn for_goal<T: BelongsToGoal>(records: &[T], goal_id: Uuid) -> impl Iterator<Item = &T> + '_ {
    records.iter().filter(move |record| record.goal_id() == goal_id)
}

/// Removes the record with `id`, returning whether one was present.
pub fn remove_by_id<T: Identifiable>(records: &mut Vec<T>, id: Uuid) -> bool {
    let before = records.len();
    records.retain(|record| record.id() != id);
    before != records.len()
}
