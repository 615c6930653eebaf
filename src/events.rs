use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain event payloads the core constructs but does not deliver — the
/// outbox they'd be appended to lives outside this crate. Each payload
/// carries the aggregate id, user id, and old/new values where named in
/// the external interfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    TaskCreated {
        task_id: String,
        user_id: String,
    },
    TaskCompleted {
        task_id: String,
        user_id: String,
        completed_at: DateTime<Utc>,
    },
    HabitLogged {
        habit_id: String,
        user_id: String,
        day: chrono::NaiveDate,
    },
    MeetingHeld {
        meeting_id: String,
        user_id: String,
        held_at: DateTime<Utc>,
    },
    MeetingCadenceAdjusted {
        meeting_id: String,
        user_id: String,
        old_cadence_days: i64,
        new_cadence_days: i64,
    },
    HabitFrequencyAdjusted {
        habit_id: String,
        user_id: String,
        old_times_per_week: Option<u8>,
        new_times_per_week: Option<u8>,
    },
    BlockScheduled {
        block_id: String,
        user_id: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    BlockRescheduled {
        block_id: String,
        user_id: String,
        old_start: DateTime<Utc>,
        old_end: DateTime<Utc>,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    },
}
