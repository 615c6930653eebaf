use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::block::BlockType;
use crate::models::habit::PreferredTimeOfDay;

/// Placement input record adapting a task, habit or meeting into
/// something the auto-scheduler can place without dispatching on block
/// type internally. Durations are stored as minute counts rather than
/// `chrono::Duration`, which has no stable serde representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulableItem {
    pub id: String,
    pub item_type: BlockType,
    pub reference_id: Option<String>,
    pub title: String,
    /// 1 = most urgent, 5 = least urgent.
    pub priority: u8,
    pub duration_minutes: i64,
    pub due_date: Option<DateTime<Utc>>,
    pub preferred_time: Option<PreferredTimeOfDay>,
    /// Preferred start-of-day offset, in minutes since midnight.
    pub preferred_start_offset_minutes: Option<i64>,
}

impl SchedulableItem {
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }

    pub fn preferred_start_offset(&self) -> Option<Duration> {
        self.preferred_start_offset_minutes.map(Duration::minutes)
    }

    /// Effective sort priority after the habit morning/evening boost:
    /// morning habits get boosted to 1, evening demoted to 4.
    pub fn effective_priority(&self) -> u8 {
        match self.preferred_time {
            Some(PreferredTimeOfDay::Morning) => 1,
            Some(PreferredTimeOfDay::Evening) => 4,
            _ => self.priority,
        }
    }
}
