use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::slot::TimeSlot;

/// An external calendar event, treated as a read-only busy window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CalendarEvent {
    pub fn as_slot(&self) -> TimeSlot {
        TimeSlot::new(self.start, self.end)
    }
}
