use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingCadence {
    Weekly,
    Biweekly,
    Monthly,
    Custom,
}

impl MeetingCadence {
    pub fn default_days(&self) -> Option<i64> {
        match self {
            MeetingCadence::Weekly => Some(7),
            MeetingCadence::Biweekly => Some(14),
            MeetingCadence::Monthly => Some(28),
            MeetingCadence::Custom => None,
        }
    }
}

/// Cadence-relevant fields of a recurring 1:1 meeting. Durations are
/// stored as plain minute counts rather than `chrono::Duration`, which
/// has no stable serde representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub cadence: MeetingCadence,
    pub cadence_days: i64,
    pub duration_minutes: i64,
    /// Preferred time, as minutes since midnight.
    pub preferred_time_offset_minutes: i64,
    pub last_held_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub archived: bool,
}

impl Meeting {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
        cadence: MeetingCadence,
        cadence_days: i64,
        duration_minutes: i64,
        preferred_time_offset: Duration,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if !(1..=90).contains(&cadence_days) {
            return Err(DomainError::invalid_input(
                "cadenceDays must be between 1 and 90",
            ));
        }
        if duration_minutes <= 0 {
            return Err(DomainError::invalid_input(
                "meeting duration must be positive",
            ));
        }
        Ok(Self {
            id: id.into(),
            user_id: user_id.into(),
            name: name.into(),
            cadence,
            cadence_days,
            duration_minutes,
            preferred_time_offset_minutes: preferred_time_offset.num_minutes(),
            last_held_at: None,
            created_at,
            archived: false,
        })
    }

    pub fn preferred_time_offset(&self) -> Duration {
        Duration::minutes(self.preferred_time_offset_minutes)
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }

    /// nextOccurrence(now) = lastHeldAt + cadenceDays if lastHeldAt ≠ nil
    /// else max(now, createdAt); archived meetings produce no next
    /// occurrence.
    pub fn next_occurrence(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.archived {
            return None;
        }
        match self.last_held_at {
            Some(last) => Some(last + Duration::days(self.cadence_days)),
            None => Some(now.max(self.created_at)),
        }
    }

    /// HeldAt is monotonic non-decreasing.
    pub fn record_held(&mut self, held_at: DateTime<Utc>) -> DomainResult<()> {
        if let Some(last) = self.last_held_at {
            if held_at < last {
                return Err(DomainError::invalid_input(
                    "heldAt must not move backward",
                ));
            }
        }
        self.last_held_at = Some(held_at);
        Ok(())
    }

    pub fn archive(&mut self) {
        self.archived = true;
    }

    pub fn restore(&mut self) {
        self.archived = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn next_occurrence_uses_created_at_when_never_held() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let meeting = Meeting::new(
            "m1",
            "u1",
            "1:1",
            MeetingCadence::Weekly,
            7,
            30,
            Duration::hours(9),
            created,
        )
        .unwrap();
        let earlier_now = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        assert_eq!(meeting.next_occurrence(earlier_now), Some(created));
    }

    #[test]
    fn archived_meeting_has_no_next_occurrence() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut meeting = Meeting::new(
            "m1",
            "u1",
            "1:1",
            MeetingCadence::Weekly,
            7,
            30,
            Duration::hours(9),
            created,
        )
        .unwrap();
        meeting.archive();
        assert_eq!(meeting.next_occurrence(created), None);
    }
}
