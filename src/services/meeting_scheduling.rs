use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::models::schedule::Schedule;
use crate::repositories::CalendarEventProvider;
use crate::services::optimal_slot::{calendar_events_as_slots, OptimalSlotConfig, OptimalSlotFinder, SlotSuggestion};

/// Wires the pure `OptimalSlotFinder` to a live calendar provider, unioning
/// a day's schedule blocks with its calendar events into one busy set per
/// the availability merger's contract. A provider error is downgraded to
/// an empty event list rather than surfaced — calendar data is best-effort
/// here, while the provider's own `get_events_for_range` call can still
/// fail loudly for callers that need that.
pub struct MeetingSchedulingService {
    calendar: Arc<dyn CalendarEventProvider>,
    finder: OptimalSlotFinder,
    max_search_range_days: i64,
}

impl MeetingSchedulingService {
    pub fn new(calendar: Arc<dyn CalendarEventProvider>, config: OptimalSlotConfig) -> Self {
        Self {
            calendar,
            max_search_range_days: config.max_search_range_days,
            finder: OptimalSlotFinder::new(config),
        }
    }

    /// Suggests slots for a 1:1 meeting given the user's already-loaded
    /// schedules for the search horizon. `schedule_for_day_offset` looks
    /// up (or returns `None` for) the Schedule covering `target_date +
    /// day_offset` days; the caller owns loading those via the schedule
    /// repository before calling this.
    pub async fn suggest_slots<'a, F>(
        &self,
        user_id: &str,
        target_date: DateTime<Utc>,
        duration: Duration,
        preferred_time_offset: Duration,
        max_suggestions: usize,
        schedule_for_day_offset: F,
    ) -> Vec<SlotSuggestion>
    where
        F: Fn(i64) -> Option<&'a Schedule>,
    {
        let mut busy_by_offset: Vec<Vec<crate::models::slot::TimeSlot>> = Vec::new();

        for day_offset in 0..self.max_search_range_days {
            let window_start = target_date + Duration::days(day_offset);
            let window_end = window_start + Duration::days(1);

            let mut busy = schedule_for_day_offset(day_offset)
                .map(|schedule| schedule.busy_intervals())
                .unwrap_or_default();

            match self
                .calendar
                .get_events_for_range(user_id, window_start, window_end)
                .await
            {
                Ok(events) => busy.extend(calendar_events_as_slots(&events)),
                Err(err) => {
                    warn!(user_id, %err, "calendar provider unavailable, treating range as event-free");
                }
            }

            busy_by_offset.push(busy);
        }

        self.finder.find_slots(
            target_date,
            duration,
            preferred_time_offset,
            max_suggestions,
            |day_offset, _window_start, _window_end| {
                busy_by_offset
                    .get(day_offset as usize)
                    .cloned()
                    .unwrap_or_default()
            },
        )
    }
}
