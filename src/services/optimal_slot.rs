use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::calendar_event::CalendarEvent;
use crate::models::slot::TimeSlot;
use crate::services::availability::find_available_slots;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotQuality {
    Ideal = 1,
    Good = 2,
    Acceptable = 3,
    Poor = 4,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSuggestion {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub quality: SlotQuality,
    pub reason: String,
}

#[derive(Debug, Clone, Copy)]
pub struct OptimalSlotConfig {
    pub work_start: Duration,
    pub work_end: Duration,
    pub min_break: Duration,
    pub max_search_range_days: i64,
    pub prefer_mornings: bool,
    pub avoid_fridays: bool,
}

impl Default for OptimalSlotConfig {
    fn default() -> Self {
        Self {
            work_start: Duration::hours(9),
            work_end: Duration::hours(17),
            min_break: Duration::minutes(5),
            max_search_range_days: 14,
            prefer_mornings: true,
            avoid_fridays: false,
        }
    }
}

pub struct OptimalSlotFinder {
    config: OptimalSlotConfig,
}

impl OptimalSlotFinder {
    pub fn new(config: OptimalSlotConfig) -> Self {
        Self { config }
    }

    /// Ranks candidate windows for a single meeting across the search
    /// horizon, using busy-set snapshots supplied per day by the caller
    /// (schedule blocks ∪ calendar events) so this stays a pure function
    /// with no repository access of its own.
    pub fn find_slots<F>(
        &self,
        target_date: DateTime<Utc>,
        duration: Duration,
        preferred_time_offset: Duration,
        max_suggestions: usize,
        mut busy_for_day: F,
    ) -> Vec<SlotSuggestion>
    where
        F: FnMut(i64, DateTime<Utc>, DateTime<Utc>) -> Vec<TimeSlot>,
    {
        let mut suggestions = Vec::new();
        let required = duration + self.config.min_break;

        for day_offset in 0..self.config.max_search_range_days {
            let day_start = day_start_at(target_date) + Duration::days(day_offset);
            if self.config.avoid_fridays && day_start.weekday() == Weekday::Fri {
                continue;
            }

            let window_start = day_start + self.config.work_start;
            let window_end = day_start + self.config.work_end;
            let busy = busy_for_day(day_offset, window_start, window_end);

            let gaps = find_available_slots(
                window_start,
                window_end,
                &busy,
                required,
                self.config.min_break,
            );

            let preferred_start = day_start + preferred_time_offset;

            for gap in gaps {
                let (start, quality, reason) =
                    self.score_gap(gap, preferred_start, day_offset, duration);
                suggestions.push(SlotSuggestion {
                    start,
                    end: start + duration,
                    quality,
                    reason,
                });
            }

            if suggestions.len() >= 2 * max_suggestions {
                break;
            }
        }

        suggestions.sort_by(|a, b| a.quality.cmp(&b.quality).then_with(|| a.start.cmp(&b.start)));
        suggestions.truncate(max_suggestions);
        suggestions
    }

    fn score_gap(
        &self,
        gap: TimeSlot,
        preferred_start: DateTime<Utc>,
        day_offset: i64,
        duration: Duration,
    ) -> (DateTime<Utc>, SlotQuality, String) {
        if gap.contains_instant(preferred_start) && preferred_start + duration <= gap.end {
            let quality = if day_offset == 0 {
                SlotQuality::Ideal
            } else {
                SlotQuality::Acceptable
            };
            return (preferred_start, quality, "matches preferred time".to_string());
        }

        if day_offset == 0 {
            let morning_note = if self.config.prefer_mornings && gap.start.hour() < 12 {
                " (morning)"
            } else {
                ""
            };
            return (
                gap.start,
                SlotQuality::Good,
                format!("same-day availability{morning_note}"),
            );
        }

        (gap.start, SlotQuality::Acceptable, "future-day availability".to_string())
    }

    /// CheckAvailability(user, start, end) — true iff no schedule block
    /// or calendar event overlaps `[start, end)` (half-open semantics).
    pub fn check_availability(
        busy: &[TimeSlot],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> bool {
        !busy.iter().any(|slot| slot.start < end && slot.end > start)
    }
}

fn day_start_at(dt: DateTime<Utc>) -> DateTime<Utc> {
    let naive = dt.date_naive().and_hms_opt(0, 0, 0).expect("midnight");
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
}

pub(crate) fn calendar_events_as_slots(events: &[CalendarEvent]) -> Vec<TimeSlot> {
    events.iter().map(|e| e.as_slot()).collect()
}
