use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{DomainError, DomainResult};

/// Recurrence pattern for a habit. `Custom` carries its own
/// `times_per_week` (1..=21) rather than a fixed cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitFrequency {
    Daily,
    Weekdays,
    Weekends,
    Weekly,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredTimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

/// Cadence-relevant fields of a habit. History is a per-day completion
/// log sufficient to count completions in a window of N days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub frequency: HabitFrequency,
    pub times_per_week: Option<u8>,
    pub duration_minutes: i64,
    pub preferred_time: Option<PreferredTimeOfDay>,
    history: BTreeSet<NaiveDate>,
}

impl Habit {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
        frequency: HabitFrequency,
        duration_minutes: i64,
    ) -> DomainResult<Self> {
        if duration_minutes <= 0 {
            return Err(DomainError::invalid_input(
                "habit duration must be positive",
            ));
        }
        Ok(Self {
            id: id.into(),
            user_id: user_id.into(),
            name: name.into(),
            frequency,
            times_per_week: None,
            duration_minutes,
            preferred_time: None,
            history: BTreeSet::new(),
        })
    }

    /// Sets `times_per_week` for a custom-frequency habit. 1..=21.
    pub fn set_times_per_week(&mut self, times_per_week: u8) -> DomainResult<()> {
        if !(1..=21).contains(&times_per_week) {
            return Err(DomainError::invalid_input(
                "timesPerWeek must be between 1 and 21",
            ));
        }
        self.times_per_week = Some(times_per_week);
        Ok(())
    }

    pub fn log_completion(&mut self, day: NaiveDate) {
        self.history.insert(day);
    }

    /// Count of distinct completed days within `[window_start, window_end]`
    /// inclusive.
    pub fn completions_in_window(&self, window_start: NaiveDate, window_end: NaiveDate) -> u32 {
        self.history
            .range(window_start..=window_end)
            .count() as u32
    }

    /// Current consecutive-day streak ending on `as_of` (inclusive),
    /// derived from the history log.
    pub fn current_streak(&self, as_of: NaiveDate) -> u32 {
        let mut streak = 0u32;
        let mut day = as_of;
        while self.history.contains(&day) {
            streak += 1;
            day = match day.pred_opt() {
                Some(d) => d,
                None => break,
            };
        }
        streak
    }
}
