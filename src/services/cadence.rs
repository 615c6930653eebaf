use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::habit::{Habit, HabitFrequency};
use crate::models::meeting::{Meeting, MeetingCadence};

pub const DEFAULT_HABIT_WINDOW_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadenceEvaluation {
    pub evaluated: usize,
    pub updated: usize,
}

/// Adjusts each active habit's frequency from its completion ratio over
/// a rolling window. Idempotent within one evaluation run: re-running on
/// the state produced by the first pass yields `updated: 0`.
pub fn adjust_habit_frequencies(
    habits: &mut [Habit],
    as_of: chrono::NaiveDate,
    window_days: i64,
) -> CadenceEvaluation {
    let mut updated = 0usize;
    let window_start = as_of - Duration::days(window_days - 1);

    for habit in habits.iter_mut() {
        let actual = habit.completions_in_window(window_start, as_of) as f64;
        let expected = expected_completions(habit, window_days) as f64;
        let ratio = actual / expected.max(1.0);

        let changed = match (habit.frequency, habit.times_per_week) {
            (HabitFrequency::Daily, _) if ratio < 0.5 => {
                habit.frequency = HabitFrequency::Custom;
                habit.times_per_week = Some(3);
                true
            }
            (HabitFrequency::Custom, Some(times)) if ratio < 0.3 && times > 1 => {
                habit.times_per_week = Some(times - 1);
                true
            }
            (HabitFrequency::Custom, Some(times)) if ratio > 1.1 => {
                let next = (times + 1).min(7);
                if next == 7 {
                    habit.frequency = HabitFrequency::Daily;
                    habit.times_per_week = None;
                } else {
                    habit.times_per_week = Some(next);
                }
                true
            }
            _ => false,
        };

        if changed {
            updated += 1;
        }
    }

    CadenceEvaluation {
        evaluated: habits.len(),
        updated,
    }
}

/// Expected completion count over the window for the habit's current
/// frequency: daily counts every day, weekdays/weekends prorate by 5/7
/// or 2/7 (rounded), weekly takes a ceiling over 7-day buckets, and
/// custom prorates by its own `timesPerWeek` (also ceiling-rounded).
fn expected_completions(habit: &Habit, window_days: i64) -> i64 {
    let n = window_days as f64;
    match habit.frequency {
        HabitFrequency::Daily => window_days,
        HabitFrequency::Weekdays => (n * 5.0 / 7.0).round() as i64,
        HabitFrequency::Weekends => (n * 2.0 / 7.0).round() as i64,
        HabitFrequency::Weekly => (n / 7.0).ceil() as i64,
        HabitFrequency::Custom => {
            let times = habit.times_per_week.unwrap_or(1) as f64;
            (n * times / 7.0).ceil() as i64
        }
    }
}

/// Adjusts each non-archived, previously-held meeting's cadence from its
/// drift against the expected inter-occurrence period.
pub fn adjust_meeting_cadences(meetings: &mut [Meeting], now: DateTime<Utc>) -> CadenceEvaluation {
    let mut evaluated = 0usize;
    let mut updated = 0usize;

    for meeting in meetings.iter_mut() {
        if meeting.archived {
            continue;
        }
        let Some(last_held) = meeting.last_held_at else {
            continue;
        };
        evaluated += 1;

        let expected = Duration::days(meeting.cadence_days);
        let drift = (now - last_held) - expected;

        if drift > expected {
            let new_days = (meeting.cadence_days * 2).min(90);
            meeting.cadence_days = new_days;
            if new_days == 14 {
                meeting.cadence = MeetingCadence::Biweekly;
            } else if new_days == 28 {
                meeting.cadence = MeetingCadence::Monthly;
            } else {
                meeting.cadence = MeetingCadence::Custom;
            }
            updated += 1;
        } else if drift < -expected / 2
            && matches!(meeting.cadence, MeetingCadence::Biweekly | MeetingCadence::Monthly)
        {
            match meeting.cadence {
                MeetingCadence::Monthly => {
                    meeting.cadence = MeetingCadence::Biweekly;
                    meeting.cadence_days = 14;
                }
                MeetingCadence::Biweekly => {
                    meeting.cadence = MeetingCadence::Weekly;
                    meeting.cadence_days = 7;
                }
                _ => unreachable!("guarded by the outer match arm"),
            }
            updated += 1;
        }
    }

    CadenceEvaluation { evaluated, updated }
}
