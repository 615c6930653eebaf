use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use orbita_core::models::habit::{Habit, HabitFrequency};
use orbita_core::models::meeting::{Meeting, MeetingCadence};
use orbita_core::repositories::memory::{InMemoryHabitRepository, InMemoryMeetingRepository};
use orbita_core::repositories::{HabitRepository, MeetingRepository};
use orbita_core::services::cadence::{adjust_habit_frequencies, adjust_meeting_cadences, DEFAULT_HABIT_WINDOW_DAYS};

fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

#[tokio::test]
async fn daily_habit_demotes_and_persists_through_repository() {
    let repo = Arc::new(InMemoryHabitRepository::default());
    let mut habit = Habit::new("h1", "user-1", "Run", HabitFrequency::Daily, 30).unwrap();
    for d in 1..=5u32 {
        habit.log_completion(day(d));
    }
    repo.save(&habit).await.unwrap();

    let mut habits = repo.find_by_user("user-1").await.unwrap();
    let evaluation = adjust_habit_frequencies(&mut habits, day(14), DEFAULT_HABIT_WINDOW_DAYS);
    assert_eq!(evaluation.updated, 1);
    for habit in &habits {
        repo.save(habit).await.unwrap();
    }

    let reloaded = repo.find_by_id("h1").await.unwrap().unwrap();
    assert_eq!(reloaded.frequency, HabitFrequency::Custom);
    assert_eq!(reloaded.times_per_week, Some(3));

    let mut reloaded_habits = repo.find_by_user("user-1").await.unwrap();
    let second = adjust_habit_frequencies(&mut reloaded_habits, day(14), DEFAULT_HABIT_WINDOW_DAYS);
    assert_eq!(second.updated, 0);
}

#[tokio::test]
async fn meeting_cadence_drift_persists_through_repository() {
    let repo = Arc::new(InMemoryMeetingRepository::default());
    let created = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
    let mut meeting = Meeting::new(
        "m1",
        "user-1",
        "1:1",
        MeetingCadence::Weekly,
        7,
        30,
        Duration::hours(9),
        created,
    )
    .unwrap();
    meeting.record_held(created).unwrap();
    repo.save(&meeting).await.unwrap();

    let now = created + Duration::days(15);
    let mut meetings = repo.find_by_user("user-1").await.unwrap();
    let evaluation = adjust_meeting_cadences(&mut meetings, now);
    assert_eq!(evaluation.updated, 1);
    for meeting in &meetings {
        repo.save(meeting).await.unwrap();
    }

    let reloaded = repo.find_by_id("m1").await.unwrap().unwrap();
    assert_eq!(reloaded.cadence, MeetingCadence::Biweekly);
    assert_eq!(reloaded.cadence_days, 14);
}
