use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use orbita_core::clock::FixedClock;
use orbita_core::id::SequentialGenerator;
use orbita_core::models::block::{BlockType, Title};
use orbita_core::models::calendar_event::CalendarEvent;
use orbita_core::models::schedule::Schedule;
use orbita_core::repositories::memory::InMemoryCalendarEventProvider;
use orbita_core::services::meeting_scheduling::MeetingSchedulingService;
use orbita_core::services::optimal_slot::{OptimalSlotConfig, SlotQuality};

fn at(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, hour, minute, 0).unwrap()
}

#[tokio::test]
async fn prefers_preferred_time_when_only_a_schedule_block_is_busy() {
    let calendar = Arc::new(InMemoryCalendarEventProvider::new(vec![]));
    let service = MeetingSchedulingService::new(calendar, OptimalSlotConfig::default());

    let clock = FixedClock(at(8, 0));
    let ids = SequentialGenerator::new("blk");
    let mut schedule = Schedule::new("sched-1", "user-1", at(0, 0).date_naive());
    schedule
        .add_block(
            &clock,
            &ids,
            BlockType::Task,
            None,
            Title::new("Early focus").unwrap(),
            at(9, 0),
            at(9, 45),
        )
        .unwrap();

    let suggestions = service
        .suggest_slots(
            "user-1",
            at(0, 0),
            Duration::minutes(30),
            Duration::hours(10),
            3,
            |offset| if offset == 0 { Some(&schedule) } else { None },
        )
        .await;

    let first = &suggestions[0];
    assert_eq!(first.start, at(10, 0));
    assert_eq!(first.quality, SlotQuality::Ideal);
}

#[tokio::test]
async fn calendar_event_blocks_the_preferred_time_and_next_gap_is_suggested_instead() {
    let calendar = Arc::new(InMemoryCalendarEventProvider::new(vec![CalendarEvent {
        id: "evt-1".into(),
        title: "External review".into(),
        start: at(10, 0),
        end: at(10, 45),
    }]));
    let service = MeetingSchedulingService::new(calendar, OptimalSlotConfig::default());

    let suggestions = service
        .suggest_slots(
            "user-1",
            at(0, 0),
            Duration::minutes(30),
            Duration::hours(10),
            3,
            |_offset| None,
        )
        .await;

    assert!(!suggestions
        .iter()
        .any(|s| s.start < at(10, 45) && s.end > at(10, 0)));
}
