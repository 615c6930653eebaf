use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use orbita_core::cancellation::CancellationToken;
use orbita_core::clock::FixedClock;
use orbita_core::id::SequentialGenerator;
use orbita_core::models::block::{BlockType, Title};
use orbita_core::models::reschedule::{AttemptType, Window};
use orbita_core::repositories::memory::InMemoryRescheduleAttemptRepository;
use orbita_core::repositories::RescheduleAttemptRepository;
use orbita_core::services::auto_rescheduler::auto_reschedule;
use orbita_core::models::schedule::Schedule;

fn at(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, hour, minute, 0).unwrap()
}

#[tokio::test]
async fn missed_block_is_rescheduled_and_attempt_is_persisted() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
    let mut schedule = Schedule::new("sched-1", "user-1", date);
    let ids = SequentialGenerator::new("blk");
    let setup_clock = FixedClock(at(8, 0));

    schedule
        .add_block(
            &setup_clock,
            &ids,
            BlockType::Task,
            None,
            Title::new("Morning review").unwrap(),
            at(9, 0),
            at(10, 0),
        )
        .unwrap();
    schedule
        .add_block(
            &setup_clock,
            &ids,
            BlockType::Meeting,
            None,
            Title::new("Afternoon sync").unwrap(),
            at(14, 0),
            at(15, 0),
        )
        .unwrap();

    let now_clock = FixedClock(at(12, 0));
    let token = CancellationToken::none();
    let result = auto_reschedule(&now_clock, &ids, &mut schedule, at(12, 0), None, &token);

    assert_eq!(result.rescheduled, 1);
    assert_eq!(result.failed, 0);

    let attempt_repo = Arc::new(InMemoryRescheduleAttemptRepository::default());
    for attempt in &result.attempts {
        attempt_repo.append(attempt).await.unwrap();
    }

    let persisted = attempt_repo
        .list_by_user_and_date("user-1", date)
        .await
        .unwrap();
    assert_eq!(persisted.len(), 1);
    assert!(persisted[0].success);
    assert_eq!(persisted[0].old_window, Window { start: at(9, 0), end: at(10, 0) });
    assert_eq!(persisted[0].new_window, Some(Window { start: at(12, 0), end: at(13, 0) }));
    assert_eq!(persisted[0].attempt_type, AttemptType::Auto);
}
