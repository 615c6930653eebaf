use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use orbita_core::clock::FixedClock;
use orbita_core::id::SequentialGenerator;
use orbita_core::models::block::{BlockType, Title};
use orbita_core::repositories::memory::InMemoryScheduleRepository;
use orbita_core::services::schedule_service::ScheduleService;

fn at(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, hour, minute, 0).unwrap()
}

#[tokio::test]
async fn overlapping_block_is_rejected_but_adjacent_block_succeeds() {
    let repository = Arc::new(InMemoryScheduleRepository::default());
    let service = ScheduleService::new(
        Arc::clone(&repository) as Arc<dyn orbita_core::repositories::ScheduleRepository>,
        Arc::new(FixedClock(at(8, 0))),
        Arc::new(SequentialGenerator::new("blk")),
    );
    let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
    let mut schedule = service.load_or_create("user-1", date).await.unwrap();

    service
        .add_block(
            &mut schedule,
            BlockType::Task,
            None,
            Title::new("Block A").unwrap(),
            at(9, 0),
            at(10, 0),
        )
        .await
        .unwrap();

    let conflict = service
        .add_block(
            &mut schedule,
            BlockType::Task,
            None,
            Title::new("Block B").unwrap(),
            at(9, 30),
            at(10, 30),
        )
        .await;
    assert!(conflict.is_err());
    assert_eq!(schedule.blocks().len(), 1);

    service
        .add_block(
            &mut schedule,
            BlockType::Task,
            None,
            Title::new("Block C").unwrap(),
            at(10, 0),
            at(11, 0),
        )
        .await
        .unwrap();
    assert_eq!(schedule.blocks().len(), 2);

    let reloaded = repository.find_by_id(&schedule.id).await.unwrap().unwrap();
    assert_eq!(reloaded.blocks().len(), 2);
}
