use chrono::{NaiveDate, TimeZone, Utc};
use orbita_core::clock::{Clock, FixedClock};
use orbita_core::id::SequentialGenerator;
use orbita_core::models::block::BlockType;
use orbita_core::models::schedulable_item::SchedulableItem;
use orbita_core::models::schedule::Schedule;
use orbita_core::services::auto_scheduler::{AutoScheduleResult, AutoScheduler, AutoSchedulerConfig, ItemOutcome};

fn at(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, hour, minute, 0).unwrap()
}

#[test]
fn empty_day_single_task_is_scheduled_and_utilization_matches_expectation() {
    let mut schedule = Schedule::new("sched-1", "user-1", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    let clock = FixedClock(at(8, 0));
    let ids = SequentialGenerator::new("blk");
    let scheduler = AutoScheduler::new(AutoSchedulerConfig {
        working_day_start_offset: chrono::Duration::hours(9),
        working_day_end_offset: chrono::Duration::hours(17),
    });

    let item = SchedulableItem {
        id: "item-1".into(),
        item_type: BlockType::Task,
        reference_id: None,
        title: "Write report".into(),
        priority: 3,
        duration_minutes: 60,
        due_date: None,
        preferred_time: None,
        preferred_start_offset_minutes: None,
    };

    let result: AutoScheduleResult = scheduler.schedule(&clock, &ids, &mut schedule, vec![item]);

    assert_eq!(result.scheduled_count, 1);
    assert_eq!(result.failed_count, 0);
    assert!((result.utilization_pct - 12.5).abs() < 1e-9);
    match &result.per_item_result[0] {
        ItemOutcome::Placed(placed) => {
            assert_eq!(placed.start, at(9, 0));
            assert_eq!(placed.end, at(10, 0));
        }
        ItemOutcome::Unplaced(_) => panic!("expected the task to be placed"),
    }
    assert_eq!(schedule.blocks().len(), 1);
    assert_eq!(clock.now(), at(8, 0));
}

#[test]
fn overflowing_items_are_reported_unplaced_without_failing_the_whole_run() {
    let mut schedule = Schedule::new("sched-1", "user-1", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    let clock = FixedClock(at(8, 0));
    let ids = SequentialGenerator::new("blk");
    let scheduler = AutoScheduler::new(AutoSchedulerConfig {
        working_day_start_offset: chrono::Duration::hours(9),
        working_day_end_offset: chrono::Duration::hours(10),
    });

    let items = vec![
        SchedulableItem {
            id: "a".into(),
            item_type: BlockType::Task,
            reference_id: None,
            title: "A".into(),
            priority: 1,
            duration_minutes: 45,
            due_date: None,
            preferred_time: None,
            preferred_start_offset_minutes: None,
        },
        SchedulableItem {
            id: "b".into(),
            item_type: BlockType::Task,
            reference_id: None,
            title: "B".into(),
            priority: 2,
            duration_minutes: 45,
            due_date: None,
            preferred_time: None,
            preferred_start_offset_minutes: None,
        },
    ];

    let result = scheduler.schedule(&clock, &ids, &mut schedule, items);
    assert_eq!(result.scheduled_count, 1);
    assert_eq!(result.failed_count, 1);
    assert_eq!(schedule.blocks().len(), 1);
}
