use chrono::{NaiveDate, TimeZone, Utc};
use orbita_core::clock::FixedClock;
use orbita_core::id::SequentialGenerator;
use orbita_core::ical::encode_vcalendar;
use orbita_core::models::block::{BlockType, Title};
use orbita_core::models::schedule::Schedule;

fn at(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, hour, minute, 0).unwrap()
}

#[test]
fn schedule_blocks_export_to_a_well_formed_vcalendar() {
    let mut schedule = Schedule::new("sched-1", "user-1", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    let clock = FixedClock(at(8, 0));
    let ids = SequentialGenerator::new("blk");

    schedule
        .add_block(
            &clock,
            &ids,
            BlockType::Meeting,
            None,
            Title::new("Standup, team; sync").unwrap(),
            at(9, 0),
            at(9, 30),
        )
        .unwrap();
    schedule
        .add_block(
            &clock,
            &ids,
            BlockType::Task,
            None,
            Title::new("Write report").unwrap(),
            at(10, 0),
            at(11, 0),
        )
        .unwrap();

    let vcalendar = encode_vcalendar(schedule.blocks(), at(8, 0));

    assert!(vcalendar.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(vcalendar.ends_with("END:VCALENDAR\r\n"));
    assert_eq!(vcalendar.matches("BEGIN:VEVENT\r\n").count(), 2);
    assert_eq!(vcalendar.matches("END:VEVENT\r\n").count(), 2);
    assert!(vcalendar.contains("SUMMARY:Standup\\, team\\; sync\r\n"));
    assert!(vcalendar.contains("DTSTART:20240502T090000Z\r\n"));
}
