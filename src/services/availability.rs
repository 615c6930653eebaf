use chrono::{DateTime, Duration, Utc};

use crate::models::slot::TimeSlot;

/// Merges and clips busy intervals, then walks the gaps between them to
/// produce non-overlapping, sorted candidate slots at least `min_duration`
/// long. Pure and idempotent: invoking twice on the same inputs yields
/// identical output.
pub fn find_available_slots(
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
    busy: &[TimeSlot],
    min_duration: Duration,
    inter_busy_break: Duration,
) -> Vec<TimeSlot> {
    let merged = merge_busy_intervals(day_start, day_end, busy);

    let mut gaps = Vec::new();
    let mut cursor = day_start;

    for interval in &merged {
        if interval.start > cursor {
            let gap_end = interval.start;
            if gap_end - cursor >= min_duration {
                gaps.push(TimeSlot::new(cursor, gap_end));
            }
        }
        cursor = (interval.end + inter_busy_break).min(day_end).max(cursor);
    }

    if day_end > cursor && day_end - cursor >= min_duration {
        gaps.push(TimeSlot::new(cursor, day_end));
    }

    gaps
}

/// Clip every busy interval to `[day_start, day_end)`, drop empties, sort
/// by start, and merge overlapping (or touching) intervals.
fn merge_busy_intervals(
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
    busy: &[TimeSlot],
) -> Vec<TimeSlot> {
    let mut clipped: Vec<TimeSlot> = busy
        .iter()
        .filter_map(|slot| {
            let start = slot.start.max(day_start);
            let end = slot.end.min(day_end);
            if end > start {
                Some(TimeSlot::new(start, end))
            } else {
                None
            }
        })
        .collect();

    clipped.sort_by_key(|s| s.start);

    let mut merged: Vec<TimeSlot> = Vec::with_capacity(clipped.len());
    for slot in clipped {
        match merged.last_mut() {
            Some(last) if slot.start <= last.end => {
                if slot.end > last.end {
                    last.end = slot.end;
                }
            }
            _ => merged.push(slot),
        }
    }
    merged
}
