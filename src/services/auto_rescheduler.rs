use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::cancellation::CancellationToken;
use crate::clock::Clock;
use crate::id::IdGenerator;
use crate::models::reschedule::{AttemptType, FailureReason, RescheduleAttempt, Window};
use crate::models::schedule::Schedule;
use crate::services::availability::find_available_slots;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoRescheduleResult {
    pub rescheduled: usize,
    pub failed: usize,
    pub attempts: Vec<RescheduleAttempt>,
}

/// Detects missed blocks and attempts to place a replacement for each.
/// The original missed block is kept in place for audit rather than
/// replaced — a new block is added for the successful placement. Checks
/// `token` between items; a cancellation stops further attempts but does
/// not mark the remaining blocks failed — they are simply left for a
/// later run.
pub fn auto_reschedule(
    clock: &dyn Clock,
    ids: &dyn IdGenerator,
    schedule: &mut Schedule,
    now: DateTime<Utc>,
    after: Option<DateTime<Utc>>,
    token: &CancellationToken,
) -> AutoRescheduleResult {
    schedule.mark_missed_up_to(clock, now);

    let cutoff = after.unwrap_or_else(|| {
        let (day_start, _) = schedule.day_bounds();
        day_start
    });

    let mut missed: Vec<_> = schedule
        .blocks()
        .iter()
        .filter(|b| b.is_missed() && b.end > cutoff)
        .map(|b| (b.id.clone(), b.start, b.end, b.block_type, b.reference_id.clone(), b.title.clone()))
        .collect();
    missed.sort_by_key(|(_, start, ..)| *start);

    let window_start = now.max(after.unwrap_or(now));
    let (_, day_end) = schedule.day_bounds();

    let mut available =
        find_available_slots(window_start, day_end, &schedule.busy_intervals(), Duration::zero(), Duration::zero());

    let mut attempts = Vec::with_capacity(missed.len());
    let mut rescheduled = 0usize;
    let mut failed = 0usize;

    for (block_id, old_start, old_end, block_type, reference_id, title) in missed {
        if token.is_cancelled(clock.now()) {
            break;
        }
        let duration = old_end - old_start;
        let old_window = Window {
            start: old_start,
            end: old_end,
        };

        let placement = available
            .iter()
            .position(|slot| slot.admits(duration))
            .map(|idx| {
                let slot = available.remove(idx);
                let new_start = slot.start;
                let new_end = new_start + duration;
                if new_end < slot.end {
                    available.insert(idx, crate::models::slot::TimeSlot::new(new_end, slot.end));
                }
                (new_start, new_end)
            });

        match placement {
            Some((new_start, new_end)) => {
                match schedule.add_block(
                    clock,
                    ids,
                    block_type,
                    reference_id,
                    title,
                    new_start,
                    new_end,
                ) {
                    Ok(_) => {
                        rescheduled += 1;
                        attempts.push(RescheduleAttempt::success(
                            ids.next_id(),
                            schedule.user_id.clone(),
                            schedule.date,
                            block_id,
                            AttemptType::Auto,
                            clock.now(),
                            old_window,
                            Window {
                                start: new_start,
                                end: new_end,
                            },
                        ));
                    }
                    Err(_) => {
                        failed += 1;
                        attempts.push(RescheduleAttempt::failure(
                            ids.next_id(),
                            schedule.user_id.clone(),
                            schedule.date,
                            block_id,
                            AttemptType::Auto,
                            clock.now(),
                            old_window,
                            FailureReason::Conflict,
                        ));
                    }
                }
            }
            None => {
                failed += 1;
                attempts.push(RescheduleAttempt::failure(
                    ids.next_id(),
                    schedule.user_id.clone(),
                    schedule.date,
                    block_id,
                    AttemptType::Auto,
                    clock.now(),
                    old_window,
                    FailureReason::NoSlot,
                ));
            }
        }
    }

    AutoRescheduleResult {
        rescheduled,
        failed,
        attempts,
    }
}
