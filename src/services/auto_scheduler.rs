use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::id::IdGenerator;
use crate::models::block::Title;
use crate::models::schedulable_item::SchedulableItem;
use crate::models::schedule::Schedule;
use crate::models::slot::TimeSlot;
use crate::services::availability::find_available_slots;

/// Working-day bounds and tunables for auto-scheduling. Never read from
/// environment or globals — passed in at construction.
#[derive(Debug, Clone, Copy)]
pub struct AutoSchedulerConfig {
    pub working_day_start_offset: Duration,
    pub working_day_end_offset: Duration,
}

impl Default for AutoSchedulerConfig {
    fn default() -> Self {
        Self {
            working_day_start_offset: Duration::hours(8),
            working_day_end_offset: Duration::hours(18),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub item_id: String,
    pub block_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnplacedItem {
    pub item_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemOutcome {
    Placed(PlacedItem),
    Unplaced(UnplacedItem),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoScheduleResult {
    pub scheduled_count: usize,
    pub failed_count: usize,
    pub per_item_result: Vec<ItemOutcome>,
    pub total_scheduled_minutes: i64,
    pub utilization_pct: f64,
}

impl AutoScheduleResult {
    pub fn total_scheduled(&self) -> Duration {
        Duration::minutes(self.total_scheduled_minutes)
    }
}

pub struct AutoScheduler {
    config: AutoSchedulerConfig,
}

impl AutoScheduler {
    pub fn new(config: AutoSchedulerConfig) -> Self {
        Self { config }
    }

    /// Sort items by (priority asc, due date asc with nil last, duration
    /// desc), applying the habit morning/evening priority boost, then
    /// greedily place each into the first slot that admits its duration.
    /// Tie-break for identical priority and equal due dates is the input
    /// list's own insertion order (a stable sort).
    pub fn schedule(
        &self,
        clock: &dyn Clock,
        ids: &dyn IdGenerator,
        schedule: &mut Schedule,
        items: Vec<SchedulableItem>,
    ) -> AutoScheduleResult {
        let (day_start, day_end) = schedule.day_bounds();
        let working_start = day_start + self.config.working_day_start_offset;
        let working_end = day_start + self.config.working_day_end_offset;
        let working_day_length = working_end - working_start;

        let mut available =
            find_available_slots(working_start, working_end, &schedule.busy_intervals(), Duration::zero(), Duration::zero());

        let mut ordered: Vec<SchedulableItem> = items;
        ordered.sort_by(|a, b| {
            a.effective_priority()
                .cmp(&b.effective_priority())
                .then_with(|| match (a.due_date, b.due_date) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
                .then_with(|| b.duration().cmp(&a.duration()))
        });

        let mut outcomes = Vec::with_capacity(ordered.len());
        let mut total_scheduled = Duration::zero();
        let mut scheduled_count = 0usize;
        let mut failed_count = 0usize;

        for item in ordered {
            match place_item(&mut available, &item) {
                Some((anchor, end)) => {
                    let title = Title::new(item.title.clone())
                        .unwrap_or_else(|_| Title::new("Untitled").expect("fallback title valid"));
                    match schedule.add_block(
                        clock,
                        ids,
                        item.item_type,
                        item.reference_id.clone(),
                        title,
                        anchor,
                        end,
                    ) {
                        Ok(block) => {
                            total_scheduled = total_scheduled + item.duration();
                            scheduled_count += 1;
                            outcomes.push(ItemOutcome::Placed(PlacedItem {
                                item_id: item.id.clone(),
                                block_id: block.id,
                                start: anchor,
                                end,
                            }));
                        }
                        Err(_) => {
                            failed_count += 1;
                            outcomes.push(ItemOutcome::Unplaced(UnplacedItem {
                                item_id: item.id.clone(),
                                reason: "NoSlot".to_string(),
                            }));
                        }
                    }
                }
                None => {
                    failed_count += 1;
                    outcomes.push(ItemOutcome::Unplaced(UnplacedItem {
                        item_id: item.id.clone(),
                        reason: "NoSlot".to_string(),
                    }));
                }
            }
        }

        let utilization_pct = if working_day_length > Duration::zero() {
            (total_scheduled.num_seconds() as f64 / working_day_length.num_seconds() as f64) * 100.0
        } else {
            0.0
        };

        AutoScheduleResult {
            scheduled_count,
            failed_count,
            per_item_result: outcomes,
            total_scheduled_minutes: total_scheduled.num_minutes(),
            utilization_pct,
        }
    }
}

/// Finds the first available slot admitting `item`'s duration, anchors
/// the placement at the item's preferred offset when the slot spans it
/// (else at the slot's own start), and reinserts the remaining head/tail
/// of that slot back into `available`, preserving order.
fn place_item(
    available: &mut Vec<TimeSlot>,
    item: &SchedulableItem,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let duration = item.duration();
    let idx = available.iter().position(|slot| slot.admits(duration))?;
    let slot = available.remove(idx);

    let anchor = match item.preferred_start_offset() {
        Some(offset) => {
            let day_start = slot.start.date_naive().and_hms_opt(0, 0, 0).expect("midnight");
            let day_start = DateTime::<Utc>::from_naive_utc_and_offset(day_start, Utc);
            let candidate = day_start + offset;
            if candidate >= slot.start && candidate + duration <= slot.end {
                candidate
            } else {
                slot.start
            }
        }
        None => slot.start,
    };
    let end = anchor + duration;

    if anchor > slot.start {
        available.insert(idx, TimeSlot::new(slot.start, anchor));
    }
    if end < slot.end {
        let insert_at = if anchor > slot.start { idx + 1 } else { idx };
        available.insert(insert_at, TimeSlot::new(end, slot.end));
    }

    Some((anchor, end))
}
