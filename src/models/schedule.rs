use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{DomainError, DomainResult};
use crate::id::IdGenerator;
use crate::models::block::{BlockState, BlockType, TimeBlock, Title};
use crate::models::slot::TimeSlot;

/// Aggregate root keyed by (user id, local date). Holds a list of blocks
/// kept sorted by start time (ties broken by id for determinism).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    blocks: Vec<TimeBlock>,
}

impl Schedule {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            date,
            blocks: Vec::new(),
        }
    }

    /// Inclusive start / exclusive end of the schedule's local calendar
    /// day, normalized to UTC instants (no per-user timezone/DST modeling
    /// here; callers own converting a user's local day into UTC).
    pub fn day_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.date.and_hms_opt(0, 0, 0).expect("midnight is valid");
        let end = self
            .date
            .succ_opt()
            .expect("date has a successor")
            .and_hms_opt(0, 0, 0)
            .expect("midnight is valid");
        (
            DateTime::from_naive_utc_and_offset(start, Utc),
            DateTime::from_naive_utc_and_offset(end, Utc),
        )
    }

    fn window_within_day(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let (day_start, day_end) = self.day_bounds();
        start >= day_start && end <= day_end
    }

    /// Ordered, read-only view of the schedule's blocks.
    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    fn insert_sorted(&mut self, block: TimeBlock) {
        let pos = self
            .blocks
            .partition_point(|b| (b.start, &b.id) < (block.start, &block.id));
        self.blocks.insert(pos, block);
    }

    /// Index of the first block whose window overlaps `[start, end)`,
    /// found by scanning the predecessor/successor neighborhood of a
    /// binary search on start time (O(log n) to locate, O(k) to confirm
    /// against the small number of neighbors that could overlap).
    fn find_conflicts(&self, start: DateTime<Utc>, end: DateTime<Utc>, skip_id: Option<&str>) -> Vec<String> {
        // Every block that could overlap [start, end) has start < end;
        // `partition_point` locates that boundary in O(log n), then we
        // confirm the handful of candidates against the actual overlap
        // test (earlier blocks may still end after `start`, so we check
        // all of them rather than assuming a fixed neighborhood).
        let pos = self.blocks.partition_point(|b| b.start < end);
        self.blocks[..pos]
            .iter()
            .filter(|b| skip_id != Some(b.id.as_str()))
            .filter(|b| b.overlaps(start, end))
            .map(|b| b.id.clone())
            .collect()
    }

    /// AddBlock(type, refId?, title, start, end) → Block | DomainError.
    pub fn add_block(
        &mut self,
        clock: &dyn Clock,
        ids: &dyn IdGenerator,
        block_type: BlockType,
        reference_id: Option<String>,
        title: Title,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<TimeBlock> {
        if end <= start {
            return Err(DomainError::invalid_input("block end must be after start"));
        }
        if !self.window_within_day(start, end) {
            return Err(DomainError::invalid_input(
                "block window must lie within the schedule's calendar day",
            ));
        }
        let conflicts = self.find_conflicts(start, end, None);
        if !conflicts.is_empty() {
            return Err(DomainError::conflict(conflicts));
        }

        let now = clock.now();
        let block = TimeBlock {
            id: ids.next_id(),
            user_id: self.user_id.clone(),
            schedule_id: self.id.clone(),
            block_type,
            reference_id,
            title,
            start,
            end,
            state: BlockState::Pending,
            created_at: now,
            updated_at: now,
        };
        self.insert_sorted(block.clone());
        Ok(block)
    }

    /// RemoveBlock(blockId) → ok | NotFound.
    pub fn remove_block(&mut self, block_id: &str) -> DomainResult<()> {
        let pos = self
            .blocks
            .iter()
            .position(|b| b.id == block_id)
            .ok_or_else(|| DomainError::not_found("TimeBlock", block_id))?;
        self.blocks.remove(pos);
        Ok(())
    }

    /// CompleteBlock(blockId) → ok | NotFound | IllegalTransition.
    /// Sets completed=true only if currently pending.
    pub fn complete_block(&mut self, clock: &dyn Clock, block_id: &str) -> DomainResult<()> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id == block_id)
            .ok_or_else(|| DomainError::not_found("TimeBlock", block_id))?;
        if !block.is_pending() {
            return Err(DomainError::illegal_transition(
                "only a pending block can be completed",
            ));
        }
        block.state = BlockState::Completed;
        block.updated_at = clock.now();
        Ok(())
    }

    /// RescheduleBlock(blockId, newStart, newEnd) → ok | Conflict |
    /// InvalidWindow | NotFound. Equivalent to virtually removing the
    /// block, testing the new window, then reinserting; rolls back on
    /// conflict.
    pub fn reschedule_block(
        &mut self,
        clock: &dyn Clock,
        block_id: &str,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    ) -> DomainResult<TimeBlock> {
        let pos = self
            .blocks
            .iter()
            .position(|b| b.id == block_id)
            .ok_or_else(|| DomainError::not_found("TimeBlock", block_id))?;

        if !self.blocks[pos].is_pending() {
            return Err(DomainError::illegal_transition(
                "only a pending block can be rescheduled",
            ));
        }
        if new_end <= new_start {
            return Err(DomainError::invalid_input(
                "block end must be after start",
            ));
        }
        if !self.window_within_day(new_start, new_end) {
            return Err(DomainError::invalid_input(
                "block window must lie within the schedule's calendar day",
            ));
        }

        let conflicts = self.find_conflicts(new_start, new_end, Some(block_id));
        if !conflicts.is_empty() {
            return Err(DomainError::conflict(conflicts));
        }

        // Remove, mutate, reinsert to preserve sort order.
        let mut block = self.blocks.remove(pos);
        block.start = new_start;
        block.end = new_end;
        block.updated_at = clock.now();
        self.insert_sorted(block.clone());
        Ok(block)
    }

    /// MarkMissedUpTo(now) — sets missed=true for every pending block
    /// whose end ≤ now; idempotent.
    pub fn mark_missed_up_to(&mut self, clock: &dyn Clock, now: DateTime<Utc>) {
        for block in self.blocks.iter_mut() {
            if block.is_pending() && block.end <= now {
                block.state = BlockState::Missed;
                block.updated_at = clock.now();
            }
        }
    }

    /// Busy intervals contributed by this schedule's blocks, as
    /// `TimeSlot`s, for use by the availability merger.
    pub fn busy_intervals(&self) -> Vec<TimeSlot> {
        self.blocks
            .iter()
            .map(|b| TimeSlot::new(b.start, b.end))
            .collect()
    }
}
