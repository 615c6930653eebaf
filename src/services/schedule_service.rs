use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::DomainResult;
use crate::id::IdGenerator;
use crate::models::block::{BlockType, Title};
use crate::models::schedule::Schedule;
use crate::models::slot::TimeSlot;
use crate::repositories::ScheduleRepository;
use crate::services::availability::find_available_slots;

/// Orchestrates the Schedule aggregate against its repository: loads or
/// lazily creates the (user, date) schedule, mutates it through the pure
/// aggregate methods, and persists the result. The aggregate itself never
/// touches I/O (see the concurrency model's suspension points).
pub struct ScheduleService {
    pub(crate) repository: Arc<dyn ScheduleRepository>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl ScheduleService {
    pub fn new(
        repository: Arc<dyn ScheduleRepository>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repository,
            clock,
            ids,
        }
    }

    /// Loads the schedule for (user, date), creating it lazily on first
    /// use — a Schedule is never auto-removed, only explicitly deleted.
    pub async fn load_or_create(&self, user_id: &str, date: NaiveDate) -> DomainResult<Schedule> {
        if let Some(existing) = self
            .repository
            .find_by_user_and_date(user_id, date)
            .await?
        {
            return Ok(existing);
        }
        let schedule = Schedule::new(self.ids.next_id(), user_id, date);
        debug!(user_id, %date, schedule_id = %schedule.id, "schedule created lazily");
        Ok(schedule)
    }

    pub async fn add_block(
        &self,
        schedule: &mut Schedule,
        block_type: BlockType,
        reference_id: Option<String>,
        title: Title,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<()> {
        let block = schedule.add_block(
            self.clock.as_ref(),
            self.ids.as_ref(),
            block_type,
            reference_id,
            title,
            start,
            end,
        )?;
        self.repository.save(schedule).await?;
        info!(block_id = %block.id, schedule_id = %schedule.id, "block added");
        Ok(())
    }

    pub async fn remove_block(&self, schedule: &mut Schedule, block_id: &str) -> DomainResult<()> {
        schedule.remove_block(block_id)?;
        self.repository.save(schedule).await?;
        info!(block_id, schedule_id = %schedule.id, "block removed");
        Ok(())
    }

    pub async fn complete_block(&self, schedule: &mut Schedule, block_id: &str) -> DomainResult<()> {
        schedule.complete_block(self.clock.as_ref(), block_id)?;
        self.repository.save(schedule).await?;
        info!(block_id, schedule_id = %schedule.id, "block completed");
        Ok(())
    }

    pub async fn reschedule_block(
        &self,
        schedule: &mut Schedule,
        block_id: &str,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    ) -> DomainResult<()> {
        schedule.reschedule_block(self.clock.as_ref(), block_id, new_start, new_end)?;
        self.repository.save(schedule).await?;
        info!(block_id, schedule_id = %schedule.id, "block rescheduled");
        Ok(())
    }

    pub async fn mark_missed_up_to(&self, schedule: &mut Schedule, now: DateTime<Utc>) -> DomainResult<()> {
        schedule.mark_missed_up_to(self.clock.as_ref(), now);
        self.repository.save(schedule).await?;
        Ok(())
    }

    /// FindAvailableSlots(dayStart, dayEnd, minDuration) over this
    /// schedule's own blocks only (no external calendar events).
    pub fn find_available_slots(
        &self,
        schedule: &Schedule,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
        min_duration: Duration,
    ) -> Vec<TimeSlot> {
        find_available_slots(
            day_start,
            day_end,
            &schedule.busy_intervals(),
            min_duration,
            Duration::zero(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::id::SequentialGenerator;
    use crate::repositories::memory::InMemoryScheduleRepository;
    use chrono::TimeZone;

    fn service() -> ScheduleService {
        ScheduleService::new(
            Arc::new(InMemoryScheduleRepository::default()),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap())),
            Arc::new(SequentialGenerator::new("sched")),
        )
    }

    #[tokio::test]
    async fn load_or_create_is_lazy_and_stable() {
        let svc = service();
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let first = svc.load_or_create("user-1", date).await.unwrap();
        svc.repository.save(&first).await.unwrap();
        let second = svc.load_or_create("user-1", date).await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn add_and_complete_block_round_trips_through_repository() {
        let svc = service();
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let mut schedule = svc.load_or_create("user-1", date).await.unwrap();

        let start = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();
        svc.add_block(
            &mut schedule,
            BlockType::Task,
            None,
            Title::new("Write report").unwrap(),
            start,
            end,
        )
        .await
        .unwrap();

        let block_id = schedule.blocks()[0].id.clone();
        svc.complete_block(&mut schedule, &block_id).await.unwrap();

        let reloaded = svc
            .repository
            .find_by_id(&schedule.id)
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.blocks()[0].is_completed());
    }
}
