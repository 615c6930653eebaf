pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DomainResult;
use crate::models::calendar_event::CalendarEvent;
use crate::models::entitlement::{EntitlementSource, Module};
use crate::models::habit::Habit;
use crate::models::meeting::Meeting;
use crate::models::reschedule::RescheduleAttempt;
use crate::models::schedule::Schedule;

/// Repository contract for schedules. All I/O boundaries are async:
/// the core's pure algorithms never suspend, only the repositories they
/// are driven through do (see the concurrency model's suspension points).
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn save(&self, schedule: &Schedule) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Schedule>>;
    async fn find_by_user_and_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> DomainResult<Option<Schedule>>;
    async fn find_by_user_date_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Schedule>>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

#[async_trait]
pub trait RescheduleAttemptRepository: Send + Sync {
    async fn append(&self, attempt: &RescheduleAttempt) -> DomainResult<()>;
    /// Ordered by attemptedAt asc.
    async fn list_by_user_and_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> DomainResult<Vec<RescheduleAttempt>>;
}

#[async_trait]
pub trait HabitRepository: Send + Sync {
    async fn save(&self, habit: &Habit) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Habit>>;
    async fn find_active_by_user(&self, user_id: &str) -> DomainResult<Vec<Habit>>;
    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Habit>>;
}

#[async_trait]
pub trait MeetingRepository: Send + Sync {
    async fn save(&self, meeting: &Meeting) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Meeting>>;
    async fn find_active_by_user(&self, user_id: &str) -> DomainResult<Vec<Meeting>>;
    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Meeting>>;
}

#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    async fn set(
        &self,
        user_id: &str,
        module: Module,
        active: bool,
        source: EntitlementSource,
    ) -> DomainResult<()>;
    async fn list(&self, user_id: &str) -> DomainResult<Vec<crate::models::entitlement::Entitlement>>;
    async fn is_active(&self, user_id: &str, module: Module) -> DomainResult<bool>;
}

/// External calendar event source. Errors are downgraded to empty
/// results by callers that treat calendar data as best-effort (the
/// optimal-slot finder); import paths instead surface them.
#[async_trait]
pub trait CalendarEventProvider: Send + Sync {
    async fn get_events_for_range(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<CalendarEvent>>;
}
