use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DomainResult;
use crate::models::calendar_event::CalendarEvent;
use crate::models::entitlement::{Entitlement, EntitlementSource, Module};
use crate::models::habit::Habit;
use crate::models::meeting::Meeting;
use crate::models::reschedule::RescheduleAttempt;
use crate::models::schedule::Schedule;

use super::{
    CalendarEventProvider, EntitlementRepository, HabitRepository, MeetingRepository,
    RescheduleAttemptRepository, ScheduleRepository,
};

/// In-memory `ScheduleRepository`. A single mutex serializes writers for
/// the whole store rather than keying a mutex per (user, date), so the
/// repository itself stays free of per-user in-memory state.
#[derive(Default)]
pub struct InMemoryScheduleRepository {
    schedules: Mutex<HashMap<String, Schedule>>,
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn save(&self, schedule: &Schedule) -> DomainResult<()> {
        let mut guard = self.schedules.lock().expect("lock poisoned");
        guard.insert(schedule.id.clone(), schedule.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Schedule>> {
        let guard = self.schedules.lock().expect("lock poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> DomainResult<Option<Schedule>> {
        let guard = self.schedules.lock().expect("lock poisoned");
        Ok(guard
            .values()
            .find(|s| s.user_id == user_id && s.date == date)
            .cloned())
    }

    async fn find_by_user_date_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Schedule>> {
        let guard = self.schedules.lock().expect("lock poisoned");
        let mut found: Vec<Schedule> = guard
            .values()
            .filter(|s| s.user_id == user_id && s.date >= start && s.date <= end)
            .cloned()
            .collect();
        found.sort_by_key(|s| s.date);
        Ok(found)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut guard = self.schedules.lock().expect("lock poisoned");
        guard.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRescheduleAttemptRepository {
    attempts: Mutex<Vec<RescheduleAttempt>>,
}

#[async_trait]
impl RescheduleAttemptRepository for InMemoryRescheduleAttemptRepository {
    async fn append(&self, attempt: &RescheduleAttempt) -> DomainResult<()> {
        let mut guard = self.attempts.lock().expect("lock poisoned");
        guard.push(attempt.clone());
        Ok(())
    }

    async fn list_by_user_and_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> DomainResult<Vec<RescheduleAttempt>> {
        let guard = self.attempts.lock().expect("lock poisoned");
        let mut found: Vec<RescheduleAttempt> = guard
            .iter()
            .filter(|a| a.user_id == user_id && a.date == date)
            .cloned()
            .collect();
        found.sort_by_key(|a| a.attempted_at);
        Ok(found)
    }
}

#[derive(Default)]
pub struct InMemoryHabitRepository {
    habits: Mutex<HashMap<String, Habit>>,
}

#[async_trait]
impl HabitRepository for InMemoryHabitRepository {
    async fn save(&self, habit: &Habit) -> DomainResult<()> {
        let mut guard = self.habits.lock().expect("lock poisoned");
        guard.insert(habit.id.clone(), habit.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Habit>> {
        let guard = self.habits.lock().expect("lock poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn find_active_by_user(&self, user_id: &str) -> DomainResult<Vec<Habit>> {
        let guard = self.habits.lock().expect("lock poisoned");
        Ok(guard
            .values()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Habit>> {
        self.find_active_by_user(user_id).await
    }
}

#[derive(Default)]
pub struct InMemoryMeetingRepository {
    meetings: Mutex<HashMap<String, Meeting>>,
}

#[async_trait]
impl MeetingRepository for InMemoryMeetingRepository {
    async fn save(&self, meeting: &Meeting) -> DomainResult<()> {
        let mut guard = self.meetings.lock().expect("lock poisoned");
        guard.insert(meeting.id.clone(), meeting.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Meeting>> {
        let guard = self.meetings.lock().expect("lock poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn find_active_by_user(&self, user_id: &str) -> DomainResult<Vec<Meeting>> {
        let guard = self.meetings.lock().expect("lock poisoned");
        Ok(guard
            .values()
            .filter(|m| m.user_id == user_id && !m.archived)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Meeting>> {
        let guard = self.meetings.lock().expect("lock poisoned");
        Ok(guard
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// In-memory entitlement store. Per the default-allow bootstrap rule, a
/// user with zero rows is granted every module.
#[derive(Default)]
pub struct InMemoryEntitlementRepository {
    entitlements: Mutex<HashMap<(String, Module), Entitlement>>,
}

#[async_trait]
impl EntitlementRepository for InMemoryEntitlementRepository {
    async fn set(
        &self,
        user_id: &str,
        module: Module,
        active: bool,
        source: EntitlementSource,
    ) -> DomainResult<()> {
        let mut guard = self.entitlements.lock().expect("lock poisoned");
        guard.insert(
            (user_id.to_string(), module),
            Entitlement {
                user_id: user_id.to_string(),
                module,
                active,
                source,
            },
        );
        Ok(())
    }

    async fn list(&self, user_id: &str) -> DomainResult<Vec<Entitlement>> {
        let guard = self.entitlements.lock().expect("lock poisoned");
        Ok(guard
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn is_active(&self, user_id: &str, module: Module) -> DomainResult<bool> {
        let guard = self.entitlements.lock().expect("lock poisoned");
        Ok(guard
            .get(&(user_id.to_string(), module))
            .map(|e| e.active)
            .unwrap_or(false))
    }
}

/// Fixed-set calendar event provider for tests and local/offline mode.
#[derive(Default)]
pub struct InMemoryCalendarEventProvider {
    events: Mutex<Vec<CalendarEvent>>,
}

impl InMemoryCalendarEventProvider {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self {
            events: Mutex::new(events),
        }
    }
}

#[async_trait]
impl CalendarEventProvider for InMemoryCalendarEventProvider {
    async fn get_events_for_range(
        &self,
        _user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<CalendarEvent>> {
        let guard = self.events.lock().expect("lock poisoned");
        Ok(guard
            .iter()
            .filter(|e| e.start < end && e.end > start)
            .cloned()
            .collect())
    }
}
