pub mod block;
pub mod calendar_event;
pub mod entitlement;
pub mod habit;
pub mod meeting;
pub mod reschedule;
pub mod schedulable_item;
pub mod schedule;
pub mod slot;
