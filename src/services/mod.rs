pub mod auto_rescheduler;
pub mod auto_scheduler;
pub mod availability;
pub mod cadence;
pub mod entitlement;
pub mod meeting_scheduling;
pub mod optimal_slot;
pub mod schedule_service;
