pub mod cancellation;
pub mod clock;
pub mod error;
pub mod events;
pub mod ical;
pub mod id;
pub mod models;
pub mod repositories;
pub mod services;
