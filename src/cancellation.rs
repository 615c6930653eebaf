use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Cooperative cancellation for long-lived operations (e.g. auto-reschedule
/// across many missed blocks). Carries an optional deadline and an
/// explicit cancel flag; callers check it between items rather than the
/// core polling a clock or spawning its own timers.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    deadline: Option<DateTime<Utc>>,
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new(deadline: Option<DateTime<Utc>>) -> Self {
        Self {
            deadline,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn none() -> Self {
        Self::new(None)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self, now: DateTime<Utc>) -> bool {
        if self.cancelled.load(Ordering::SeqCst) {
            return true;
        }
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}
