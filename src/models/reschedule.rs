use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptType {
    Auto,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    NoSlot,
    Conflict,
    Constraint,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Immutable audit record for one move of a missed block, successful or
/// failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescheduleAttempt {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub block_id: String,
    pub attempt_type: AttemptType,
    pub attempted_at: DateTime<Utc>,
    pub old_window: Window,
    pub new_window: Option<Window>,
    pub success: bool,
    pub failure_reason: Option<FailureReason>,
}

impl RescheduleAttempt {
    #[allow(clippy::too_many_arguments)]
    pub fn success(
        id: impl Into<String>,
        user_id: impl Into<String>,
        date: NaiveDate,
        block_id: impl Into<String>,
        attempt_type: AttemptType,
        attempted_at: DateTime<Utc>,
        old_window: Window,
        new_window: Window,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            date,
            block_id: block_id.into(),
            attempt_type,
            attempted_at,
            old_window,
            new_window: Some(new_window),
            success: true,
            failure_reason: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn failure(
        id: impl Into<String>,
        user_id: impl Into<String>,
        date: NaiveDate,
        block_id: impl Into<String>,
        attempt_type: AttemptType,
        attempted_at: DateTime<Utc>,
        old_window: Window,
        failure_reason: FailureReason,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            date,
            block_id: block_id.into(),
            attempt_type,
            attempted_at,
            old_window,
            new_window: None,
            success: false,
            failure_reason: Some(failure_reason),
        }
    }
}
