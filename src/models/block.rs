use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

pub const MAX_TITLE_LEN: usize = 200;

/// Discriminator over block kinds. Controls downstream classification
/// (categories, icons, completion semantics) but never placement logic —
/// placement is polymorphic only over the fields `SchedulableItem` extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Task,
    Habit,
    Meeting,
    Focus,
    Break,
}

impl BlockType {
    /// Uppercased form used by the iCalendar CATEGORIES property.
    pub fn as_category(&self) -> &'static str {
        match self {
            BlockType::Task => "TASK",
            BlockType::Habit => "HABIT",
            BlockType::Meeting => "MEETING",
            BlockType::Focus => "FOCUS",
            BlockType::Break => "BREAK",
        }
    }
}

/// A validated, non-empty, length-bounded block title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid_input("title must not be empty"));
        }
        if value.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::invalid_input(format!(
                "title must be at most {MAX_TITLE_LEN} characters"
            )));
        }
        Ok(Title(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pending / Completed / Missed. Completed and Missed are terminal;
/// a block cannot flip from one to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockState {
    Pending,
    Completed,
    Missed,
}

/// A half-open `[start, end)` interval on a user's calendar day, with
/// type, optional reference, and state flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    pub user_id: String,
    pub schedule_id: String,
    pub block_type: BlockType,
    pub reference_id: Option<String>,
    pub title: Title,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub state: BlockState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeBlock {
    /// Duration of the block's window.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, BlockState::Pending)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, BlockState::Completed)
    }

    pub fn is_missed(&self) -> bool {
        matches!(self.state, BlockState::Missed)
    }

    /// Overlap = (A.start < B.end AND A.end > B.start).
    pub fn overlaps(&self, other_start: DateTime<Utc>, other_end: DateTime<Utc>) -> bool {
        self.start < other_end && self.end > other_start
    }
}
