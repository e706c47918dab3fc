//! TodoItem Entity
//!
//! The persisted to-do row plus the payload types used to create and
//! partially update it. Field names and serialization match the backend
//! table columns.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::UserId;

/// Priority determines urgency ordering in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "low" => Priority::Low,
            "high" => Priority::High,
            _ => Priority::Medium,
        }
    }
}

/// A to-do item owned by exactly one user
///
/// `id` and `created_at` are assigned by the record store at insert time and
/// never change afterwards. `created_at` is the sole sort key (descending).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier (server-assigned)
    pub id: Uuid,
    /// Owning user, set exactly once at insert
    pub user_id: UserId,
    /// Display text, non-empty at creation
    pub text: String,
    /// Completion status
    pub completed: bool,
    /// Creation timestamp (server-assigned)
    pub created_at: DateTime<Utc>,
    /// Optional deadline, date only. None = no deadline
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    /// Free-text notes, empty by default
    #[serde(default)]
    pub notes: String,
}

impl TodoItem {
    /// Whole calendar days from `today` to the due date, if any
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        days_until_due(self.due_date, today)
    }
}

/// What the user submits to create an item
///
/// The record store fills in `id`, `user_id`, `created_at` and starts the
/// item as not completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoDraft {
    pub text: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}

impl TodoDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: Priority::default(),
            due_date: None,
            notes: String::new(),
        }
    }
}

/// Partial update of the mutable fields
///
/// Unset fields are omitted from the wire payload so the backend leaves them
/// untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TodoPatch {
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Default::default()
        }
    }

    pub fn priority(value: Priority) -> Self {
        Self {
            priority: Some(value),
            ..Default::default()
        }
    }

    pub fn due_date(value: NaiveDate) -> Self {
        Self {
            due_date: Some(value),
            ..Default::default()
        }
    }

    pub fn notes(value: impl Into<String>) -> Self {
        Self {
            notes: Some(value.into()),
            ..Default::default()
        }
    }

    /// Merge the set fields into an item (used for the selected detail item
    /// after a successful partial write)
    pub fn apply_to(&self, item: &mut TodoItem) {
        if let Some(completed) = self.completed {
            item.completed = completed;
        }
        if let Some(priority) = self.priority {
            item.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            item.due_date = Some(due_date);
        }
        if let Some(notes) = &self.notes {
            item.notes = notes.clone();
        }
    }
}

/// Whole calendar days between `today` and a due date
///
/// Date-only comparison: a deadline later today is 0 days away, tomorrow is
/// 1, yesterday is -1. No due date yields no value.
pub fn days_until_due(due_date: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    due_date.map(|due| (due - today).num_days())
}
