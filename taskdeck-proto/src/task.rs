//! The task record and its creation input.
//!
//! A [`Task`] is the sole entity in the system: a line of to-do text with an
//! optional description, a priority between [`PRIORITY_MIN`] and
//! [`PRIORITY_MAX`], and a completion flag. Tasks serialize as JSON objects
//! with camelCase keys (`createdAt`, `updatedAt`) to match the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest allowed task priority.
pub const PRIORITY_MIN: u8 = 1;

/// Highest allowed task priority.
pub const PRIORITY_MAX: u8 = 10;

/// Priority assigned when a create request does not specify one.
pub const DEFAULT_PRIORITY: u8 = 5;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A field constraint violation in a create or update request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The task text was missing or blank.
    #[error("task text must not be empty")]
    EmptyTask,

    /// The priority fell outside the allowed range.
    #[error("priority must be between {PRIORITY_MIN} and {PRIORITY_MAX}, got {0}")]
    PriorityOutOfRange(u8),
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier, assigned by the store on creation.
    pub id: TaskId,
    /// The to-do text. Never blank.
    pub task: String,
    /// Free-form details. Defaults to the empty string.
    #[serde(default)]
    pub description: String,
    /// Priority within `[PRIORITY_MIN, PRIORITY_MAX]`.
    pub priority: u8,
    /// Whether the task has been completed.
    pub completed: bool,
    /// When the task was created. Immutable.
    pub created_at: DateTime<Utc>,
    /// When the task was last mutated. Refreshed on every update.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task. Optional fields take documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTask {
    /// The to-do text. Required, must not be blank.
    pub task: String,
    /// Optional details; defaults to `""`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional priority; defaults to [`DEFAULT_PRIORITY`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// Optional completion flag; defaults to `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl NewTask {
    /// Creates an input with only the task text set.
    #[must_use]
    pub fn with_text(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            ..Self::default()
        }
    }

    /// Checks the field constraints without building a task.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the task text is blank or the priority
    /// is outside the allowed range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.task.trim().is_empty() {
            return Err(ValidationError::EmptyTask);
        }
        if let Some(p) = self.priority {
            validate_priority(p)?;
        }
        Ok(())
    }

    /// Builds a [`Task`] from this input, assigning a fresh id and applying
    /// defaults for unset fields. Both timestamps are set to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the input violates field constraints.
    pub fn into_task(self, now: DateTime<Utc>) -> Result<Task, ValidationError> {
        self.validate()?;
        Ok(Task {
            id: TaskId::new(),
            task: self.task,
            description: self.description.unwrap_or_default(),
            priority: self.priority.unwrap_or(DEFAULT_PRIORITY),
            completed: self.completed.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Checks that a priority is within the allowed range.
///
/// # Errors
///
/// Returns [`ValidationError::PriorityOutOfRange`] otherwise.
pub const fn validate_priority(priority: u8) -> Result<(), ValidationError> {
    if priority < PRIORITY_MIN || priority > PRIORITY_MAX {
        return Err(ValidationError::PriorityOutOfRange(priority));
    }
    Ok(())
}
