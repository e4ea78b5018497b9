//! Partial updates with explicit field presence.
//!
//! A [`TaskPatch`] carries `Option` per field so that "absent" and "set to a
//! falsy value" are distinguishable: `{"completed": false}` flips the flag
//! off, while omitting `completed` leaves it alone. The same rule applies to
//! every field, so a present-but-invalid value (blank text, out-of-range
//! priority) is a validation error rather than being silently ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Task, ValidationError, validate_priority};

/// A partial update to a single task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    /// Replacement to-do text, if present. Must not be blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// Replacement description, if present. May be empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement priority, if present. Range-checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// Replacement completion flag, if present. `false` is honored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// A patch that only sets the completion flag.
    #[must_use]
    pub const fn completed(value: bool) -> Self {
        Self {
            task: None,
            description: None,
            priority: None,
            completed: Some(value),
        }
    }

    /// Returns `true` if no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.task.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
    }

    /// Checks the constraints of every present field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank `task` or an out-of-range
    /// `priority`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(task) = &self.task
            && task.trim().is_empty()
        {
            return Err(ValidationError::EmptyTask);
        }
        if let Some(p) = self.priority {
            validate_priority(p)?;
        }
        Ok(())
    }
}

impl Task {
    /// Applies a patch in place, refreshing `updated_at` to `now`.
    ///
    /// Validation happens before any field is touched, so a rejected patch
    /// leaves the task unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if a present field violates its
    /// constraints.
    pub fn apply(&mut self, patch: &TaskPatch, now: DateTime<Utc>) -> Result<(), ValidationError> {
        patch.validate()?;
        if let Some(task) = &patch.task {
            self.task.clone_from(task);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now;
        Ok(())
    }
}
