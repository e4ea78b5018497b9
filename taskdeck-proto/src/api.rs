//! Miscellaneous HTTP wire bodies shared by server and client.

use serde::{Deserialize, Serialize};

/// JSON body of every non-2xx response: a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// What went wrong, suitable for direct display.
    pub message: String,
}

impl ErrorBody {
    /// Creates an error body from anything displayable.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// JSON body confirming a successful delete, and the liveness payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    /// Static confirmation text.
    pub message: String,
}

impl Confirmation {
    /// Creates a confirmation body.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by `GET /api/test`.
pub const LIVENESS_MESSAGE: &str = "API is up";

/// Body returned by a successful `DELETE /api/tasks/{id}`.
pub const DELETED_MESSAGE: &str = "Task deleted";
