//! The task collection and its persistence.
//!
//! [`TaskStore`] keeps every task in memory behind an [`RwLock`] and, when
//! opened with a snapshot path, rewrites the whole collection to a JSON file
//! after each mutation. The collection is small by design (a personal to-do
//! list), so a full rewrite per mutation is simpler than any incremental
//! scheme and keeps the on-disk file human-readable.
//!
//! Error cases are kept distinguishable: a constraint violation
//! ([`StoreError::Invalid`]) is not the same as a missing id
//! ([`StoreError::NotFound`]) or a failed disk write
//! ([`StoreError::Persist`]).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::RwLock;

use taskdeck_proto::patch::TaskPatch;
use taskdeck_proto::task::{NewTask, Task, TaskId, ValidationError};

/// Errors produced by [`TaskStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The input violated a field constraint.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// No task with the requested id exists.
    #[error("task not found")]
    NotFound,

    /// Writing the snapshot file failed.
    #[error("failed to persist tasks to {path}: {source}")]
    Persist {
        /// Snapshot path that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Reading the snapshot file failed.
    #[error("failed to read tasks from {path}: {source}")]
    Load {
        /// Snapshot path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot file exists but does not parse as a task collection.
    #[error("snapshot {path} is corrupt: {source}")]
    Corrupt {
        /// Snapshot path that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// In-memory task collection with optional JSON snapshot persistence.
pub struct TaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
    snapshot_path: Option<PathBuf>,
}

impl TaskStore {
    /// Creates an empty store with no on-disk persistence.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            snapshot_path: None,
        }
    }

    /// Opens a store backed by a snapshot file, loading any existing tasks.
    ///
    /// A missing file starts the store empty; it is created on the first
    /// mutation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Load`] if the file exists but cannot be read,
    /// or [`StoreError::Corrupt`] if it cannot be parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tasks = load_snapshot(&path)?;
        tracing::info!(path = %path.display(), count = tasks.len(), "task snapshot loaded");
        Ok(Self {
            tasks: RwLock::new(tasks.into_iter().map(|t| (t.id, t)).collect()),
            snapshot_path: Some(path),
        })
    }

    /// Validates a create request, assigns id and timestamps, and stores the
    /// new task. Returns the created record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] for a constraint violation, or
    /// [`StoreError::Persist`] if the snapshot cannot be written.
    pub async fn insert(&self, input: NewTask) -> Result<Task, StoreError> {
        let task = input.into_task(Utc::now())?;
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id, task.clone());
        if let Err(e) = self.persist(&tasks) {
            // A create that reports failure must not leave the task behind.
            tasks.remove(&task.id);
            return Err(e);
        }
        drop(tasks);
        Ok(task)
    }

    /// Returns all tasks, newest first (`created_at` descending, id
    /// descending as tiebreak).
    pub async fn list(&self) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        let mut all: Vec<Task> = tasks.values().cloned().collect();
        drop(tasks);
        all.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        all
    }

    /// Returns a single task by id, if present.
    pub async fn get(&self, id: TaskId) -> Option<Task> {
        let tasks = self.tasks.read().await;
        tasks.get(&id).cloned()
    }

    /// Applies a partial update to the task with the given id, refreshing
    /// its `updated_at`. Returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id,
    /// [`StoreError::Invalid`] if the patch violates a constraint (the task
    /// is left unmodified), or [`StoreError::Persist`] on snapshot failure.
    pub async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or(StoreError::NotFound)?;
        let previous = task.clone();
        task.apply(patch, Utc::now())?;
        let updated = task.clone();
        if let Err(e) = self.persist(&tasks) {
            if let Some(slot) = tasks.get_mut(&id) {
                *slot = previous;
            }
            return Err(e);
        }
        drop(tasks);
        Ok(updated)
    }

    /// Permanently removes the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id (including a
    /// repeated delete), or [`StoreError::Persist`] on snapshot failure.
    pub async fn delete(&self, id: TaskId) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;
        let removed = tasks.remove(&id).ok_or(StoreError::NotFound)?;
        if let Err(e) = self.persist(&tasks) {
            tasks.insert(id, removed);
            return Err(e);
        }
        drop(tasks);
        Ok(())
    }

    /// Returns the number of stored tasks.
    pub async fn len(&self) -> usize {
        let tasks = self.tasks.read().await;
        tasks.len()
    }

    /// Returns `true` if no tasks are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Writes the current collection to the snapshot file, if configured.
    ///
    /// Called with the write lock held so snapshots cannot interleave. The
    /// file is written to a sibling temp path and renamed into place to
    /// avoid a torn snapshot on crash.
    fn persist(&self, tasks: &HashMap<TaskId, Task>) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let mut all: Vec<&Task> = tasks.values().collect();
        all.sort_by_key(|t| (t.created_at, t.id));
        let json = serde_json::to_string_pretty(&all).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        let write = std::fs::write(&tmp, json).and_then(|()| std::fs::rename(&tmp, path));
        write.map_err(|source| StoreError::Persist {
            path: path.clone(),
            source,
        })
    }
}

/// Loads a task collection from a snapshot file, treating a missing file as
/// an empty collection.
fn load_snapshot(path: &Path) -> Result<Vec<Task>, StoreError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Load {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}
