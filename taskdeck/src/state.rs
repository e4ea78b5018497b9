//! Reducer-style list state: a plain state object plus pure transitions.
//!
//! Every change to the mirrored task list flows through [`ListState::apply`]
//! with an [`Action`], independent of any rendering or networking concern.
//! A failed request only sets the error message; the previously loaded
//! tasks are never touched, since no optimistic mutation happens before a
//! response arrives.

use taskdeck_proto::task::{Task, TaskId};

/// One completed server interaction, applied to the local mirror.
#[derive(Debug, Clone)]
pub enum Action {
    /// A list fetch succeeded; replaces the whole mirror.
    Loaded(Vec<Task>),
    /// A create succeeded; the new task is prepended (newest first).
    Created(Task),
    /// An update succeeded; the matching entry is replaced in place.
    Updated(Task),
    /// A delete succeeded; the matching entry is removed.
    Deleted(TaskId),
    /// A request failed; the message is surfaced, tasks stay untouched.
    Failed(String),
}

/// The client's mirror of the server-side task list.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Tasks in display order (newest first, as the server lists them).
    pub tasks: Vec<Task>,
    /// True until the first load (or load failure) completes.
    pub loading: bool,
    /// Message from the most recent failed request, if any.
    pub error: Option<String>,
}

impl ListState {
    /// A fresh state awaiting its first load.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// Applies one action. Pure state transition: no I/O, no rendering.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Loaded(tasks) => {
                self.tasks = tasks;
                self.loading = false;
                self.error = None;
            }
            Action::Created(task) => {
                self.tasks.insert(0, task);
                self.error = None;
            }
            Action::Updated(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
                self.error = None;
            }
            Action::Deleted(id) => {
                self.tasks.retain(|t| t.id != id);
                self.error = None;
            }
            Action::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
        }
    }

    /// Looks up a task's position by id.
    #[must_use]
    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}
