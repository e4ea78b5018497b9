//! Bridge between the poll-based TUI loop and async API requests.
//!
//! The main thread never awaits a request. Each user action becomes one
//! [`NetCommand`]; [`ApiBridge::dispatch`] spawns a tokio task that performs
//! the HTTP call and reports the outcome back as an [`Action`] over an mpsc
//! channel, which the event loop drains on every tick.
//!
//! ```text
//! TUI (main thread)  ──  NetCommand  →  spawned request task
//!                    ←─  Action  ──────
//! ```
//!
//! One command spawns exactly one request; there is no queueing, retry, or
//! coalescing of rapid successive actions.

use tokio::sync::mpsc;

use taskdeck_proto::patch::TaskPatch;
use taskdeck_proto::task::{NewTask, TaskId};

use crate::api::ApiClient;
use crate::state::Action;

/// A server interaction requested by the UI.
#[derive(Debug, Clone)]
pub enum NetCommand {
    /// Fetch the full task list.
    Refresh,
    /// Create a task from the form input.
    Create(NewTask),
    /// Apply a partial update to one task.
    Update(TaskId, TaskPatch),
    /// Permanently delete one task.
    Delete(TaskId),
}

/// Spawns one request task per dispatched command.
#[derive(Debug, Clone)]
pub struct ApiBridge {
    client: ApiClient,
    events: mpsc::UnboundedSender<Action>,
}

impl ApiBridge {
    /// Creates a bridge reporting outcomes on the given channel.
    #[must_use]
    pub const fn new(client: ApiClient, events: mpsc::UnboundedSender<Action>) -> Self {
        Self { client, events }
    }

    /// Runs a command in the background; its outcome arrives as an
    /// [`Action`] on the event channel.
    pub fn dispatch(&self, command: NetCommand) {
        tracing::debug!(?command, "dispatching api command");
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let action = run(&client, command).await;
            // The receiver is gone only during shutdown.
            let _ = events.send(action);
        });
    }
}

/// Executes one command, folding both success and failure into an action.
async fn run(client: &ApiClient, command: NetCommand) -> Action {
    match command {
        NetCommand::Refresh => match client.list().await {
            Ok(tasks) => Action::Loaded(tasks),
            Err(e) => Action::Failed(e.to_string()),
        },
        NetCommand::Create(input) => match client.create(&input).await {
            Ok(task) => Action::Created(task),
            Err(e) => Action::Failed(e.to_string()),
        },
        NetCommand::Update(id, patch) => match client.update(id, &patch).await {
            Ok(task) => Action::Updated(task),
            Err(e) => Action::Failed(e.to_string()),
        },
        NetCommand::Delete(id) => match client.delete(id).await {
            Ok(_) => Action::Deleted(id),
            Err(e) => Action::Failed(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use taskdeck_server::routes::{ServerState, start_server};
    use taskdeck_server::store::TaskStore;

    #[tokio::test]
    async fn refresh_reports_loaded_list() {
        let state = Arc::new(ServerState::new(TaskStore::in_memory()));
        let (addr, handle) = start_server("127.0.0.1:0", state)
            .await
            .expect("start server");

        let client = ApiClient::new(&format!("http://{addr}")).expect("client");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = ApiBridge::new(client, tx);

        bridge.dispatch(NetCommand::Refresh);
        let action = rx.recv().await.expect("event");
        assert!(matches!(action, Action::Loaded(tasks) if tasks.is_empty()));

        handle.abort();
    }

    #[tokio::test]
    async fn unreachable_server_reports_failed() {
        // Port 9 (discard) is assumed closed.
        let client = ApiClient::new("http://127.0.0.1:9").expect("client");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bridge = ApiBridge::new(client, tx);

        bridge.dispatch(NetCommand::Refresh);
        let action = rx.recv().await.expect("event");
        assert!(matches!(action, Action::Failed(_)));
    }
}
