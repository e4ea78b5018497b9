//! End-to-end CRUD tests against a real in-process server.
//!
//! Each test binds the API server to an OS-assigned port and drives it
//! through the client's `ApiClient`, exercising the full HTTP round trip.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use taskdeck::api::ApiClient;
use taskdeck_proto::api::{DELETED_MESSAGE, LIVENESS_MESSAGE};
use taskdeck_proto::patch::TaskPatch;
use taskdeck_proto::task::{DEFAULT_PRIORITY, NewTask};
use taskdeck_server::routes::{ServerState, start_server};
use taskdeck_server::store::TaskStore;

/// Starts an in-memory server and returns a client pointed at it.
async fn start_test_server() -> (ApiClient, tokio::task::JoinHandle<()>) {
    let state = Arc::new(ServerState::new(TaskStore::in_memory()));
    let (addr, handle) = start_server("127.0.0.1:0", state)
        .await
        .expect("failed to start test server");
    let client = ApiClient::new(&format!("http://{addr}")).expect("client");
    (client, handle)
}

#[tokio::test]
async fn liveness_endpoint_answers() {
    let (client, server) = start_test_server().await;

    let body = client.ping().await.expect("ping");
    assert_eq!(body.message, LIVENESS_MESSAGE);

    server.abort();
}

#[tokio::test]
async fn full_task_lifecycle() {
    let (client, server) = start_test_server().await;

    // Create with explicit priority.
    let created = client
        .create(&NewTask {
            task: "Buy milk".to_string(),
            priority: Some(8),
            ..NewTask::default()
        })
        .await
        .expect("create");
    assert_eq!(created.task, "Buy milk");
    assert_eq!(created.description, "");
    assert_eq!(created.priority, 8);
    assert!(!created.completed);

    // Complete it.
    let updated = client
        .update(created.id, &TaskPatch::completed(true))
        .await
        .expect("update");
    assert!(updated.completed);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.created_at <= updated.updated_at);

    // Delete it.
    let confirmation = client.delete(created.id).await.expect("delete");
    assert_eq!(confirmation.message, DELETED_MESSAGE);

    // Gone from the list.
    let tasks = client.list().await.expect("list");
    assert!(tasks.iter().all(|t| t.id != created.id));

    server.abort();
}

#[tokio::test]
async fn create_then_list_round_trips_the_record() {
    let (client, server) = start_test_server().await;

    let created = client
        .create(&NewTask::with_text("water the plants"))
        .await
        .expect("create");
    assert_eq!(created.priority, DEFAULT_PRIORITY);

    let tasks = client.list().await.expect("list");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], created);

    server.abort();
}

#[tokio::test]
async fn list_is_ordered_newest_first() {
    let (client, server) = start_test_server().await;

    let a = client.create(&NewTask::with_text("A")).await.expect("create");
    let b = client.create(&NewTask::with_text("B")).await.expect("create");
    let c = client.create(&NewTask::with_text("C")).await.expect("create");

    let tasks = client.list().await.expect("list");
    let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);

    server.abort();
}

#[tokio::test]
async fn create_returns_http_201() {
    // Raw request, since ApiClient hides the status line on success.
    let state = Arc::new(ServerState::new(TaskStore::in_memory()));
    let (addr, server) = start_server("127.0.0.1:0", state).await.expect("server");

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/tasks"))
        .json(&NewTask::with_text("status check"))
        .send()
        .await
        .expect("send");
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    server.abort();
}
