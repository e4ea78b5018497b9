//! Partial-update semantics over the live HTTP surface.
//!
//! The update contract uses explicit field presence: absent fields stay
//! untouched, present fields are applied even when falsy (`completed:
//! false`, minimum priority), and present-but-invalid fields reject the
//! whole patch without side effects.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use reqwest::StatusCode;
use taskdeck::api::{ApiClient, ApiError};
use taskdeck_proto::patch::TaskPatch;
use taskdeck_proto::task::NewTask;
use taskdeck_server::routes::{ServerState, start_server};
use taskdeck_server::store::TaskStore;

async fn start_test_server() -> (ApiClient, String, tokio::task::JoinHandle<()>) {
    let state = Arc::new(ServerState::new(TaskStore::in_memory()));
    let (addr, handle) = start_server("127.0.0.1:0", state)
        .await
        .expect("failed to start test server");
    let base = format!("http://{addr}");
    let client = ApiClient::new(&base).expect("client");
    (client, base, handle)
}

#[tokio::test]
async fn explicit_false_unsets_completion() {
    let (client, _, server) = start_test_server().await;

    let created = client
        .create(&NewTask {
            task: "already done".to_string(),
            completed: Some(true),
            ..NewTask::default()
        })
        .await
        .expect("create");
    assert!(created.completed);

    let updated = client
        .update(created.id, &TaskPatch::completed(false))
        .await
        .expect("update");
    assert!(!updated.completed, "explicit false must not be dropped");

    server.abort();
}

#[tokio::test]
async fn absent_fields_survive_an_update() {
    let (client, _, server) = start_test_server().await;

    let created = client
        .create(&NewTask {
            task: "paint the shed".to_string(),
            description: Some("green, not blue".to_string()),
            priority: Some(7),
            ..NewTask::default()
        })
        .await
        .expect("create");

    // Only the text changes; everything else must come back as stored.
    let updated = client
        .update(
            created.id,
            &TaskPatch {
                task: Some("paint the shed and the gate".to_string()),
                ..TaskPatch::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.task, "paint the shed and the gate");
    assert_eq!(updated.description, "green, not blue");
    assert_eq!(updated.priority, 7);
    assert!(!updated.completed);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    server.abort();
}

#[tokio::test]
async fn minimum_priority_is_applied_not_ignored() {
    let (client, _, server) = start_test_server().await;

    let created = client
        .create(&NewTask {
            task: "deprioritize me".to_string(),
            priority: Some(9),
            ..NewTask::default()
        })
        .await
        .expect("create");

    let updated = client
        .update(
            created.id,
            &TaskPatch {
                priority: Some(1),
                ..TaskPatch::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.priority, 1);

    server.abort();
}

#[tokio::test]
async fn invalid_priority_rejects_whole_patch() {
    let (client, _, server) = start_test_server().await;

    let created = client
        .create(&NewTask::with_text("stable"))
        .await
        .expect("create");

    let result = client
        .update(
            created.id,
            &TaskPatch {
                task: Some("renamed".to_string()),
                priority: Some(0),
                ..TaskPatch::default()
            },
        )
        .await;
    match result {
        Err(ApiError::Server { status, .. }) => assert_eq!(status, StatusCode::BAD_REQUEST),
        other => panic!("expected 400, got {other:?}"),
    }

    // The rejected patch must not have partially applied.
    let tasks = client.list().await.expect("list");
    assert_eq!(tasks[0].task, "stable");
    assert_eq!(tasks[0].priority, created.priority);

    server.abort();
}

#[tokio::test]
async fn empty_patch_refreshes_updated_at_only() {
    let (client, base, server) = start_test_server().await;

    let created = client
        .create(&NewTask::with_text("untouched"))
        .await
        .expect("create");

    // A literal `{}` body: every field absent.
    let response = reqwest::Client::new()
        .put(format!("{base}/api/tasks/{}", created.id))
        .header("content-type", "application/json")
        .body("{}")
        .send()
        .await
        .expect("send");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["task"], "untouched");
    assert_eq!(body["completed"], false);

    server.abort();
}
