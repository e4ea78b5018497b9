//! Validation and error-mapping tests over the live HTTP surface.
//!
//! Exercises the error taxonomy end to end: 400 for constraint violations
//! and malformed input, 404 for unknown ids, each with a JSON `{"message"}`
//! body.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use reqwest::StatusCode;
use taskdeck::api::{ApiClient, ApiError};
use taskdeck_proto::task::{DEFAULT_PRIORITY, NewTask, TaskId};
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

/// Asserts an [`ApiError::Server`] with the given status.
fn assert_status(result: Result<impl std::fmt::Debug, ApiError>, expected: StatusCode) {
    match result {
        Err(ApiError::Server { status, message }) => {
            assert_eq!(status, expected);
            assert!(!message.is_empty());
        }
        other => panic!("expected {expected} error, got {other:?}"),
    }
}

#[tokio::test]
async fn priority_zero_and_eleven_are_rejected() {
    let (client, _, server) = start_test_server().await;

    for priority in [0u8, 11] {
        let result = client
            .create(&NewTask {
                task: "x".to_string(),
                priority: Some(priority),
                ..NewTask::default()
            })
            .await;
        assert_status(result, StatusCode::BAD_REQUEST);
    }

    // Nothing slipped in.
    assert!(client.list().await.expect("list").is_empty());

    server.abort();
}

#[tokio::test]
async fn boundary_priorities_are_accepted() {
    let (client, _, server) = start_test_server().await;

    for priority in [1u8, 10] {
        let created = client
            .create(&NewTask {
                task: format!("p{priority}"),
                priority: Some(priority),
                ..NewTask::default()
            })
            .await
            .expect("create");
        assert_eq!(created.priority, priority);
    }

    server.abort();
}

#[tokio::test]
async fn empty_task_text_is_rejected() {
    let (client, _, server) = start_test_server().await;

    assert_status(
        client.create(&NewTask::with_text("")).await,
        StatusCode::BAD_REQUEST,
    );
    assert_status(
        client.create(&NewTask::with_text("   ")).await,
        StatusCode::BAD_REQUEST,
    );

    server.abort();
}

#[tokio::test]
async fn bare_task_text_gets_documented_defaults() {
    let (_, base, server) = start_test_server().await;

    // Raw JSON with only the task key, as the sparsest client would send.
    let response = reqwest::Client::new()
        .post(format!("{base}/api/tasks"))
        .header("content-type", "application/json")
        .body(r#"{"task":"Buy milk"}"#)
        .send()
        .await
        .expect("send");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["task"], "Buy milk");
    assert_eq!(body["description"], "");
    assert_eq!(body["priority"], u64::from(DEFAULT_PRIORITY));
    assert_eq!(body["completed"], false);
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());

    server.abort();
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let (client, _, server) = start_test_server().await;
    let ghost = TaskId::new();

    assert_status(
        client
            .update(ghost, &taskdeck_proto::patch::TaskPatch::completed(true))
            .await,
        StatusCode::NOT_FOUND,
    );
    assert_status(client.delete(ghost).await, StatusCode::NOT_FOUND);

    server.abort();
}

#[tokio::test]
async fn second_delete_reports_not_found() {
    let (client, _, server) = start_test_server().await;

    let created = client
        .create(&NewTask::with_text("short-lived"))
        .await
        .expect("create");
    client.delete(created.id).await.expect("first delete");
    assert_status(client.delete(created.id).await, StatusCode::NOT_FOUND);

    server.abort();
}

#[tokio::test]
async fn garbage_id_is_a_client_error() {
    let (_, base, server) = start_test_server().await;

    let response = reqwest::Client::new()
        .delete(format!("{base}/api/tasks/not-a-uuid"))
        .send()
        .await
        .expect("send");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("json");
    assert!(body["message"].as_str().expect("message").contains("not-a-uuid"));

    server.abort();
}

#[tokio::test]
async fn malformed_json_body_is_a_client_error() {
    let (_, base, server) = start_test_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/tasks"))
        .header("content-type", "application/json")
        .body("{ this is not json ]")
        .send()
        .await
        .expect("send");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("json");
    assert!(body["message"].is_string());

    server.abort();
}
