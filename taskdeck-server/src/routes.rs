//! HTTP routes: the JSON CRUD surface over the task store.
//!
//! Four task routes plus a static liveness endpoint:
//!
//! | Method | Path              | Success                     |
//! |--------|-------------------|-----------------------------|
//! | GET    | `/api/tasks`      | 200, all tasks newest first |
//! | POST   | `/api/tasks`      | 201, created task           |
//! | PUT    | `/api/tasks/{id}` | 200, updated task           |
//! | DELETE | `/api/tasks/{id}` | 200, confirmation message   |
//! | GET    | `/api/test`       | 200, liveness message       |
//!
//! Every failure body is `{"message": "..."}`. Handlers hold no state of
//! their own; the shared [`ServerState`] owns the store.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use taskdeck_proto::api::{Confirmation, DELETED_MESSAGE, ErrorBody, LIVENESS_MESSAGE};
use taskdeck_proto::patch::TaskPatch;
use taskdeck_proto::task::{NewTask, Task, TaskId};

use crate::store::{StoreError, TaskStore};

/// Shared state handed to every handler.
pub struct ServerState {
    /// The task collection.
    pub store: TaskStore,
}

impl ServerState {
    /// Creates server state around an opened store.
    #[must_use]
    pub const fn new(store: TaskStore) -> Self {
        Self { store }
    }
}

/// An error response: status code plus a JSON `{"message"}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 400 with the given message.
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::Invalid(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::Persist { .. } | StoreError::Load { .. } | StoreError::Corrupt { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "store failure");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

/// Builds the API router around shared server state.
pub fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            axum::routing::put(update_task).delete(delete_task),
        )
        .route("/api/test", get(liveness))
        .with_state(state)
}

/// Starts the API server, returning the bound address and the serve task.
///
/// Binding to port 0 picks an OS-assigned port, which is how the
/// integration tests run an in-process server.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
    state: Arc<ServerState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "api server error");
        }
    });

    Ok((bound_addr, handle))
}

/// `GET /api/tasks` — all tasks, newest first.
async fn list_tasks(State(state): State<Arc<ServerState>>) -> Json<Vec<Task>> {
    let tasks = state.store.list().await;
    tracing::debug!(count = tasks.len(), "listing tasks");
    Json(tasks)
}

/// `POST /api/tasks` — create a task; 201 with the created record.
async fn create_task(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(input) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let task = state.store.insert(input).await?;
    tracing::info!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /api/tasks/{id}` — partial update; 200 with the updated record.
async fn update_task(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let task = state.store.update(id, &patch).await?;
    tracing::info!(id = %task.id, "task updated");
    Ok(Json(task))
}

/// `DELETE /api/tasks/{id}` — permanent removal; 200 with a confirmation.
async fn delete_task(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Confirmation>, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete(id).await?;
    tracing::info!(id = %id, "task deleted");
    Ok(Json(Confirmation::new(DELETED_MESSAGE)))
}

/// `GET /api/test` — static liveness payload.
async fn liveness() -> Json<Confirmation> {
    Json(Confirmation::new(LIVENESS_MESSAGE))
}

/// Parses the id path segment, mapping garbage to a 400 with a message.
fn parse_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("invalid task id: {raw}")))
}
