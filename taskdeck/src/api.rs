//! HTTP client for the taskdeck API.
//!
//! Thin wrapper over reqwest: one method per route, JSON bodies from
//! `taskdeck-proto`. Non-2xx responses are decoded into the server's
//! `{"message"}` error body so the UI can display them verbatim.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use taskdeck_proto::api::{Confirmation, ErrorBody};
use taskdeck_proto::patch::TaskPatch;
use taskdeck_proto::task::{NewTask, Task, TaskId};

/// Errors from talking to the API server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server URL did not parse.
    #[error("invalid server url: {0}")]
    BadUrl(#[from] url::ParseError),

    /// The request never produced a response (connection refused, etc.).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Server {
        /// HTTP status code of the response.
        status: StatusCode,
        /// The server's human-readable message.
        message: String,
    },
}

/// Client for one taskdeck API server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Creates a client for the given base URL (e.g. `http://127.0.0.1:8000`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadUrl`] if the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base: Url::parse(base_url)?,
        })
    }

    /// `GET /api/tasks` — the full list, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let url = self.base.join("api/tasks")?;
        decode(self.http.get(url).send().await?).await
    }

    /// `POST /api/tasks` — create a task, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response
    /// (validation rejections arrive as 400s).
    pub async fn create(&self, input: &NewTask) -> Result<Task, ApiError> {
        let url = self.base.join("api/tasks")?;
        decode(self.http.post(url).json(input).send().await?).await
    }

    /// `PUT /api/tasks/{id}` — partial update, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response
    /// (404 for an unknown id, 400 for a rejected patch).
    pub async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, ApiError> {
        let url = self.base.join(&format!("api/tasks/{id}"))?;
        decode(self.http.put(url).json(patch).send().await?).await
    }

    /// `DELETE /api/tasks/{id}` — permanent removal.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response
    /// (404 for an unknown or already-deleted id).
    pub async fn delete(&self, id: TaskId) -> Result<Confirmation, ApiError> {
        let url = self.base.join(&format!("api/tasks/{id}"))?;
        decode(self.http.delete(url).send().await?).await
    }

    /// `GET /api/test` — the static liveness payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn ping(&self) -> Result<Confirmation, ApiError> {
        let url = self.base.join("api/test")?;
        decode(self.http.get(url).send().await?).await
    }
}

/// Decodes a success body, or turns a non-2xx response into
/// [`ApiError::Server`] using the `{"message"}` body when present.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => format!("server returned {status}"),
    };
    Err(ApiError::Server { status, message })
}
