//! Remote Collection Client
//!
//! Bindings to the task collection endpoint. The service is a generic JSON
//! collection exposing list / create / delete; the server owns id assignment.

use async_trait::async_trait;
use reqwest::Client;

use crate::models::{NewTask, Task};

/// Collection endpoint this client talks to.
const BASE_URL: &str = "https://api.tasklist.app/v1";

/// Owner of the single-user collection.
pub const USER_ID: i64 = 1;

/// Errors from the remote collection.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Transport-level failure (network unreachable, fetch rejected).
    Transport(String),
    /// Server answered with a non-success status.
    Status(u16),
    /// Body was not the JSON shape we expected.
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {}", msg),
            ApiError::Status(code) => write!(f, "unexpected status: {}", code),
            ApiError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Abstract interface to the remote collection.
///
/// The sync engine is generic over this so tests can substitute a scripted
/// fake. Futures are `?Send` because wasm futures are not `Send`.
#[async_trait(?Send)]
pub trait TaskApi {
    /// Fetch the full task list for the collection owner.
    async fn list(&self) -> Result<Vec<Task>, ApiError>;

    /// Create a task; the returned task carries the server-assigned id.
    async fn create(&self, task: &NewTask) -> Result<Task, ApiError>;

    /// Delete a task by id.
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

/// HTTP implementation over the collection endpoint.
#[derive(Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for HttpTaskApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("/tasks?userId={}", USER_ID)))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        let resp = self
            .client
            .post(self.url("/tasks"))
            .json(task)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.url(&format!("/tasks/{}", id)))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}
