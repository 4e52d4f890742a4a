//! REST store client speaking the task service's JSON contract.
//!
//! Endpoints are `{base}/tasks` for list/create and `{base}/tasks/{id}`
//! for update/delete. Rejections carry an `{"error": "..."}` body; the
//! client surfaces that text, falling back to the raw body when the
//! service sends something else.

use serde::Deserialize;

use termtask_proto::task::{Task, TaskId, TaskPayload};

use super::{RemoteStore, StoreError};

/// Client for the task service's REST endpoints.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

/// Body the service attaches to 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Extracts the service's error text from a rejection body.
fn api_message(body: String) -> String {
    serde_json::from_str::<ErrorBody>(&body).map_or(body, |parsed| parsed.error)
}

/// Turns a non-success response into [`StoreError::Api`].
async fn reject(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    StoreError::Api {
        status,
        message: api_message(body),
    }
}

impl HttpStore {
    /// Creates a store client against `base_url`, for example
    /// `http://localhost:5000/api`. A trailing slash is tolerated.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn document_url(&self, id: &TaskId) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }
}

impl RemoteStore for HttpStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let response = self.client.get(self.collection_url()).send().await?;
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        Ok(response.json().await?)
    }

    async fn create(&self, payload: &TaskPayload) -> Result<Task, StoreError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        Ok(response.json().await?)
    }

    async fn update(&self, id: &TaskId, payload: &TaskPayload) -> Result<Task, StoreError> {
        let response = self
            .client
            .put(self.document_url(id))
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let response = self.client.delete(self.document_url(id)).send().await?;
        if !response.status().is_success() {
            return Err(reject(response).await);
        }
        Ok(())
    }
}
