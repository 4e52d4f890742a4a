//! HTTP routes for the task service.
//!
//! The API surface the TUI client persists through:
//! - `GET    /api/tasks`      — the full collection
//! - `POST   /api/tasks`      — create a task from a payload
//! - `PUT    /api/tasks/{id}` — replace a document wholesale
//! - `DELETE /api/tasks/{id}` — remove a document
//!
//! Rejections carry a JSON body of the form `{"error": "..."}` so the
//! client can surface the reason without parsing HTML.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use termtask_proto::task::{TaskId, TaskPayload};

use crate::store::TaskStore;

/// Builds the service router over a shared store.
pub fn router(store: Arc<TaskStore>) -> axum::Router {
    axum::Router::new()
        .route(
            "/api/tasks",
            axum::routing::get(list_tasks).post(create_task),
        )
        .route(
            "/api/tasks/{id}",
            axum::routing::put(replace_task).delete(delete_task),
        )
        .with_state(store)
}

async fn list_tasks(State(store): State<Arc<TaskStore>>) -> Response {
    Json(store.list().await).into_response()
}

async fn create_task(
    State(store): State<Arc<TaskStore>>,
    Json(payload): Json<TaskPayload>,
) -> Response {
    if payload.title.trim().is_empty() {
        return reject(StatusCode::BAD_REQUEST, "title is required");
    }
    let task = store.insert(payload).await;
    tracing::info!(id = %task.id, title = %task.title, "task created");
    (StatusCode::CREATED, Json(task)).into_response()
}

async fn replace_task(
    State(store): State<Arc<TaskStore>>,
    Path(id): Path<String>,
    Json(payload): Json<TaskPayload>,
) -> Response {
    if payload.title.trim().is_empty() {
        return reject(StatusCode::BAD_REQUEST, "title is required");
    }
    let id = TaskId::from_raw(id);
    match store.replace(&id, payload).await {
        Some(task) => {
            tracing::info!(id = %task.id, "task replaced");
            Json(task).into_response()
        }
        None => unknown_id(&id),
    }
}

async fn delete_task(State(store): State<Arc<TaskStore>>, Path(id): Path<String>) -> Response {
    let id = TaskId::from_raw(id);
    if store.remove(&id).await {
        tracing::info!(id = %id, "task deleted");
        Json(serde_json::json!({})).into_response()
    } else {
        unknown_id(&id)
    }
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn unknown_id(id: &TaskId) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": format!("no task with id {id}") })),
    )
        .into_response()
}

/// Starts the task service on the given address and returns the bound
/// address and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(TaskStore::new())).await
}

/// Starts the task service with a pre-populated [`TaskStore`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    store: Arc<TaskStore>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(store);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task service error");
        }
    });

    Ok((bound_addr, handle))
}
