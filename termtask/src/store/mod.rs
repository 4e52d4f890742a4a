//! Remote persistence layer for the task collection.
//!
//! Defines the [`RemoteStore`] trait that store backends satisfy, plus
//! the command/event vocabulary exchanged with the background store
//! task. Concrete implementations:
//! - [`http::HttpStore`] — REST client against the task service
//! - [`memory::MemoryStore`] — in-process store for tests

pub mod http;
pub mod memory;

use std::fmt;

use termtask_proto::task::{Task, TaskId, TaskPayload};

/// Errors that can occur during remote store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a usable response: connection refused,
    /// malformed body, or any other transport-level failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("server rejected request (status {status}): {message}")]
    Api {
        /// HTTP status code of the rejection.
        status: u16,
        /// Error text from the response body, or the raw body.
        message: String,
    },
}

/// Which store operation an event or log line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    /// Fetching the full collection.
    Load,
    /// Creating a task.
    Create,
    /// Replacing a task document.
    Update,
    /// Deleting a task.
    Delete,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Requests sent from the UI loop to the background store task.
///
/// Every mutation is full-document: the payload carries all fields, and
/// the service replaces the stored document with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Fetch the whole collection.
    LoadAll,
    /// Create a new task from the payload.
    Create(TaskPayload),
    /// Replace the document with `id` wholesale.
    Update {
        /// Target task.
        id: TaskId,
        /// Replacement document.
        payload: TaskPayload,
    },
    /// Delete the task with `id`.
    Delete(TaskId),
}

/// Notifications flowing from the background store task to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A fresh copy of the collection, replacing whatever was shown.
    Loaded(Vec<Task>),
    /// A submitted creation was accepted; the new task as stored.
    Created(Task),
    /// An operation failed. The collection on screen is unchanged.
    Failed {
        /// Which operation failed.
        op: StoreOp,
        /// Human-readable failure description, already logged.
        message: String,
    },
}

/// Async interface to the task persistence service.
///
/// Implementations own their connection state and must be safe to call
/// from the background store task. Mutations return the task as the
/// service stored it, but callers should treat a follow-up
/// [`list`](RemoteStore::list) as the source of truth.
pub trait RemoteStore: Send + Sync {
    /// Fetch every task, in the service's storage order.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Task>, StoreError>> + Send;

    /// Create a task from `payload` and return it with its new id.
    fn create(
        &self,
        payload: &TaskPayload,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Replace the document with `id` by `payload`.
    fn update(
        &self,
        id: &TaskId,
        payload: &TaskPayload,
    ) -> impl std::future::Future<Output = Result<Task, StoreError>> + Send;

    /// Delete the task with `id`.
    fn delete(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
