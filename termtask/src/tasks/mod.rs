//! Local task state and the controller driving it.
//!
//! [`TaskManager`] owns the client's copy of the task collection together
//! with the creation draft, the exclusive edit session, and the active
//! filter and sort. Mutating operations validate against local state and
//! hand back a [`StoreCommand`](crate::store::StoreCommand) for the caller
//! to dispatch; the collection itself only changes when a store event
//! carries fresh server state back in.

pub mod draft;
pub mod manager;
pub mod view;

pub use draft::TaskDraft;
pub use manager::{EditSession, TaskManager};
pub use view::{SortKey, StatusFilter};

use thiserror::Error;

/// Errors that can occur during local task operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task title cannot be blank.
    #[error("task title cannot be blank")]
    TitleEmpty,
    /// Task with the given ID is not in the local collection.
    #[error("task not found: {0}")]
    TaskNotFound(String),
    /// Subtask index is out of range.
    #[error("no subtask at index {0}")]
    SubtaskIndex(usize),
    /// No creation draft is open.
    #[error("no draft is open")]
    NoDraft,
    /// No edit session is active.
    #[error("no edit session is active")]
    NoSession,
}
