//! In-memory task collection backing the service.
//!
//! The [`TaskStore`] holds the tasks in insertion order, which is also
//! the order `GET /api/tasks` returns. Replacing a document keeps its
//! position; only creation appends.

use tokio::sync::RwLock;

use termtask_proto::task::{Task, TaskId, TaskPayload};

/// In-memory task collection.
///
/// Thread-safe via [`RwLock`]. Ids are minted as UUIDv7 strings, so
/// they sort by creation time should anything ever care.
#[derive(Default)]
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `tasks`, in order.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }

    /// Returns the whole collection in storage order.
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Appends a new task built from `payload` and returns it.
    pub async fn insert(&self, payload: TaskPayload) -> Task {
        let task = Task::from_payload(mint_id(), payload);
        let mut tasks = self.tasks.write().await;
        tasks.push(task.clone());
        task
    }

    /// Replaces the document with `id` wholesale, keeping its position.
    ///
    /// Returns the stored task, or `None` if `id` is unknown.
    pub async fn replace(&self, id: &TaskId, payload: TaskPayload) -> Option<Task> {
        let mut tasks = self.tasks.write().await;
        let slot = tasks.iter_mut().find(|task| &task.id == id)?;
        *slot = Task::from_payload(id.clone(), payload);
        Some(slot.clone())
    }

    /// Removes the document with `id`. Returns whether it existed.
    pub async fn remove(&self, id: &TaskId) -> bool {
        let mut tasks = self.tasks.write().await;
        match tasks.iter().position(|task| &task.id == id) {
            Some(index) => {
                tasks.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Mints a fresh task id.
fn mint_id() -> TaskId {
    TaskId::from_raw(uuid::Uuid::now_v7().to_string())
}
