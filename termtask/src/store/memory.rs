//! In-memory store for tests and offline development.
//!
//! [`MemoryStore`] implements [`RemoteStore`] against a plain `Vec`,
//! with the same validation the real service applies: blank titles are
//! rejected with 400 and unknown ids with 404. Clones share state, so a
//! test can hand one handle to the background store task and keep
//! another for seeding and inspection.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use termtask_proto::task::{Task, TaskId, TaskPayload};

use super::{RemoteStore, StoreError};

/// Shared in-memory task collection with service-shaped validation.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    /// Stored tasks in creation order.
    tasks: RwLock<Vec<Task>>,
    /// Source for the next minted id.
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id(&self) -> TaskId {
        let n = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        TaskId::from_raw(format!("t{n}"))
    }
}

fn reject_blank_title(payload: &TaskPayload) -> Result<(), StoreError> {
    if payload.title.trim().is_empty() {
        return Err(StoreError::Api {
            status: 400,
            message: "title is required".to_string(),
        });
    }
    Ok(())
}

fn not_found(id: &TaskId) -> StoreError {
    StoreError::Api {
        status: 404,
        message: format!("no task with id {id}"),
    }
}

impl RemoteStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.inner.tasks.read().await.clone())
    }

    async fn create(&self, payload: &TaskPayload) -> Result<Task, StoreError> {
        reject_blank_title(payload)?;
        let task = Task::from_payload(self.mint_id(), payload.clone());
        self.inner.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: &TaskId, payload: &TaskPayload) -> Result<Task, StoreError> {
        reject_blank_title(payload)?;
        let mut tasks = self.inner.tasks.write().await;
        let slot = tasks
            .iter_mut()
            .find(|task| task.id == *id)
            .ok_or_else(|| not_found(id))?;
        *slot = Task::from_payload(id.clone(), payload.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let mut tasks = self.inner.tasks.write().await;
        let position = tasks
            .iter()
            .position(|task| task.id == *id)
            .ok_or_else(|| not_found(id))?;
        tasks.remove(position);
        Ok(())
    }
}
