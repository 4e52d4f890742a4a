//! Unsaved task state for the creation and edit forms.
//!
//! A [`TaskDraft`] accumulates field values and a working subtask list
//! without touching the store. Nothing in a draft persists until the
//! enclosing form is submitted and the resulting payload round-trips
//! through the store.

use chrono::NaiveDate;

use termtask_proto::task::{Priority, Status, Subtask, Task, TaskPayload};

/// Mutable working copy of a task's fields.
///
/// Used both by the creation form (starting from defaults) and by the
/// edit session (starting from a deep copy of a stored task). Subtask
/// edits operate on the draft's own list; the stored task is never
/// aliased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title text as typed; validated at submit time.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Selected priority.
    pub priority: Priority,
    /// Selected due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Workflow state. Creation submits ignore this and send todo.
    pub status: Status,
    /// Working subtask list.
    pub subtasks: Vec<Subtask>,
}

impl TaskDraft {
    /// Creates a draft pre-filled from a stored task.
    ///
    /// The subtask list is cloned, so later draft edits cannot leak into
    /// the collection the task came from.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task.due_date,
            status: task.status,
            subtasks: task.subtasks.clone(),
        }
    }

    /// Builds the full-document payload this draft describes.
    #[must_use]
    pub fn payload(&self) -> TaskPayload {
        TaskPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            due_date: self.due_date,
            status: self.status,
            subtasks: self.subtasks.clone(),
        }
    }

    /// Appends an unchecked subtask with the trimmed title.
    ///
    /// Returns `false` without changing the list when the title trims to
    /// empty.
    pub fn add_subtask(&mut self, title: &str) -> bool {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.subtasks.push(Subtask::new(trimmed));
        true
    }

    /// Removes the subtask at `index`; later entries shift down one.
    ///
    /// Returns `false` when the index is out of range.
    pub fn remove_subtask(&mut self, index: usize) -> bool {
        if index >= self.subtasks.len() {
            return false;
        }
        self.subtasks.remove(index);
        true
    }

    /// Flips the done flag of the subtask at `index`.
    ///
    /// Returns `false` when the index is out of range.
    pub fn toggle_subtask(&mut self, index: usize) -> bool {
        match self.subtasks.get_mut(index) {
            Some(subtask) => {
                subtask.done = !subtask.done;
                true
            }
            None => false,
        }
    }

    /// Replaces the title of the subtask at `index`.
    ///
    /// The new title is stored verbatim; it may be transiently empty
    /// while being retyped. Returns `false` when the index is out of
    /// range.
    pub fn rename_subtask(&mut self, index: usize, title: &str) -> bool {
        match self.subtasks.get_mut(index) {
            Some(subtask) => {
                subtask.title = title.to_string();
                true
            }
            None => false,
        }
    }
}
