//! Task list controller: local state plus store command generation.
//!
//! `TaskManager` owns the loaded collection, the creation draft, and the
//! edit session. Mutating operations validate against local state and
//! hand back a [`StoreCommand`] for the caller to dispatch; the
//! collection itself only changes when [`apply_event`](TaskManager::apply_event)
//! receives fresh server state.

use termtask_proto::task::{Status, Task, TaskId, TaskPayload};

use crate::store::{StoreCommand, StoreEvent};

use super::TaskError;
use super::draft::TaskDraft;
use super::view::{self, SortKey, StatusFilter};

/// Whether a stored task is currently being edited.
///
/// At most one task can be edited at a time. Beginning a new edit
/// replaces any active session; saving or cancelling returns to
/// [`Viewing`](EditSession::Viewing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    /// No task is being edited.
    #[default]
    Viewing,
    /// `id` is being edited through `draft`.
    Editing {
        /// Identifier of the stored task under edit.
        id: TaskId,
        /// Working copy of that task's fields.
        draft: TaskDraft,
    },
}

/// Controller for the task collection and its pending local edits.
///
/// All mutations are pessimistic: an operation returns the
/// [`StoreCommand`] describing the remote change, and local state stays
/// as-is until the store round-trips and a [`StoreEvent::Loaded`]
/// replaces the collection.
#[derive(Debug, Default)]
pub struct TaskManager {
    /// Last collection received from the store, in server order.
    tasks: Vec<Task>,
    /// Exclusive edit session over one stored task.
    session: EditSession,
    /// In-progress creation form state, if the form is open.
    draft: Option<TaskDraft>,
    /// Active status filter for the visible list.
    filter: StatusFilter,
    /// Active sort key for the visible list.
    sort: SortKey,
}

impl TaskManager {
    /// Creates a controller with no tasks loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a fresh copy of the collection from the store.
    #[must_use]
    pub fn reload(&self) -> StoreCommand {
        StoreCommand::LoadAll
    }

    // --- creation draft ---

    /// Opens a blank creation draft, replacing any previous one.
    pub fn open_draft(&mut self) {
        self.draft = Some(TaskDraft::default());
    }

    /// Closes the creation draft, dropping anything typed into it.
    pub fn discard_draft(&mut self) {
        self.draft = None;
    }

    /// Submits the creation draft as a new task.
    ///
    /// The draft stays open until a [`StoreEvent::Created`] confirms the
    /// task exists, so a failed request keeps the typed values for
    /// another attempt. The payload always carries [`Status::Todo`]
    /// regardless of the draft's status field, and the title is sent as
    /// typed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NoDraft`] if no draft is open, or
    /// [`TaskError::TitleEmpty`] if the title is blank after trimming.
    pub fn submit_draft(&self) -> Result<StoreCommand, TaskError> {
        let draft = self.draft.as_ref().ok_or(TaskError::NoDraft)?;
        if draft.title.trim().is_empty() {
            return Err(TaskError::TitleEmpty);
        }
        let mut payload = draft.payload();
        payload.status = Status::Todo;
        Ok(StoreCommand::Create(payload))
    }

    // --- edit session ---

    /// Begins editing the task with `id`, seeding the draft from its
    /// stored fields. An already-active session is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] if no task has that id.
    pub fn begin_edit(&mut self, id: &TaskId) -> Result<(), TaskError> {
        let task = self.find_task(id)?;
        self.session = EditSession::Editing {
            id: id.clone(),
            draft: TaskDraft::from_task(task),
        };
        Ok(())
    }

    /// Abandons the active edit session, if any, dropping its draft.
    pub fn cancel_edit(&mut self) {
        self.session = EditSession::Viewing;
    }

    /// Ends the edit session and returns the full-document update it
    /// produced.
    ///
    /// The session is over once this returns, whether or not the store
    /// request later succeeds; a failed save does not reopen the form.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NoSession`] if no edit session is active.
    pub fn save_edit(&mut self) -> Result<StoreCommand, TaskError> {
        match std::mem::take(&mut self.session) {
            EditSession::Viewing => Err(TaskError::NoSession),
            EditSession::Editing { id, draft } => Ok(StoreCommand::Update {
                id,
                payload: draft.payload(),
            }),
        }
    }

    // --- direct mutations ---

    /// Replaces the status of the task with `id`.
    ///
    /// The returned update carries the task's other fields unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] if no task has that id.
    pub fn set_status(&self, id: &TaskId, status: Status) -> Result<StoreCommand, TaskError> {
        let task = self.find_task(id)?;
        let mut payload = TaskPayload::from(task);
        payload.status = status;
        Ok(StoreCommand::Update {
            id: id.clone(),
            payload,
        })
    }

    /// Flips the done flag of one subtask of the task with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] if no task has that id, or
    /// [`TaskError::SubtaskIndex`] if `index` is out of range.
    pub fn toggle_subtask(&self, id: &TaskId, index: usize) -> Result<StoreCommand, TaskError> {
        let task = self.find_task(id)?;
        let mut payload = TaskPayload::from(task);
        let Some(subtask) = payload.subtasks.get_mut(index) else {
            return Err(TaskError::SubtaskIndex(index));
        };
        subtask.done = !subtask.done;
        Ok(StoreCommand::Update {
            id: id.clone(),
            payload,
        })
    }

    /// Deletes the task with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] if no task has that id.
    pub fn delete(&self, id: &TaskId) -> Result<StoreCommand, TaskError> {
        self.find_task(id)?;
        Ok(StoreCommand::Delete(id.clone()))
    }

    // --- view state ---

    /// Sets the status filter for [`visible`](Self::visible).
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Sets the sort key for [`visible`](Self::visible).
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// The collection as currently filtered and sorted for display.
    #[must_use]
    pub fn visible(&self) -> Vec<&Task> {
        view::apply(&self.tasks, self.filter, self.sort)
    }

    // --- store events ---

    /// Folds a store event into local state.
    ///
    /// [`StoreEvent::Loaded`] replaces the collection wholesale.
    /// [`StoreEvent::Created`] confirms a submitted draft and closes it.
    /// [`StoreEvent::Failed`] changes nothing here; the collection keeps
    /// showing the last loaded state.
    pub fn apply_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Loaded(tasks) => self.tasks = tasks,
            StoreEvent::Created(_) => self.draft = None,
            StoreEvent::Failed { .. } => {}
        }
    }

    // --- accessors ---

    /// The loaded collection in server order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id in the loaded collection.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == *id)
    }

    /// The current edit session.
    #[must_use]
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Id of the task under edit, if a session is active.
    #[must_use]
    pub fn editing_id(&self) -> Option<&TaskId> {
        match &self.session {
            EditSession::Viewing => None,
            EditSession::Editing { id, .. } => Some(id),
        }
    }

    /// Mutable access to the edit session's draft, if one is active.
    pub fn edit_draft_mut(&mut self) -> Option<&mut TaskDraft> {
        match &mut self.session {
            EditSession::Viewing => None,
            EditSession::Editing { draft, .. } => Some(draft),
        }
    }

    /// The open creation draft, if any.
    #[must_use]
    pub fn draft(&self) -> Option<&TaskDraft> {
        self.draft.as_ref()
    }

    /// Mutable access to the open creation draft, if any.
    pub fn draft_mut(&mut self) -> Option<&mut TaskDraft> {
        self.draft.as_mut()
    }

    /// The active status filter.
    #[must_use]
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// The active sort key.
    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Returns the task with `id`, or an error if it is not loaded.
    fn find_task(&self, id: &TaskId) -> Result<&Task, TaskError> {
        self.find(id)
            .ok_or_else(|| TaskError::TaskNotFound(id.to_string()))
    }
}
