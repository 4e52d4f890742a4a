//! Task model for `TermTask`.
//!
//! These types serialize to exactly the document shape the REST store
//! speaks: `_id` for identity, camelCase field names, lowercase priority
//! strings, kebab-case status strings. [`TaskPayload`] is the create and
//! update body, the full document minus `_id`; the store replaces
//! documents wholesale, it does not patch.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store when a task is created.
///
/// Opaque to clients: never minted locally, never inspected, only echoed
/// back in update and delete requests. Serialized as the `_id` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps a raw store identifier.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Urgency of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// The unmarked middle; the default for new tasks.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Sort rank: high orders before medium orders before low.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Not started; the state every created task begins in.
    #[default]
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// A flat checklist item inside a task.
///
/// Subtasks carry no identity of their own; they are addressed by
/// position within their parent's list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    /// Checklist label.
    pub title: String,
    /// Whether the item has been checked off.
    pub done: bool,
}

impl Subtask {
    /// Creates an unchecked subtask with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            done: false,
        }
    }
}

/// A stored task as the REST store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identity.
    #[serde(rename = "_id")]
    pub id: TaskId,
    /// Short label shown in lists. Never blank for a stored task.
    pub title: String,
    /// Free-form notes; may be empty.
    #[serde(default)]
    pub description: String,
    /// Urgency; medium when the document omits it.
    #[serde(default)]
    pub priority: Priority,
    /// Optional deadline, date precision only.
    #[serde(default, with = "crate::date")]
    pub due_date: Option<chrono::NaiveDate>,
    /// Workflow state; todo when the document omits it.
    #[serde(default)]
    pub status: Status,
    /// Ordered checklist.
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Rebuilds a stored document from an identity and a payload.
    #[must_use]
    pub fn from_payload(id: TaskId, payload: TaskPayload) -> Self {
        Self {
            id,
            title: payload.title,
            description: payload.description,
            priority: payload.priority,
            due_date: payload.due_date,
            status: payload.status,
            subtasks: payload.subtasks,
        }
    }
}

/// Create and update body: the full document minus `_id`.
///
/// Every mutation sends every field. A `PUT` with this body replaces the
/// stored document wholesale, so an outdated payload silently reverts
/// fields it did not mean to touch; callers build payloads from the
/// freshest task state they hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    /// Short label; the store rejects blank titles.
    pub title: String,
    /// Free-form notes; may be empty.
    #[serde(default)]
    pub description: String,
    /// Urgency.
    #[serde(default)]
    pub priority: Priority,
    /// Optional deadline.
    #[serde(default, with = "crate::date")]
    pub due_date: Option<chrono::NaiveDate>,
    /// Workflow state.
    #[serde(default)]
    pub status: Status,
    /// Ordered checklist, replacing the stored one entirely.
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl From<&Task> for TaskPayload {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task.due_date,
            status: task.status,
            subtasks: task.subtasks.clone(),
        }
    }
}
