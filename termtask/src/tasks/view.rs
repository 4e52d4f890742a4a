//! Pure presentation pipeline over the task collection.
//!
//! Filtering and sorting never mutate stored tasks. [`apply`] borrows
//! from the collection and produces a fresh ordering on every call, so
//! the view is always derived state and can never drift from it.

use chrono::NaiveDate;

use termtask_proto::task::{Status, Task};

/// Which workflow states the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every task regardless of status.
    #[default]
    All,
    /// Only tasks still to do.
    Todo,
    /// Only tasks in progress.
    InProgress,
    /// Only finished tasks.
    Done,
}

impl StatusFilter {
    /// Whether a task with `status` passes this filter.
    #[must_use]
    pub fn matches(self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Todo => status == Status::Todo,
            Self::InProgress => status == Status::InProgress,
            Self::Done => status == Status::Done,
        }
    }

    /// The next filter in the cycle order shown in the status bar.
    #[must_use]
    pub fn cycled(self) -> Self {
        match self {
            Self::All => Self::Todo,
            Self::Todo => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::All,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::All => "all",
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        };
        write!(f, "{label}")
    }
}

/// How the visible list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Server order, untouched.
    #[default]
    None,
    /// High priority first.
    Priority,
    /// Earliest due date first; date-less tasks last.
    DueDate,
}

impl SortKey {
    /// The next sort key in the cycle order shown in the status bar.
    #[must_use]
    pub fn cycled(self) -> Self {
        match self {
            Self::None => Self::Priority,
            Self::Priority => Self::DueDate,
            Self::DueDate => Self::None,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Priority => "priority",
            Self::DueDate => "due date",
        };
        write!(f, "{label}")
    }
}

/// Sort key placing dated tasks first, ascending, date-less tasks last.
fn due_date_key(due_date: Option<NaiveDate>) -> (bool, Option<NaiveDate>) {
    (due_date.is_none(), due_date)
}

/// Filters then orders the collection for display.
///
/// Both sorts are stable, so tasks that compare equal keep their
/// collection order. With [`SortKey::None`] the filtered tasks come
/// back exactly as stored.
#[must_use]
pub fn apply(tasks: &[Task], filter: StatusFilter, sort: SortKey) -> Vec<&Task> {
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| filter.matches(task.status))
        .collect();
    match sort {
        SortKey::None => {}
        SortKey::Priority => visible.sort_by_key(|task| task.priority.rank()),
        SortKey::DueDate => visible.sort_by_key(|task| due_date_key(task.due_date)),
    }
    visible
}
