//! Application state and event handling.
//!
//! [`App`] routes key events to the [`TaskManager`] and hands any
//! resulting [`StoreCommand`] back to the caller for dispatch. The
//! screen being shown is always derived from manager state: an active
//! edit session means the edit form, an open draft means the creation
//! form, otherwise the list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use termtask_proto::date;
use termtask_proto::task::{Priority, Status, Task, TaskId};

use crate::store::{StoreCommand, StoreEvent};
use crate::tasks::{EditSession, TaskDraft, TaskManager};

/// Which screen the UI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Task list with the detail panel.
    List,
    /// Creation form over a fresh draft.
    Create,
    /// Edit form over a stored task.
    Edit,
}

/// Which panel is focused on the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Task list is focused (default).
    List,
    /// Detail panel (subtask checklist) is focused.
    Detail,
}

/// Single-line text input with a character-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    /// Current text.
    pub value: String,
    /// Cursor position as a character index.
    pub cursor: usize,
}

impl InputState {
    /// Creates an input pre-filled with `value`, cursor at the end.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        Self {
            cursor: value.chars().count(),
            value: value.to_string(),
        }
    }

    /// Byte offset of the cursor's character index.
    ///
    /// Indexing by characters keeps cursor movement uniform; the byte
    /// offset is only computed when the string is actually spliced, so
    /// multi-byte input can never land on a non-boundary.
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.value.len())
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.value.remove(at);
    }

    /// Move cursor left.
    pub const fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the start.
    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor past the last character.
    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Drop the text and reset the cursor.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// The text on either side of the cursor.
    #[must_use]
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.byte_index())
    }
}

/// Fields of the task form, in Tab traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Title text input.
    #[default]
    Title,
    /// Description text input.
    Description,
    /// Due date text input (`YYYY-MM-DD`).
    DueDate,
    /// Priority selector.
    Priority,
    /// Status selector. Only reachable on the edit form.
    Status,
    /// Subtask list and entry line.
    Subtasks,
}

impl FormField {
    /// Next field in Tab order. The status selector only exists on the
    /// edit form; creation always submits todo.
    #[must_use]
    pub const fn next(self, with_status: bool) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::DueDate,
            Self::DueDate => Self::Priority,
            Self::Priority => {
                if with_status {
                    Self::Status
                } else {
                    Self::Subtasks
                }
            }
            Self::Status => Self::Subtasks,
            Self::Subtasks => Self::Title,
        }
    }

    /// Previous field in Tab order.
    #[must_use]
    pub const fn prev(self, with_status: bool) -> Self {
        match self {
            Self::Title => Self::Subtasks,
            Self::Description => Self::Title,
            Self::DueDate => Self::Description,
            Self::Priority => Self::DueDate,
            Self::Status => Self::Priority,
            Self::Subtasks => {
                if with_status {
                    Self::Status
                } else {
                    Self::Priority
                }
            }
        }
    }
}

/// Editable buffers backing the open form.
///
/// Text fields are edited here and copied into the active draft when
/// the form is submitted. The subtask list lives on the draft itself;
/// the form only tracks the entry line and the selected row.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Field the form cursor is on.
    pub field: FormField,
    /// Title input buffer.
    pub title: InputState,
    /// Description input buffer.
    pub description: InputState,
    /// Due date input buffer, `YYYY-MM-DD` or empty for none.
    pub due_date: InputState,
    /// Entry line for adding or renaming a subtask.
    pub subtask_entry: InputState,
    /// Selected row in the draft's subtask list, if any.
    pub subtask_selected: Option<usize>,
}

impl FormState {
    /// Builds form buffers from a draft's current values.
    fn from_draft(draft: &TaskDraft) -> Self {
        let due = draft
            .due_date
            .map(|d| d.format(date::WIRE_FORMAT).to_string())
            .unwrap_or_default();
        Self {
            field: FormField::Title,
            title: InputState::from_value(&draft.title),
            description: InputState::from_value(&draft.description),
            due_date: InputState::from_value(&due),
            subtask_entry: InputState::default(),
            subtask_selected: None,
        }
    }

    /// The input buffer the current field types into, if it has one.
    fn active_input_mut(&mut self) -> Option<&mut InputState> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Subtasks => Some(&mut self.subtask_entry),
            FormField::Priority | FormField::Status => None,
        }
    }
}

/// Priority selector order: low, medium, high.
const fn next_priority(priority: Priority) -> Priority {
    match priority {
        Priority::Low => Priority::Medium,
        Priority::Medium => Priority::High,
        Priority::High => Priority::Low,
    }
}

const fn prev_priority(priority: Priority) -> Priority {
    match priority {
        Priority::Low => Priority::High,
        Priority::Medium => Priority::Low,
        Priority::High => Priority::Medium,
    }
}

/// Status order: todo, in progress, done.
const fn next_status(status: Status) -> Status {
    match status {
        Status::Todo => Status::InProgress,
        Status::InProgress => Status::Done,
        Status::Done => Status::Todo,
    }
}

const fn prev_status(status: Status) -> Status {
    match status {
        Status::Todo => Status::Done,
        Status::InProgress => Status::Todo,
        Status::Done => Status::InProgress,
    }
}

/// Main application state.
pub struct App {
    /// Task collection controller.
    pub manager: TaskManager,
    /// Which panel is focused on the list screen.
    pub focus: PanelFocus,
    /// Selected row in the visible task list.
    pub selected: usize,
    /// Selected subtask row in the detail panel.
    pub detail_selected: usize,
    /// Editable buffers for the open form.
    pub form: FormState,
    /// Due date display format string (chrono).
    pub date_format: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an application with nothing loaded yet.
    #[must_use]
    pub fn new(date_format: String) -> Self {
        Self {
            manager: TaskManager::new(),
            focus: PanelFocus::List,
            selected: 0,
            detail_selected: 0,
            form: FormState::default(),
            date_format,
            should_quit: false,
        }
    }

    /// The screen currently shown, derived from manager state.
    #[must_use]
    pub fn screen(&self) -> Screen {
        if self.manager.editing_id().is_some() {
            Screen::Edit
        } else if self.manager.draft().is_some() {
            Screen::Create
        } else {
            Screen::List
        }
    }

    /// The task under the list cursor, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.manager.visible().get(self.selected).copied()
    }

    fn selected_task_id(&self) -> Option<TaskId> {
        self.selected_task().map(|task| task.id.clone())
    }

    /// Handle a key event, returning a store command to dispatch.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        // Global shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match self.screen() {
            Screen::List => match self.focus {
                PanelFocus::List => self.handle_list_key(key),
                PanelFocus::Detail => self.handle_detail_key(key),
            },
            Screen::Create | Screen::Edit => self.handle_form_key(key),
        }
    }

    /// Fold a store event into local state.
    pub fn apply_store_event(&mut self, event: StoreEvent) {
        if matches!(event, StoreEvent::Created(_)) {
            // the creation was confirmed; drop the form buffers along
            // with the draft
            self.form = FormState::default();
        }
        self.manager.apply_event(event);
        self.clamp_selection();
    }

    // --- list screen ---

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('r') => Some(self.manager.reload()),
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Tab => {
                if self.selected_task().is_some() {
                    self.focus = PanelFocus::Detail;
                    self.detail_selected = 0;
                }
                None
            }
            KeyCode::Char('n') => {
                self.manager.open_draft();
                self.form = FormState::default();
                None
            }
            KeyCode::Char('e') => {
                self.open_edit_form();
                None
            }
            KeyCode::Char('d') => {
                let id = self.selected_task_id()?;
                match self.manager.delete(&id) {
                    Ok(cmd) => Some(cmd),
                    Err(error) => {
                        tracing::debug!(%error, "delete rejected");
                        None
                    }
                }
            }
            KeyCode::Char(' ') => {
                // checkbox semantics: anything not done becomes done
                let task = self.selected_task()?;
                let target = if task.status == Status::Done {
                    Status::Todo
                } else {
                    Status::Done
                };
                self.dispatch_set_status(target)
            }
            KeyCode::Char('s') => {
                let task = self.selected_task()?;
                let target = next_status(task.status);
                self.dispatch_set_status(target)
            }
            KeyCode::Char('f') => {
                self.manager.set_filter(self.manager.filter().cycled());
                self.clamp_selection();
                None
            }
            KeyCode::Char('o') => {
                self.manager.set_sort(self.manager.sort().cycled());
                self.clamp_selection();
                None
            }
            _ => None,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Tab | KeyCode::Esc => {
                self.focus = PanelFocus::List;
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.selected_subtask_count();
                if self.detail_selected + 1 < count {
                    self.detail_selected += 1;
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail_selected = self.detail_selected.saturating_sub(1);
                None
            }
            KeyCode::Char(' ') => {
                let id = self.selected_task_id()?;
                match self.manager.toggle_subtask(&id, self.detail_selected) {
                    Ok(cmd) => Some(cmd),
                    Err(error) => {
                        tracing::debug!(%error, "subtask toggle rejected");
                        None
                    }
                }
            }
            _ => None,
        }
    }

    fn dispatch_set_status(&mut self, target: Status) -> Option<StoreCommand> {
        let id = self.selected_task_id()?;
        match self.manager.set_status(&id, target) {
            Ok(cmd) => Some(cmd),
            Err(error) => {
                tracing::debug!(%error, "status change rejected");
                None
            }
        }
    }

    fn open_edit_form(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        match self.manager.begin_edit(&id) {
            Ok(()) => {
                if let EditSession::Editing { draft, .. } = self.manager.session() {
                    self.form = FormState::from_draft(draft);
                }
            }
            Err(error) => tracing::debug!(%error, "edit rejected"),
        }
    }

    // --- form screens ---

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        let editing = self.screen() == Screen::Edit;

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.submit_form();
        }
        match key.code {
            KeyCode::Esc => {
                self.close_form();
                None
            }
            KeyCode::BackTab => {
                self.form.field = self.form.field.prev(editing);
                None
            }
            KeyCode::Tab => {
                self.form.field = self.form.field.next(editing);
                None
            }
            _ => match self.form.field {
                FormField::Priority => {
                    self.handle_priority_key(key);
                    None
                }
                FormField::Status => {
                    self.handle_status_key(key);
                    None
                }
                FormField::Subtasks => {
                    self.handle_subtask_key(key);
                    None
                }
                FormField::Title | FormField::Description | FormField::DueDate => {
                    self.handle_text_field_key(key)
                }
            },
        }
    }

    fn handle_text_field_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        if key.code == KeyCode::Enter {
            return self.submit_form();
        }
        if let Some(input) = self.form.active_input_mut() {
            match key.code {
                KeyCode::Char(c) => input.insert(c),
                KeyCode::Backspace => input.backspace(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.home(),
                KeyCode::End => input.end(),
                _ => {}
            }
        }
        None
    }

    fn handle_priority_key(&mut self, key: KeyEvent) {
        let step: fn(Priority) -> Priority = match key.code {
            KeyCode::Left | KeyCode::Char('h') => prev_priority,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => next_priority,
            _ => return,
        };
        if let Some(draft) = self.active_draft_mut() {
            draft.priority = step(draft.priority);
        }
    }

    fn handle_status_key(&mut self, key: KeyEvent) {
        let step: fn(Status) -> Status = match key.code {
            KeyCode::Left | KeyCode::Char('h') => prev_status,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => next_status,
            _ => return,
        };
        if let Some(draft) = self.active_draft_mut() {
            draft.status = step(draft.status);
        }
    }

    /// Keys for the subtask field.
    ///
    /// With no row selected the entry line is in charge: typing edits
    /// it and Enter appends a subtask. Down/Up move a selection through
    /// the list; with a row selected, Space (on an empty entry) toggles
    /// it, Delete removes it, and Enter applies the entry text as its
    /// new title. Up past the first row deselects.
    fn handle_subtask_key(&mut self, key: KeyEvent) {
        let count = self.draft_subtask_count();
        match key.code {
            KeyCode::Down => {
                if count > 0 {
                    self.form.subtask_selected = Some(match self.form.subtask_selected {
                        None => 0,
                        Some(i) => (i + 1).min(count - 1),
                    });
                }
            }
            KeyCode::Up => {
                self.form.subtask_selected = match self.form.subtask_selected {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
            }
            KeyCode::Enter => {
                let text = self.form.subtask_entry.value.clone();
                if text.trim().is_empty() {
                    return;
                }
                let selected = self.form.subtask_selected;
                if let Some(draft) = self.active_draft_mut() {
                    match selected {
                        Some(index) => {
                            draft.rename_subtask(index, text.trim());
                        }
                        None => {
                            draft.add_subtask(&text);
                        }
                    }
                }
                self.form.subtask_entry.clear();
            }
            KeyCode::Char(' ') if self.form.subtask_entry.value.is_empty() => {
                match self.form.subtask_selected {
                    Some(index) => {
                        if let Some(draft) = self.active_draft_mut() {
                            draft.toggle_subtask(index);
                        }
                    }
                    None => self.form.subtask_entry.insert(' '),
                }
            }
            KeyCode::Delete => {
                if self.form.subtask_entry.value.is_empty()
                    && let Some(index) = self.form.subtask_selected
                {
                    if let Some(draft) = self.active_draft_mut() {
                        draft.remove_subtask(index);
                    }
                    self.clamp_subtask_selection();
                }
            }
            KeyCode::Char(c) => self.form.subtask_entry.insert(c),
            KeyCode::Backspace => self.form.subtask_entry.backspace(),
            KeyCode::Left => self.form.subtask_entry.move_left(),
            KeyCode::Right => self.form.subtask_entry.move_right(),
            _ => {}
        }
    }

    fn close_form(&mut self) {
        if self.manager.editing_id().is_some() {
            self.manager.cancel_edit();
        } else {
            self.manager.discard_draft();
        }
        self.form = FormState::default();
    }

    fn submit_form(&mut self) -> Option<StoreCommand> {
        self.commit_form_fields();
        let editing = self.manager.editing_id().is_some();
        let result = if editing {
            self.manager.save_edit()
        } else {
            self.manager.submit_draft()
        };
        match result {
            Ok(cmd) => {
                if editing {
                    // the session is over; creation keeps its buffers
                    // until the store confirms
                    self.form = FormState::default();
                }
                Some(cmd)
            }
            Err(error) => {
                tracing::debug!(%error, "form submit rejected");
                None
            }
        }
    }

    /// Copies the form's text buffers into the active draft.
    ///
    /// The due date is parsed leniently: text that is not a date leaves
    /// the draft without one.
    fn commit_form_fields(&mut self) {
        let title = self.form.title.value.clone();
        let description = self.form.description.value.clone();
        let due_date = date::parse(&self.form.due_date.value);
        if let Some(draft) = self.active_draft_mut() {
            draft.title = title;
            draft.description = description;
            draft.due_date = due_date;
        }
    }

    /// The draft the open form is editing: the session's on the edit
    /// form, the creation draft otherwise.
    fn active_draft_mut(&mut self) -> Option<&mut TaskDraft> {
        if self.manager.editing_id().is_some() {
            self.manager.edit_draft_mut()
        } else {
            self.manager.draft_mut()
        }
    }

    /// The draft behind the open form, if a form is open.
    #[must_use]
    pub fn active_draft(&self) -> Option<&TaskDraft> {
        match self.manager.session() {
            EditSession::Editing { draft, .. } => Some(draft),
            EditSession::Viewing => self.manager.draft(),
        }
    }

    fn draft_subtask_count(&self) -> usize {
        self.active_draft().map_or(0, |draft| draft.subtasks.len())
    }

    fn selected_subtask_count(&self) -> usize {
        self.selected_task().map_or(0, |task| task.subtasks.len())
    }

    // --- selection upkeep ---

    fn select_next(&mut self) {
        let visible = self.manager.visible().len();
        if self.selected + 1 < visible {
            self.selected += 1;
            self.detail_selected = 0;
        }
    }

    fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.detail_selected = 0;
        }
    }

    fn clamp_selection(&mut self) {
        let visible = self.manager.visible().len();
        if visible == 0 {
            self.selected = 0;
            self.focus = PanelFocus::List;
        } else if self.selected >= visible {
            self.selected = visible - 1;
        }

        let subtasks = self.selected_subtask_count();
        if subtasks == 0 {
            self.detail_selected = 0;
        } else if self.detail_selected >= subtasks {
            self.detail_selected = subtasks - 1;
        }
    }

    fn clamp_subtask_selection(&mut self) {
        let count = self.draft_subtask_count();
        self.form.subtask_selected = match self.form.subtask_selected {
            Some(_) if count == 0 => None,
            Some(i) if i >= count => Some(count - 1),
            other => other,
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new("%Y-%m-%d".to_string())
    }
}
