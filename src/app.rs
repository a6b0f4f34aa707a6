use crate::due_date::{normalize_due_date, DueState};
use crate::error::{Result, TodoError};
use crate::store::TaskStore;
use crate::task::{SortOrder, StatusFilter, Task, TaskId};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

pub const TITLE_PLACEHOLDER: &str = "Enter a task title";
pub const DUE_DATE_PLACEHOLDER: &str = "Enter a due date as YYYY-MM-DD";

/// What the list currently shows. Kept across re-renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub filter: StatusFilter,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Toggle,
    Delete,
}

/// Everything the user can ask for. Row controls carry only the row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddTask,
    ShowAll,
    ShowIncomplete,
    ShowComplete,
    SortByDueDate,
    Row(RowAction, TaskId),
    Quit,
}

/// One rendered line of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    pub due: DueState,
}

impl TaskRow {
    pub fn label(&self) -> String {
        let status = if self.done { "Done" } else { "Not done" };
        format!("{} - {} - Due: {}", self.title, status, self.due.label())
    }
}

/// Build the visible rows from a fresh query result.
pub fn build_rows(tasks: &[Task], today: NaiveDate) -> Vec<TaskRow> {
    tasks
        .iter()
        .map(|t| TaskRow {
            id: t.id,
            title: t.title.clone(),
            done: t.done,
            due: DueState::derive(t.due_date.as_deref(), today),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A modal message waiting to be dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// A single-line text input with a placeholder.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    pub value: String,
    pub placeholder: &'static str,
}

impl InputField {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            value: String::new(),
            placeholder,
        }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Text to draw and whether it is the placeholder.
    /// The placeholder only shows while the field is empty and unfocused.
    pub fn display(&self, focused: bool) -> (&str, bool) {
        if self.value.is_empty() && !focused {
            (self.placeholder, true)
        } else {
            (&self.value, false)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Title,
    DueDate,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Title => Focus::DueDate,
            Focus::DueDate => Focus::List,
            Focus::List => Focus::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Title => Focus::List,
            Focus::DueDate => Focus::Title,
            Focus::List => Focus::DueDate,
        }
    }
}

pub struct App {
    store: TaskStore,
    pub view: ViewState,
    pub rows: Vec<TaskRow>,
    pub selected: usize,
    pub title_input: InputField,
    pub due_input: InputField,
    pub focus: Focus,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl App {
    /// Create the controller and render the initial, unfiltered list.
    pub fn new(store: TaskStore) -> Result<Self> {
        let mut app = Self {
            store,
            view: ViewState::default(),
            rows: Vec::new(),
            selected: 0,
            title_input: InputField::new(TITLE_PLACEHOLDER),
            due_input: InputField::new(DUE_DATE_PLACEHOLDER),
            focus: Focus::default(),
            notice: None,
            should_quit: false,
        };
        app.refresh()?;
        Ok(app)
    }

    /// Handle one command.
    ///
    /// Validation problems become a notice and leave the data untouched.
    /// Storage faults are returned to the caller.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::AddTask => self.add_task(),
            Command::ShowAll => self.set_filter(StatusFilter::All),
            Command::ShowIncomplete => self.set_filter(StatusFilter::Incomplete),
            Command::ShowComplete => self.set_filter(StatusFilter::Complete),
            Command::SortByDueDate => {
                self.view.order = SortOrder::DueDateAsc;
                self.refresh()
            }
            Command::Row(action, id) => self.on_row(action, id),
            Command::Quit => {
                self.should_quit = true;
                Ok(())
            }
        }
    }

    fn add_task(&mut self) -> Result<()> {
        let due_date = match normalize_due_date(&self.due_input.value) {
            Ok(date) => date,
            Err(err) => return self.reject(err),
        };
        let title = self.title_input.value.clone();
        if title.trim().is_empty() {
            return self.reject(TodoError::EmptyTitle);
        }

        let task = self.store.insert(&title, Some(&due_date))?;
        info!(id = task.id, "task added");

        self.title_input.clear();
        self.due_input.clear();
        self.notice = Some(Notice::new(NoticeLevel::Info, "Task added!"));
        self.refresh()
    }

    fn reject(&mut self, err: TodoError) -> Result<()> {
        if !err.is_validation() {
            return Err(err);
        }
        warn!(%err, "input rejected");
        let notice = match err {
            TodoError::InvalidDateFormat(_) => Notice::new(
                NoticeLevel::Error,
                "Enter the due date as 'YYYY-MM-DD' or 'YYYYMMDD'.",
            ),
            _ => Notice::new(NoticeLevel::Warning, "Enter both a task title and a due date."),
        };
        self.notice = Some(notice);
        Ok(())
    }

    /// A filter change starts from insertion order again.
    fn set_filter(&mut self, filter: StatusFilter) -> Result<()> {
        self.view = ViewState {
            filter,
            order: SortOrder::Insertion,
        };
        self.refresh()
    }

    fn on_row(&mut self, action: RowAction, id: TaskId) -> Result<()> {
        let Some(row) = self.rows.iter().find(|r| r.id == id) else {
            warn!(id, ?action, "ignoring action for a row that is not shown");
            return Ok(());
        };
        match action {
            RowAction::Toggle => self.store.toggle(id, row.done)?,
            RowAction::Delete => self.store.delete(id)?,
        }
        self.refresh()
    }

    /// Throw away the visible rows and rebuild them from the store.
    pub fn refresh(&mut self) -> Result<()> {
        let tasks = self.store.query(self.view.filter, self.view.order)?;
        self.rows = build_rows(&tasks, Local::now().date_naive());
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
        Ok(())
    }

    pub fn selected_row(&self) -> Option<&TaskRow> {
        self.rows.get(self.selected)
    }

    /// Command for `action` on the highlighted row, if there is one.
    pub fn selected_command(&self, action: RowAction) -> Option<Command> {
        self.selected_row().map(|row| Command::Row(action, row.id))
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn focused_input(&mut self) -> Option<&mut InputField> {
        match self.focus {
            Focus::Title => Some(&mut self.title_input),
            Focus::DueDate => Some(&mut self.due_input),
            Focus::List => None,
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
