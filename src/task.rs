use serde::{Deserialize, Serialize};

pub type TaskId = i64;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    pub due_date: Option<String>, // canonical YYYY-MM-DD when written by us
}

/// Which tasks the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Incomplete,
    Complete,
}

impl StatusFilter {
    /// The `done` value rows must have, or `None` for no filtering.
    pub fn done_value(self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Incomplete => Some(false),
            StatusFilter::Complete => Some(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Insertion,
    /// Ascending by due date, tasks without one last.
    DueDateAsc,
}
