//! Error types shared by the store and the controller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    /// Due date was neither `YYYYMMDD` nor `YYYY-MM-DD`.
    #[error("due date must be entered as 'YYYY-MM-DD' or 'YYYYMMDD' (got {0:?})")]
    InvalidDateFormat(String),

    #[error("task title must not be empty")]
    EmptyTitle,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TodoError {
    /// Input problems the user can fix; everything else is a storage fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::InvalidDateFormat(_) | TodoError::EmptyTitle)
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
