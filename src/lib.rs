//! A single-user task tracker backed by one SQLite table, with a terminal UI.

pub mod app;
pub mod cli;
pub mod due_date;
pub mod error;
pub mod logging;
pub mod store;
pub mod task;
pub mod ui;

pub use error::{Result, TodoError};
