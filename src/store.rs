//! SQLite persistence for tasks.
//!
//! The store keeps only the database path. Each operation opens its own
//! connection and drops it when done, so nothing is held open between
//! user actions.

use crate::error::Result;
use crate::task::{SortOrder, StatusFilter, Task, TaskId};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};
use tracing::debug;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        done INTEGER NOT NULL DEFAULT 0,
        due_date TEXT
    )";

const SELECT_TASKS: &str = "SELECT id, title, done, due_date FROM tasks";

#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Point the store at `path`, creating the database and table if missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.with_conn(|conn| conn.execute_batch(SCHEMA))?;
        debug!(path = %store.path.display(), "task table ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` on a fresh connection that is closed when `f` returns.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        Ok(f(&conn)?)
    }

    /// Insert a new, not-yet-done task.
    ///
    /// `due_date` is stored as given; callers validate it first.
    pub fn insert(&self, title: &str, due_date: Option<&str>) -> Result<Task> {
        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (title, done, due_date) VALUES (?1, 0, ?2)",
                params![title, due_date],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        debug!(id, title, ?due_date, "inserted task");

        Ok(Task {
            id,
            title: title.to_string(),
            done: false,
            due_date: due_date.map(str::to_string),
        })
    }

    /// Remove a task. Deleting an id that does not exist is not an error.
    pub fn delete(&self, id: TaskId) -> Result<()> {
        let removed =
            self.with_conn(|conn| conn.execute("DELETE FROM tasks WHERE id = ?1", params![id]))?;
        debug!(id, removed, "deleted task");
        Ok(())
    }

    /// Set `done` to the opposite of `current_done`.
    ///
    /// The row is not re-read; `current_done` must be the value the caller
    /// last showed for this task.
    pub fn toggle(&self, id: TaskId, current_done: bool) -> Result<()> {
        let new_done = !current_done;
        let updated = self.with_conn(|conn| {
            conn.execute(
                "UPDATE tasks SET done = ?1 WHERE id = ?2",
                params![new_done, id],
            )
        })?;
        debug!(id, new_done, updated, "toggled task");
        Ok(())
    }

    /// Fetch every task matching `filter`, in `order`.
    pub fn query(&self, filter: StatusFilter, order: SortOrder) -> Result<Vec<Task>> {
        let mut sql = String::from(SELECT_TASKS);
        if filter.done_value().is_some() {
            sql.push_str(" WHERE done = ?1");
        }
        sql.push_str(match order {
            SortOrder::Insertion => " ORDER BY id ASC",
            SortOrder::DueDateAsc => " ORDER BY due_date IS NULL, due_date ASC, id ASC",
        });

        let tasks = self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = match filter.done_value() {
                Some(done) => stmt.query_map(params![done], parse_task_row)?,
                None => stmt.query_map([], parse_task_row)?,
            };
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })?;
        debug!(?filter, ?order, count = tasks.len(), "queried tasks");
        Ok(tasks)
    }
}

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        done: row.get::<_, i64>("done")? != 0,
        due_date: read_lenient_text(row, "due_date")?,
    })
}

/// Read a nullable text column without failing on values of another type.
/// Whatever is there gets rendered to text and judged at display time.
fn read_lenient_text(row: &Row, column: &str) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(column)? {
        ValueRef::Null => None,
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
        ValueRef::Integer(n) => Some(n.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
    })
}
