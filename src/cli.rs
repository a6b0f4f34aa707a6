//! Command line definitions.

use crate::task::{SortOrder, StatusFilter};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Environment variable naming the database file.
pub const DATABASE_ENV: &str = "TODOLIST_DB";

/// Database used when neither `--database` nor the environment names one.
pub const DEFAULT_DATABASE: &str = "todo.db";

/// Track tasks with due dates in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the database file
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Logging output: 0/off (default), 1/stdout, 2/stderr, or filename
    #[arg(short, long, default_value = "0", global = true)]
    pub log: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive task list (default if no subcommand given)
    Tui,

    /// Print tasks as JSON
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Which tasks to include
    #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
    pub filter: FilterArg,

    /// Order by due date, tasks without one last
    #[arg(long)]
    pub sort_by_due_date: bool,
}

impl ExportArgs {
    pub fn order(&self) -> SortOrder {
        if self.sort_by_due_date {
            SortOrder::DueDateAsc
        } else {
            SortOrder::Insertion
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    Incomplete,
    Complete,
}

impl From<FilterArg> for StatusFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => StatusFilter::All,
            FilterArg::Incomplete => StatusFilter::Incomplete,
            FilterArg::Complete => StatusFilter::Complete,
        }
    }
}

impl Cli {
    /// `--database`, then `TODOLIST_DB`, then `todo.db` in the working directory.
    pub fn database_path(&self) -> PathBuf {
        let env = std::env::var_os(DATABASE_ENV).map(PathBuf::from);
        resolve_database_path(self.database.clone(), env)
    }
}

fn resolve_database_path(flag: Option<PathBuf>, env: Option<PathBuf>) -> PathBuf {
    flag.or(env).unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
}
