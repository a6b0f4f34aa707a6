//! Tracing subscriber setup.
//!
//! The terminal UI owns stdout while it runs, so logging is off unless a
//! target is given with `--log`.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stdout,
    Stderr,
    File(String),
}

impl LogTarget {
    /// Accepts `0`/`off`, `1`/`stdout`, `2`/`stderr`; anything else is a filename.
    pub fn parse(value: &str) -> Self {
        match value {
            "0" | "off" => LogTarget::Off,
            "1" | "stdout" => LogTarget::Stdout,
            "2" | "stderr" => LogTarget::Stderr,
            filename => LogTarget::File(filename.to_string()),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the level picked by `verbose`.
pub fn init(target: &LogTarget, verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stdout => install(level, io::stdout, true),
        LogTarget::Stderr => install(level, io::stderr, true),
        LogTarget::File(filename) => {
            // append, never truncate
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            install(level, Mutex::new(file), false)
        }
    }
}

fn install<W>(level: &str, writer: W, ansi: bool) -> anyhow::Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
