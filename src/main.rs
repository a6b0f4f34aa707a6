use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use todolist::app::App;
use todolist::cli::{Cli, Command, ExportArgs};
use todolist::logging::{self, LogTarget};
use todolist::store::TaskStore;
use todolist::ui;
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let store = TaskStore::open(cli.database_path())?;
    info!(path = %store.path().display(), "opened task database");

    match cli.command {
        None | Some(Command::Tui) => run_tui(store),
        Some(Command::Export(args)) => export(&store, &args),
    }
}

fn run_tui(store: TaskStore) -> Result<()> {
    let mut app = App::new(store)?;

    // Terminal setup
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut app);

    finish(result, restore_terminal())
}

/// Undo raw mode and the alternate screen. Every step runs even if an
/// earlier one fails; the first failure is returned.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);
    raw.and(screen)
}

/// Put the terminal back before the default hook prints the panic message.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

/// The event loop's error wins; a restore failure is reported either way.
fn finish(result: todolist::Result<()>, restored: io::Result<()>) -> Result<()> {
    if let Err(err) = &restored {
        error!(%err, "failed to restore terminal");
    }
    if let Err(err) = result {
        error!(%err, "task list stopped");
        return Err(err.into());
    }
    Ok(restored?)
}

fn export(store: &TaskStore, args: &ExportArgs) -> Result<()> {
    let tasks = store.query(args.filter.into(), args.order())?;
    println!("{}", serde_json::to_string_pretty(&tasks)?);
    Ok(())
}
