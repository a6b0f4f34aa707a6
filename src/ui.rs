use crate::app::{App, Command, Focus, InputField, NoticeLevel, RowAction, TaskRow};
use crate::error::Result;
use crate::task::{SortOrder, StatusFilter};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key)?;
            }
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.notice.is_some() {
        app.dismiss_notice();
        return Ok(());
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return app.dispatch(Command::Quit),
        KeyCode::Char('a') if ctrl => return app.dispatch(Command::AddTask),
        KeyCode::Esc => return app.dispatch(Command::Quit),
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return Ok(());
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return Ok(());
        }
        _ => {}
    }

    if app.focus != Focus::List {
        if key.code == KeyCode::Enter {
            return app.dispatch(Command::AddTask);
        }
        if let Some(input) = app.focused_input() {
            match key.code {
                KeyCode::Backspace => input.backspace(),
                KeyCode::Char(c) if !ctrl => input.push(c),
                _ => {}
            }
        }
        return Ok(());
    }

    let command = match key.code {
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_prev();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            None
        }
        KeyCode::Char(' ') | KeyCode::Char('t') => app.selected_command(RowAction::Toggle),
        KeyCode::Char('d') | KeyCode::Delete => app.selected_command(RowAction::Delete),
        KeyCode::Char('1') => Some(Command::ShowAll),
        KeyCode::Char('2') => Some(Command::ShowIncomplete),
        KeyCode::Char('3') => Some(Command::ShowComplete),
        KeyCode::Char('s') => Some(Command::SortByDueDate),
        _ => None,
    };

    match command {
        Some(command) => {
            debug!(?command, "dispatching");
            app.dispatch(command)
        }
        None => Ok(()),
    }
}

/// Draw the whole screen from the controller's current state.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_input(f, chunks[0], "Task", &app.title_input, app.focus == Focus::Title);
    draw_input(f, chunks[1], "Due date", &app.due_input, app.focus == Focus::DueDate);
    f.render_widget(Paragraph::new(command_bar(app)), chunks[2]);
    draw_task_list(f, chunks[3], app);
    f.render_widget(
        Paragraph::new(help_line(app.focus)).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );

    if let Some(notice) = &app.notice {
        let (title, color) = match notice.level {
            NoticeLevel::Info => ("Info", Color::Green),
            NoticeLevel::Warning => ("Warning", Color::Yellow),
            NoticeLevel::Error => ("Error", Color::Red),
        };
        let area = centered(f.area(), 60, 5);
        let popup = Paragraph::new(notice.message.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

fn draw_input(f: &mut Frame, area: Rect, title: &str, field: &InputField, focused: bool) {
    let (text, is_placeholder) = field.display(focused);
    let text_style = if is_placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let input = Paragraph::new(Span::styled(text, text_style)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(focus_style(focused)),
    );
    f.render_widget(input, area);

    if focused {
        // display width, so wide characters move the cursor two cells
        let width = u16::try_from(Line::raw(text).width()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(width);
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_task_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app.rows.iter().map(row_item).collect();
    let title = match app.view.filter {
        StatusFilter::All => "All tasks",
        StatusFilter::Incomplete => "Incomplete tasks",
        StatusFilter::Complete => "Completed tasks",
    };
    let focused = app.focus == Focus::List;

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(focus_style(focused)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if focused && !app.rows.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn row_item(row: &TaskRow) -> ListItem<'static> {
    let label_style = if row.due.is_urgent() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(vec![
        Span::styled(row.label(), label_style),
        Span::styled("  [Toggle] [Delete]", Style::default().fg(Color::DarkGray)),
    ]))
}

fn command_bar(app: &App) -> Line<'static> {
    let active = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let pick = |on: bool| if on { active } else { Style::default() };
    let filter = app.view.filter;
    Line::from(vec![
        Span::raw("[^A] Add  "),
        Span::styled("[1] All", pick(filter == StatusFilter::All)),
        Span::raw("  "),
        Span::styled("[2] Incomplete", pick(filter == StatusFilter::Incomplete)),
        Span::raw("  "),
        Span::styled("[3] Complete", pick(filter == StatusFilter::Complete)),
        Span::raw("  "),
        Span::styled(
            "[s] Sort by due date",
            pick(app.view.order == SortOrder::DueDateAsc),
        ),
    ])
}

fn help_line(focus: Focus) -> &'static str {
    match focus {
        Focus::List => "Tab: next field  Up/Down: select  Space/t: toggle  d: delete  q: quit",
        _ => "Tab: next field  Enter: add task  Esc: quit",
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn centered(area: Rect, width_percent: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent) / 100) as u16;
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
