//! Controller tests: commands go in, rows and notices come out.

use tempfile::TempDir;
use todolist::app::{App, Command, NoticeLevel, RowAction};
use todolist::store::TaskStore;
use todolist::task::{SortOrder, StatusFilter};

fn setup_app() -> (TempDir, App) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = TaskStore::open(dir.path().join("todo.db")).expect("Failed to open store");
    let app = App::new(store).expect("Failed to build app");
    (dir, app)
}

fn add(app: &mut App, title: &str, due: &str) {
    app.title_input.value = title.to_string();
    app.due_input.value = due.to_string();
    app.dispatch(Command::AddTask).expect("add should not hit a storage fault");
}

fn titles(app: &App) -> Vec<&str> {
    app.rows.iter().map(|r| r.title.as_str()).collect()
}

mod add_tests {
    use super::*;

    #[test]
    fn add_normalizes_compact_date_and_clears_inputs() {
        let (_dir, mut app) = setup_app();

        add(&mut app, "file taxes", "20240131");

        assert_eq!(app.rows.len(), 1);
        assert!(!app.rows[0].done);
        assert_eq!(app.rows[0].due.label(), "2024-01-31");
        assert!(app.title_input.value.is_empty());
        assert!(app.due_input.value.is_empty());
        assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Info));
    }

    #[test]
    fn bad_date_is_rejected_without_writing() {
        let (_dir, mut app) = setup_app();

        add(&mut app, "file taxes", "2024/01/31");

        assert!(app.rows.is_empty());
        assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Error));
        // inputs stay so the user can fix them
        assert_eq!(app.title_input.value, "file taxes");
        assert_eq!(app.due_input.value, "2024/01/31");
    }

    #[test]
    fn empty_due_date_is_a_format_error() {
        let (_dir, mut app) = setup_app();

        add(&mut app, "file taxes", "");

        assert!(app.rows.is_empty());
        assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Error));
    }

    #[test]
    fn blank_title_is_a_warning() {
        let (_dir, mut app) = setup_app();

        add(&mut app, "   ", "2024-01-31");

        assert!(app.rows.is_empty());
        assert_eq!(app.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Warning));
    }

    #[test]
    fn add_keeps_the_current_filter() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "first", "2024-01-01");
        let id = app.rows[0].id;
        app.dispatch(Command::Row(RowAction::Toggle, id)).unwrap();

        app.dispatch(Command::ShowComplete).unwrap();
        add(&mut app, "second", "2024-01-02");

        assert_eq!(app.view.filter, StatusFilter::Complete);
        assert_eq!(titles(&app), vec!["first"]);
    }
}

mod row_tests {
    use super::*;

    #[test]
    fn toggle_uses_the_rendered_state_and_rerenders() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "flip", "2024-01-01");
        let id = app.rows[0].id;

        app.dispatch(Command::Row(RowAction::Toggle, id)).unwrap();
        assert!(app.rows[0].done);

        app.dispatch(Command::Row(RowAction::Toggle, id)).unwrap();
        assert!(!app.rows[0].done);
    }

    #[test]
    fn delete_removes_the_row() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "a", "2024-01-01");
        add(&mut app, "b", "2024-01-02");
        let id = app.rows[0].id;

        app.dispatch(Command::Row(RowAction::Delete, id)).unwrap();

        assert_eq!(titles(&app), vec!["b"]);
    }

    #[test]
    fn actions_on_rows_not_shown_are_ignored() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "a", "2024-01-01");
        let before = app.rows.clone();

        app.dispatch(Command::Row(RowAction::Toggle, 4242)).unwrap();
        app.dispatch(Command::Row(RowAction::Delete, 4242)).unwrap();

        assert_eq!(app.rows, before);
    }

    #[test]
    fn selected_command_targets_the_highlighted_row() {
        let (_dir, mut app) = setup_app();
        add(&mut app, "a", "2024-01-01");
        add(&mut app, "b", "2024-01-02");

        app.select_next();
        let id = app.rows[1].id;
        assert_eq!(
            app.selected_command(RowAction::Delete),
            Some(Command::Row(RowAction::Delete, id))
        );

        app.dispatch(Command::Row(RowAction::Delete, id)).unwrap();
        // selection is clamped to the shorter list
        assert_eq!(app.selected, 0);
    }
}

mod view_tests {
    use super::*;

    fn seed(app: &mut App) {
        add(app, "open late", "2024-09-01");
        add(app, "done mid", "2024-05-01");
        add(app, "open early", "2024-02-01");
        let id = app.rows.iter().find(|r| r.title == "done mid").unwrap().id;
        app.dispatch(Command::Row(RowAction::Toggle, id)).unwrap();
    }

    #[test]
    fn sort_reapplies_the_last_filter() {
        let (_dir, mut app) = setup_app();
        seed(&mut app);

        app.dispatch(Command::ShowIncomplete).unwrap();
        app.dispatch(Command::SortByDueDate).unwrap();

        assert_eq!(app.view.filter, StatusFilter::Incomplete);
        assert_eq!(app.view.order, SortOrder::DueDateAsc);
        assert_eq!(titles(&app), vec!["open early", "open late"]);
    }

    #[test]
    fn choosing_a_filter_returns_to_insertion_order() {
        let (_dir, mut app) = setup_app();
        seed(&mut app);

        app.dispatch(Command::SortByDueDate).unwrap();
        assert_eq!(titles(&app), vec!["open early", "done mid", "open late"]);

        app.dispatch(Command::ShowAll).unwrap();
        assert_eq!(app.view.order, SortOrder::Insertion);
        assert_eq!(titles(&app), vec!["open late", "done mid", "open early"]);
    }

    #[test]
    fn mutations_keep_the_sorted_view() {
        let (_dir, mut app) = setup_app();
        seed(&mut app);
        app.dispatch(Command::SortByDueDate).unwrap();

        let id = app.rows[0].id;
        app.dispatch(Command::Row(RowAction::Delete, id)).unwrap();

        assert_eq!(app.view.order, SortOrder::DueDateAsc);
        assert_eq!(titles(&app), vec!["done mid", "open late"]);
    }

    #[test]
    fn quit_sets_the_flag() {
        let (_dir, mut app) = setup_app();
        app.dispatch(Command::Quit).unwrap();
        assert!(app.should_quit);
    }
}
