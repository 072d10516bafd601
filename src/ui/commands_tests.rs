#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use tempfile::TempDir;

use super::*;
use crate::db::Database;
use crate::models::Budget;
use crate::ui::app::InputMode;

fn setup() -> (TempDir, App, Session) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path().join("expenses.db"));
    db.initialize().unwrap();
    let mut session = Session::new(db, Budget::DEFAULT);
    let summary = session.load().unwrap();
    let mut app = App::new();
    app.show(summary, &session);
    (dir, app, session)
}

fn run(input: &str, app: &mut App, session: &mut Session) {
    handle_command(input, app, session).unwrap();
}

// ── parse_add_args ────────────────────────────────────────────

#[test]
fn test_parse_add_multi_word_category() {
    let args = parse_add_args("12.50 Food & Dining lunch with team 2024-03-05").unwrap();
    assert_eq!(
        args,
        AddArgs {
            amount: "12.50",
            category: "Food & Dining".into(),
            description: Some("lunch with team".into()),
            date: Some("2024-03-05"),
        }
    );
}

#[test]
fn test_parse_add_alias_category_without_date() {
    let args = parse_add_args("4.20 food snack").unwrap();
    assert_eq!(args.category, "food");
    assert_eq!(args.description.as_deref(), Some("snack"));
    assert_eq!(args.date, None);
}

#[test]
fn test_parse_add_free_text_category() {
    let args = parse_add_args("30 Gifts birthday card").unwrap();
    assert_eq!(args.category, "Gifts");
    assert_eq!(args.description.as_deref(), Some("birthday card"));
}

#[test]
fn test_parse_add_category_only() {
    let args = parse_add_args("9 Transport 2024-01-31").unwrap();
    assert_eq!(args.category, "Transport");
    assert_eq!(args.description, None);
    assert_eq!(args.date, Some("2024-01-31"));
}

#[test]
fn test_parse_add_requires_amount_and_category() {
    assert!(parse_add_args("").is_err());
    assert!(parse_add_args("12").is_err());
    assert!(parse_add_args("12 2024-03-05").is_err());
}

// ── Command dispatch ──────────────────────────────────────────

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("budget", "budget"), 0);
    assert_eq!(levenshtein("budgte", "budget"), 2);
    assert_eq!(levenshtein("", "add"), 3);
}

#[test]
fn test_unknown_command_suggests_closest() {
    let (_dir, mut app, mut session) = setup();
    run("exprt", &mut app, &mut session);
    assert_eq!(
        app.status_message,
        "Unknown command: :exprt. Did you mean :export?"
    );
}

#[test]
fn test_navigation_commands() {
    let (_dir, mut app, mut session) = setup();
    run("e", &mut app, &mut session);
    assert_eq!(app.screen, Screen::Expenses);
    run("dashboard", &mut app, &mut session);
    assert_eq!(app.screen, Screen::Dashboard);
    run("help", &mut app, &mut session);
    assert!(app.show_help);
    run("q", &mut app, &mut session);
    assert!(!app.running);
}

// ── Actions ───────────────────────────────────────────────────

#[test]
fn test_add_updates_app_view() {
    let (_dir, mut app, mut session) = setup();
    run("add 42.50 Transport taxi 2024-03-05", &mut app, &mut session);
    assert_eq!(app.expenses.len(), 1);
    assert_eq!(app.summary.total_spent, dec!(42.50));
    assert_eq!(app.summary.daily_totals[&5], dec!(42.50));
    assert_eq!(app.status_message, "Added #1: $42.50 Transport on 2024-03-05");
}

#[test]
fn test_add_invalid_amount_reports_and_stores_nothing() {
    let (_dir, mut app, mut session) = setup();
    run("add -3 Transport", &mut app, &mut session);
    assert!(app.expenses.is_empty());
    assert!(session.database().list_all().unwrap().is_empty());
    assert!(!app.status_message.is_empty());
}

#[test]
fn test_add_usage_message() {
    let (_dir, mut app, mut session) = setup();
    run("add 5", &mut app, &mut session);
    assert_eq!(app.status_message, ADD_USAGE);
}

#[test]
fn test_delete_asks_for_confirmation_then_runs() {
    let (_dir, mut app, mut session) = setup();
    run("add 42.50 Transport taxi 2024-03-05", &mut app, &mut session);
    run("add 10 Food & Dining lunch 2024-03-05", &mut app, &mut session);

    run("delete 1", &mut app, &mut session);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(app.confirm_message, "Delete #1 $42.50 Transport?");
    assert_eq!(session.expenses().len(), 2);

    let action = app.pending_action.take().unwrap();
    run_pending(action, &mut app, &mut session);
    assert_eq!(app.expenses.len(), 1);
    assert_eq!(app.summary.total_spent, dec!(10));
    assert!(!app.summary.category_totals.contains_key("Transport"));
}

#[test]
fn test_delete_selected_uses_cursor() {
    let (_dir, mut app, mut session) = setup();
    run("add 1 Health 2024-03-01", &mut app, &mut session);
    run("add 2 Health 2024-03-02", &mut app, &mut session);
    app.cursor.down(app.expenses.len(), 10);

    run("delete", &mut app, &mut session);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::DeleteExpense { id: 1, .. })
    ));
}

#[test]
fn test_delete_unknown_or_invalid_id() {
    let (_dir, mut app, mut session) = setup();
    run("delete 7", &mut app, &mut session);
    assert_eq!(app.status_message, "No expense with ID 7");
    run("delete seven", &mut app, &mut session);
    assert_eq!(app.status_message, "Invalid expense ID: seven");
    assert!(app.pending_action.is_none());
}

#[test]
fn test_clear_resets_everything() {
    let (_dir, mut app, mut session) = setup();
    run("budget 100", &mut app, &mut session);
    run("add 42.50 Transport", &mut app, &mut session);
    run("clear", &mut app, &mut session);
    assert_eq!(app.pending_action, Some(PendingAction::ClearAll));

    let action = app.pending_action.take().unwrap();
    run_pending(action, &mut app, &mut session);
    assert!(app.expenses.is_empty());
    assert_eq!(app.summary.total_spent, dec!(0));
    assert_eq!(app.budget, Budget::DEFAULT);
    assert_eq!(app.status_message, "All data has been cleared");
}

#[test]
fn test_budget_command() {
    let (_dir, mut app, mut session) = setup();
    run("b 1234.5", &mut app, &mut session);
    assert_eq!(app.budget.amount(), dec!(1234.50));
    assert_eq!(app.status_message, "Budget set to $1,234.50");

    run("budget nope", &mut app, &mut session);
    assert_eq!(app.budget.amount(), dec!(1234.50));

    run("budget", &mut app, &mut session);
    assert!(app.status_message.starts_with("Budget: $1,234.50"));
}

#[test]
fn test_export_command_writes_file() {
    let (dir, mut app, mut session) = setup();
    run("add 3 Others 2024-03-01", &mut app, &mut session);
    let out = dir.path().join("out").join("x.csv");
    run(&format!("export {}", out.display()), &mut app, &mut session);
    assert!(out.exists());
    assert!(app.status_message.starts_with("Exported 1 expenses"));
}

#[test]
fn test_categories_command_lists_labels() {
    let (_dir, mut app, mut session) = setup();
    run("categories", &mut app, &mut session);
    assert!(app.status_message.contains("Food & Dining"));
    assert!(app.status_message.contains("Others"));
}
