use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, PendingAction, Screen};
use super::util::format_amount;
use crate::models::Category;
use crate::session::Session;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Session) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 12.50 Food & Dining lunch 2024-03-05)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a 4.20 Transport bus)", cmd_add, r);
    register_command!(
        "delete",
        "Delete selected expense (or :delete <id>)",
        cmd_delete,
        r
    );
    register_command!("clear", "Delete all expenses and reset budget", cmd_clear, r);
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget 3000)",
        cmd_budget,
        r
    );
    register_command!("b", "Set monthly budget (e.g. :b 3000)", cmd_budget, r);
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );
    register_command!("categories", "List suggested categories", cmd_categories, r);
    register_command!("reload", "Reload all expenses from the database", cmd_reload, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    session: &mut Session,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, session)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Arguments of `:add`, split but not yet validated.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct AddArgs<'a> {
    pub(crate) amount: &'a str,
    pub(crate) category: String,
    pub(crate) description: Option<String>,
    pub(crate) date: Option<&'a str>,
}

const ADD_USAGE: &str = "Usage: :add <amount> <category> [description] [YYYY-MM-DD]";

/// Split `<amount> <category> [description] [date]`.
///
/// The category is the longest run of leading words naming a known category,
/// so multi-word names like "Food & Dining" need no quoting. Otherwise the
/// first word is taken as a free-text category. A trailing `YYYY-MM-DD`
/// token is the date.
pub(crate) fn parse_add_args(args: &str) -> Result<AddArgs<'_>, &'static str> {
    let mut tokens: Vec<&str> = args.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(ADD_USAGE);
    }
    let amount = tokens.remove(0);

    let date = match tokens.last() {
        Some(last) if looks_like_date(last) => tokens.pop(),
        _ => None,
    };
    if tokens.is_empty() {
        return Err(ADD_USAGE);
    }

    let known = (1..=tokens.len())
        .rev()
        .find(|&n| Category::parse(&tokens[..n].join(" ")).is_some());
    let split = known.unwrap_or(1);
    let category = tokens[..split].join(" ");
    let description = Some(tokens[split..].join(" ")).filter(|d| !d.is_empty());

    Ok(AddArgs {
        amount,
        category,
        description,
        date,
    })
}

fn looks_like_date(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() })
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let parsed = match parse_add_args(args) {
        Ok(p) => p,
        Err(usage) => {
            app.set_status(usage);
            return Ok(());
        }
    };

    match session.add(
        parsed.amount,
        &parsed.category,
        parsed.description.as_deref(),
        parsed.date,
    ) {
        Ok((expense, summary)) => {
            app.show(summary, session);
            app.cursor.top();
            app.set_status(format!(
                "Added #{}: {} {} on {}",
                expense.id,
                format_amount(expense.amount),
                expense.category,
                expense.date
            ));
        }
        Err(e) => {
            tracing::warn!(error = %e, "add expense failed");
            app.set_status(e.to_string());
        }
    }
    Ok(())
}

fn cmd_delete(args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    let target = if args.is_empty() {
        app.selected_expense()
    } else {
        let Ok(id) = args.trim_start_matches('#').parse::<i64>() else {
            app.set_status(format!("Invalid expense ID: {args}"));
            return Ok(());
        };
        app.expenses.iter().find(|e| e.id == id)
    };

    let Some(expense) = target else {
        let msg = if args.is_empty() {
            "No expense selected".to_string()
        } else {
            format!("No expense with ID {args}")
        };
        app.set_status(msg);
        return Ok(());
    };
    let action = PendingAction::DeleteExpense {
        id: expense.id,
        label: format!(
            "#{} {} {}",
            expense.id,
            format_amount(expense.amount),
            expense.category
        ),
    };
    app.ask_confirm(action);
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.ask_confirm(PendingAction::ClearAll);
    Ok(())
}

/// Run a confirmed action against the session.
pub(crate) fn run_pending(action: PendingAction, app: &mut App, session: &mut Session) {
    match action {
        PendingAction::DeleteExpense { id, label } => match session.delete(id) {
            Ok((_, summary)) => {
                app.show(summary, session);
                app.set_status(format!("Deleted {label}"));
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "delete expense failed");
                app.set_status(e.to_string());
            }
        },
        PendingAction::ClearAll => match session.clear_all() {
            Ok(summary) => {
                app.show(summary, session);
                app.cursor.top();
                app.set_status("All data has been cleared");
            }
            Err(e) => {
                tracing::warn!(error = %e, "clear all failed");
                app.set_status(e.to_string());
            }
        },
    }
}

fn cmd_budget(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!(
            "Budget: {}. Usage: :budget <amount>",
            format_amount(session.budget().amount())
        ));
        return Ok(());
    }
    match session.set_budget(args) {
        Ok(budget) => {
            app.refresh(session);
            app.set_status(format!("Budget set to {}", format_amount(budget.amount())));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        crate::export::expand_home(&format!("~/expenses-{}.csv", app.today.format("%Y-%m-%d")))
    } else {
        crate::export::expand_home(args)
    };

    if session.expenses().is_empty() {
        app.set_status("No expenses to export");
        return Ok(());
    }
    match crate::export::export_to_path(session.expenses(), &path) {
        Ok(count) => app.set_status(format!("Exported {count} expenses to {}", path.display())),
        Err(e) => {
            tracing::warn!(error = %e, "export failed");
            app.set_status(format!("Export failed: {e:#}"));
        }
    }
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
    app.set_status(format!("Categories: {}", names.join(", ")));
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App, session: &mut Session) -> anyhow::Result<()> {
    match session.load() {
        Ok(summary) => {
            app.show(summary, session);
            app.set_status(format!("Loaded {} expenses", app.expenses.len()));
        }
        Err(e) => {
            tracing::warn!(error = %e, "reload failed");
            app.set_status(format!("Database error: {e}"));
        }
    }
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _session: &mut Session) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
