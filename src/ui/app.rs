use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::util::Cursor;
use crate::models::{Budget, Expense};
use crate::session::Session;
use crate::tracker::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Destructive action waiting for a y/N answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, label: String },
    ClearAll,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,

    // Copied from the session after every action
    pub(crate) expenses: Vec<Expense>,
    pub(crate) summary: Snapshot,
    pub(crate) budget: Budget,
    pub(crate) store_loaded: bool,

    pub(crate) cursor: Cursor,

    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today: chrono::Local::now().date_naive(),

            expenses: Vec::new(),
            summary: Snapshot::default(),
            budget: Budget::DEFAULT,
            store_loaded: false,

            cursor: Cursor::default(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Take the aggregates returned by a session action and the session's
    /// current expense list and budget.
    pub(crate) fn show(&mut self, summary: Snapshot, session: &Session) {
        self.summary = summary;
        self.expenses = session.expenses().to_vec();
        self.budget = session.budget();
        self.store_loaded = session.is_loaded();
        self.cursor.clamp(self.expenses.len());
    }

    pub(crate) fn refresh(&mut self, session: &Session) {
        self.show(session.snapshot(), session);
    }

    pub(crate) fn remaining(&self) -> Decimal {
        self.budget.remaining(self.summary.total_spent)
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.cursor.index)
    }

    pub(crate) fn ask_confirm(&mut self, action: PendingAction) {
        self.confirm_message = match &action {
            PendingAction::DeleteExpense { label, .. } => format!("Delete {label}?"),
            PendingAction::ClearAll => {
                "Clear all data? This cannot be undone.".to_string()
            }
        };
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
