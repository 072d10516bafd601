use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Budget;

/// ExpenseTUI - local expense tracker. Run without a command for the interactive UI.
#[derive(Debug, Parser)]
#[command(name = "expensetui", version, about, long_about = None)]
pub(crate) struct Config {
    /// SQLite database file. Defaults to expenses.db in the user data directory.
    #[arg(long, env = "EXPENSES_DB_PATH", global = true)]
    pub(crate) db_path: Option<PathBuf>,

    /// Monthly budget the session starts with and returns to after a clear.
    #[arg(
        long,
        env = "EXPENSES_BUDGET",
        default_value = "5000.00",
        value_parser = parse_budget,
        global = true
    )]
    pub(crate) budget: Budget,

    /// Log file. Defaults to expenses.log in the user data directory.
    #[arg(long, env = "EXPENSES_LOG_FILE", global = true)]
    pub(crate) log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Record an expense
    Add {
        /// Amount spent, e.g. 42.50
        amount: String,
        /// Category, e.g. "Food & Dining" or Transport
        category: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// List all expenses, newest first
    List,
    /// Delete an expense by ID
    Delete { id: i64 },
    /// Delete every expense and restart IDs at 1
    Clear {
        /// Skip the safety check
        #[arg(long)]
        yes: bool,
    },
    /// Print total, category and daily spending
    Summary,
    /// Export all expenses to CSV
    Export { path: Option<String> },
    /// List the suggested categories
    Categories,
}

impl Config {
    pub(crate) fn db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("expenses.db")),
        }
    }

    pub(crate) fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("expenses.log")),
        }
    }
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .context("Could not determine data directory")?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn parse_budget(s: &str) -> std::result::Result<Budget, String> {
    Budget::parse(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["expensetui", "--db-path", "/tmp/e.db"]).unwrap();
        assert_eq!(config.db_path().unwrap(), PathBuf::from("/tmp/e.db"));
        assert!(config.command.is_none());
    }

    #[test]
    fn test_budget_flag() {
        let config =
            Config::try_parse_from(["expensetui", "--budget", "1200", "summary"]).unwrap();
        assert_eq!(config.budget.amount(), dec!(1200));
        assert!(matches!(config.command, Some(Command::Summary)));
    }

    #[test]
    fn test_rejects_non_positive_budget() {
        assert!(Config::try_parse_from(["expensetui", "--budget", "0"]).is_err());
    }

    #[test]
    fn test_add_command() {
        let config = Config::try_parse_from([
            "expensetui",
            "add",
            "42.50",
            "Transport",
            "-d",
            "taxi",
            "--date",
            "2024-03-05",
        ])
        .unwrap();
        match config.command {
            Some(Command::Add {
                amount,
                category,
                description,
                date,
            }) => {
                assert_eq!(amount, "42.50");
                assert_eq!(category, "Transport");
                assert_eq!(description.as_deref(), Some("taxi"));
                assert_eq!(date.as_deref(), Some("2024-03-05"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flag_after_subcommand() {
        let config =
            Config::try_parse_from(["expensetui", "list", "--db-path", "x.db"]).unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("x.db")));
    }
}
