use anyhow::{Context, Result};

use crate::config::Command;
use crate::error::StoreError;
use crate::models::Category;
use crate::session::Session;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn as_cli(
    command: Command,
    session: &mut Session,
    startup_error: Option<StoreError>,
) -> Result<()> {
    if let Command::Categories = command {
        return cli_categories();
    }
    if let Some(e) = startup_error {
        return Err(e).context("Database unavailable");
    }

    match command {
        Command::Add {
            amount,
            category,
            description,
            date,
        } => cli_add(session, &amount, &category, description.as_deref(), date.as_deref()),
        Command::List => cli_list(session),
        Command::Delete { id } => cli_delete(session, id),
        Command::Clear { yes } => cli_clear(session, yes),
        Command::Summary => cli_summary(session),
        Command::Export { path } => cli_export(session, path.as_deref()),
        Command::Categories => cli_categories(),
    }
}

fn cli_add(
    session: &mut Session,
    amount: &str,
    category: &str,
    description: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let (expense, summary) = session.add(amount, category, description, date)?;
    println!(
        "Added #{}: {} {} on {}",
        expense.id,
        format_amount(expense.amount),
        expense.category,
        expense.date
    );
    println!("Total spent: {}", format_amount(summary.total_spent));
    Ok(())
}

fn cli_list(session: &Session) -> Result<()> {
    let expenses = session.expenses();
    if expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!(
        "{:<6} {:<10} {:<18} {:<32} {:>14}",
        "ID", "Date", "Category", "Description", "Amount"
    );
    println!("{}", "─".repeat(84));
    for e in expenses {
        println!(
            "{:<6} {:<10} {:<18} {:<32} {:>14}",
            e.id,
            e.date.format("%Y-%m-%d"),
            truncate(&e.category, 18),
            truncate(e.description_or_empty(), 32),
            format_amount(e.amount),
        );
    }
    Ok(())
}

fn cli_delete(session: &mut Session, id: i64) -> Result<()> {
    let (expense, summary) = session.delete(id)?;
    println!(
        "Deleted #{}: {} {}",
        expense.id,
        format_amount(expense.amount),
        expense.category
    );
    println!("Total spent: {}", format_amount(summary.total_spent));
    Ok(())
}

fn cli_clear(session: &mut Session, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("This deletes every expense. Re-run with --yes to confirm.");
    }
    let count = session.expenses().len();
    session.clear_all()?;
    println!("Cleared {count} expenses");
    Ok(())
}

fn cli_summary(session: &Session) -> Result<()> {
    let summary = session.snapshot();
    let budget = session.budget();

    println!("ExpenseTUI summary");
    println!("{}", "─".repeat(40));
    println!("  Budget:     {:>14}", format_amount(budget.amount()));
    println!("  Spent:      {:>14}", format_amount(summary.total_spent));
    println!("  Remaining:  {:>14}", format_amount(session.remaining()));
    if budget.is_exceeded_by(summary.total_spent) {
        println!("  Over budget!");
    }
    println!("  Expenses:   {:>14}", session.expenses().len());
    println!("  Database:   {}", session.database().path().display());

    let categories = summary.categories_by_amount();
    if !categories.is_empty() {
        println!();
        println!("Spending by Category:");
        for (name, amount) in &categories {
            println!(
                "  {:<20} {:>14} {:>6.1}%",
                truncate(name, 20),
                format_amount(*amount),
                summary.share_percent(*amount)
            );
        }
    }

    if !summary.daily_totals.is_empty() {
        println!();
        println!("Spending by Day of Month:");
        for (day, amount) in &summary.daily_totals {
            println!("  {day:>2}  {:>14}", format_amount(*amount));
        }
    }
    Ok(())
}

fn cli_export(session: &Session, path: Option<&str>) -> Result<()> {
    let path = match path {
        Some(p) => crate::export::expand_home(p),
        None => crate::export::expand_home(&format!(
            "~/expenses-{}.csv",
            chrono::Local::now().format("%Y-%m-%d")
        )),
    };
    if session.expenses().is_empty() {
        println!("No expenses to export");
        return Ok(());
    }
    let count = crate::export::export_to_path(session.expenses(), &path)?;
    println!("Exported {count} expenses to {}", path.display());
    Ok(())
}

fn cli_categories() -> Result<()> {
    for category in Category::all() {
        println!("{category}");
    }
    Ok(())
}
