use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{bar, format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Budget cards
            Constraint::Min(10),   // Breakdown + calendar
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_category_breakdown(f, body[0], app);
    super::calendar::render(f, body[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let spent = app.summary.total_spent;
    let remaining = app.remaining();
    let count = app.expenses.len();

    render_card(
        f,
        cards[0],
        "Budget",
        app.budget.amount(),
        theme::ACCENT,
        "this month".to_string(),
    );
    render_card(
        f,
        cards[1],
        "Total Spent",
        spent,
        theme::RED,
        format!("{count} expenses"),
    );
    render_card(
        f,
        cards[2],
        "Remaining",
        remaining,
        if remaining < Decimal::ZERO {
            theme::RED
        } else {
            theme::GREEN
        },
        if app.budget.is_exceeded_by(spent) {
            "over budget".to_string()
        } else {
            String::new()
        },
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: Color, sub: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_category_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Spending by Category ", theme::title_style()));

    let categories = app.summary.categories_by_amount();
    if categories.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet", theme::dim_style())),
            Line::from(Span::styled(
                "Add one with :add <amount> <category>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    // label, bar, amount, percent
    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = inner_width.saturating_sub(14 + 14 + 7 + 3).max(4);

    let lines: Vec<Line> = categories
        .iter()
        .enumerate()
        .map(|(i, (name, amount))| {
            let pct = app.summary.share_percent(*amount);
            let color = theme::PALETTE[i % theme::PALETTE.len()];
            Line::from(vec![
                Span::styled(format!("{:<14}", truncate(name, 14)), theme::normal_style()),
                Span::raw(" "),
                Span::styled(bar(pct, bar_width), Style::default().fg(color)),
                Span::styled(format!(" {:>13}", format_amount(*amount)), theme::amount_style()),
                Span::styled(format!(" {pct:>5.1}%"), theme::dim_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
