use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = Span::styled(
        format!(" Expenses ({}) ", app.expenses.len()),
        theme::title_style(),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(title);

    if app.expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a or type :add 12.50 Food & Dining lunch",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header = Row::new(
        ["ID", "Date", "Category", "Description", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.cursor.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, e)| {
            let style = if i == app.cursor.index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let amount = Span::styled(
                format!("{:>14}", format_amount(e.amount)),
                if i == app.cursor.index {
                    style
                } else {
                    theme::amount_style()
                },
            );

            Row::new(vec![
                Cell::from(format!("#{}", e.id)),
                Cell::from(e.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(&e.category, 18)),
                Cell::from(truncate(e.description_or_empty(), 40)),
                Cell::from(amount),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Length(11),
        Constraint::Length(18),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
