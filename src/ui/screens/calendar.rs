use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::month_grid;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Current month with each day's spending. Daily totals are keyed by day of
/// month only, so a day shows spending from that day in every month.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(
        WEEKDAYS
            .iter()
            .map(|d| Cell::from(*d).style(theme::header_style())),
    )
    .height(1);

    let today = app.today.day();
    let rows: Vec<Row> = month_grid(app.today)
        .into_iter()
        .map(|week| {
            let cells = week.into_iter().map(|slot| {
                let Some(day) = slot else {
                    return Cell::from("");
                };
                let spent = app.summary.spent_on_day(day);
                let day_style = if day == today {
                    theme::today_style()
                } else {
                    theme::normal_style()
                };
                let amount = spent
                    .map(|a| format!("${:.0}", a.round()))
                    .unwrap_or_default();
                let cell = Cell::from(vec![
                    Line::from(Span::styled(format!("{day:>2}"), day_style)),
                    Line::from(Span::styled(amount, theme::dim_style())),
                ]);
                if spent.is_some() {
                    cell.style(theme::spending_day_style())
                } else {
                    cell
                }
            });
            Row::new(cells).height(2)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Ratio(1, 7); 7])
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    format!(" {} ", app.today.format("%B %Y")),
                    theme::title_style(),
                )),
        );

    f.render_widget(table, area);
}
