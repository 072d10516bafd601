use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;
use super::util::format_amount;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, chunks[1], app),
        Screen::Expenses => super::screens::expenses::render(f, chunks[1], app),
    }
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = if *s == app.screen {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            };
            Line::from(Span::styled(format!("{}:{s}", i + 1), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let spent = app.summary.total_spent;
    let info = format!(
        " {} | spent {} of {} ",
        app.screen,
        format_amount(spent),
        format_amount(app.budget.amount())
    );
    let remaining = if app.store_loaded {
        format!("| left {}", format_amount(app.remaining()))
    } else {
        "| database unavailable, :reload to retry".to_string()
    };

    let right = match app.screen {
        Screen::Dashboard => " a add | :budget | ? help ",
        Screen::Expenses => " j/k move | D delete | ? help ",
    };

    let used = mode_label.len() + info.len() + remaining.len() + right.len();
    let pad = (area.width as usize).saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(
            &remaining,
            theme::budget_style(!app.store_loaded || app.budget.is_exceeded_by(spent))
                .bg(theme::SURFACE),
        ),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal if app.status_message.is_empty() => (
            Line::from(Span::styled(
                " Press : for commands, a to add, ? for help",
                theme::dim_style(),
            )),
            None,
        ),
        InputMode::Normal => (
            Line::from(Span::styled(
                &app.status_message,
                theme::command_bar_style(),
            )),
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

const KEY_HELP: [(&str, &str); 6] = [
    ("j/k or Up/Down", "Move cursor"),
    ("g/G", "Top/Bottom"),
    ("1-2, Tab", "Switch screens"),
    ("a", "Start :add"),
    ("D (Expenses)", "Delete selected expense"),
    ("Esc / Ctrl-q", "Cancel / Quit"),
];

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " ExpenseTUI Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Keys", theme::section_style())),
    ];
    for (keys, desc) in KEY_HELP {
        help_text.push(Line::from(Span::styled(
            format!("  {keys:<18} {desc}"),
            theme::normal_style(),
        )));
    }
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Commands", theme::section_style())));

    // One line per command, under its long name
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = commands::COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 1)
        .filter(|(_, cmd)| seen.insert(cmd.description))
        .map(|(name, cmd)| (*name, cmd.description))
        .collect();
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<12} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
