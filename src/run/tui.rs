use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::error::StoreError;
use crate::session::Session;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;

pub(crate) fn as_tui(session: &mut Session, startup_error: Option<StoreError>) -> Result<()> {
    let mut app = App::new();
    app.refresh(session);
    if let Some(e) = startup_error {
        app.set_status(format!("Database error: {e}"));
    }

    enable_raw_mode()?;
    let result = with_restore(
        || {
            execute!(io::stdout(), EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
        },
        |mut terminal| run_app(&mut terminal, &mut app, session),
        restore_terminal,
    );

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

/// Run `setup` then `body`, and call `restore` whatever either returned.
/// The first error wins.
fn with_restore<T>(
    setup: impl FnOnce() -> Result<T>,
    body: impl FnOnce(T) -> Result<()>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<()> {
    let result = setup().and_then(body);
    let restored = restore();
    result.and(restored)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session: &mut Session,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Tab, status, command bars plus the table border and header
            app.visible_rows = (f.area().height.saturating_sub(6) as usize).max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, session)?,
                InputMode::Command => handle_command_input(key, app, session)?,
                InputMode::Confirm => handle_confirm_input(key, app, session),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    let len = app.expenses.len();
    let page = app.visible_rows;

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char(':') => start_command(app, ""),
        KeyCode::Char('a') => start_command(app, "add "),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Expenses,
        KeyCode::Tab | KeyCode::BackTab => {
            // Two screens, so forward and back are the same move
            app.screen = match app.screen {
                Screen::Dashboard => Screen::Expenses,
                Screen::Expenses => Screen::Dashboard,
            };
        }
        KeyCode::Char('j') | KeyCode::Down => app.cursor.down(len, page),
        KeyCode::Char('k') | KeyCode::Up => app.cursor.up(),
        KeyCode::Char('g') => app.cursor.top(),
        KeyCode::Char('G') => app.cursor.bottom(len, page),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                app.cursor.down(len, page);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                app.cursor.up();
            }
        }
        KeyCode::Char('D') if app.screen == Screen::Expenses => {
            commands::handle_command("delete", app, session)?;
        }
        KeyCode::Esc => app.set_status(""),
        _ => {}
    }
    Ok(())
}

fn start_command(app: &mut App, prefill: &str) {
    app.input_mode = InputMode::Command;
    app.command_input = prefill.to_string();
}

fn handle_command_input(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, session)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            if app.command_input.pop().is_none() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            let keep = trimmed.rfind(' ').map_or(0, |pos| pos + 1);
            app.command_input.truncate(keep);
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, session: &mut Session) {
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    let action = app.pending_action.take();

    match (key.code, action) {
        (KeyCode::Char('y') | KeyCode::Char('Y'), Some(action)) => {
            commands::run_pending(action, app, session);
        }
        _ => app.set_status("Cancelled"),
    }
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tui_tests;
