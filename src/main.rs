mod config;
mod db;
mod error;
mod export;
mod logging;
mod models;
mod run;
mod session;
mod tracker;
mod ui;

use anyhow::Result;
use clap::Parser;

use config::Config;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    if let Err(e) = logging::init(&config.log_path()?) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let db = db::Database::new(config.db_path()?);
    let mut startup_error = db.initialize().err();
    let mut session = session::Session::new(db, config.budget);
    if startup_error.is_none() {
        startup_error = session.load().err();
    }
    if let Some(e) = &startup_error {
        // Keep going; every later store call reports its own failure
        tracing::error!(error = %e, "database unavailable at startup");
    }

    match config.command {
        None => run::as_tui(&mut session, startup_error),
        Some(command) => run::as_cli(command, &mut session, startup_error),
    }
}
