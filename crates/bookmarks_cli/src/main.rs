//! `bookmarks` executable.
//!
//! # Responsibility
//! - Parse arguments, resolve configuration and start logging.
//! - Open the SQLite-backed key-value store and hand it to the views.

mod app;
mod cli;
mod views;

use anyhow::Context;
use bookmarks_core::db::open_db;
use bookmarks_core::{BookmarkStore, Router, SqliteKvStore};
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = app::resolve_config(&cli.global);
    app::start_logging(&config)?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("cannot open database {}", config.db_path.display()))?;
    let kv = SqliteKvStore::try_new(&conn)?;
    let mut store = BookmarkStore::new(kv);
    let router = Router::with_base(&config.base_path);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app::execute(cli.command, &mut store, &router, &mut out)
}
