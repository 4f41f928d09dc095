//! Process bootstrap: configuration layering, logging, command dispatch.

use crate::cli::{Command, GlobalArgs};
use crate::views;
use anyhow::Context;
use bookmarks_core::config::default_config_path;
use bookmarks_core::{init_logging, AppConfig, BookmarkStore, Clock, KeyValueStore, Route, Router};
use log::info;
use std::io::Write;

/// Config file values overridden by flags and environment variables.
pub fn resolve_config(args: &GlobalArgs) -> AppConfig {
    let path = args.config_file.clone().unwrap_or_else(default_config_path);
    let mut config = AppConfig::load(&path);
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    if let Some(dir) = &args.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if let Some(base) = &args.base_path {
        config.base_path = base.clone();
    }
    config
}

/// Starts file logging when a log directory is configured.
pub fn start_logging(config: &AppConfig) -> anyhow::Result<()> {
    if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, dir).context("failed to start logging")?;
    }
    Ok(())
}

/// Maps a command onto its route and runs the matching view.
pub fn execute<S: KeyValueStore, C: Clock>(
    command: Command,
    store: &mut BookmarkStore<S, C>,
    router: &Router,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let result = match command {
        Command::List { tag, search } => {
            navigate(&Route::Home);
            let filter = Command::list_filter(tag, search);
            views::home::render(store, &filter, router, out)
        }
        Command::Add { title, url, tags } => {
            navigate(&Route::Add);
            views::add::submit(store, Command::draft(title, url, tags), router, out)
        }
        Command::Edit {
            id,
            title,
            url,
            tags,
            delete,
        } => {
            navigate(&Route::Edit { id });
            if delete {
                views::edit::delete(store, id, out)
            } else {
                views::edit::submit(store, id, Command::patch(title, url, tags), router, out)
            }
        }
        Command::Config {
            export,
            import,
            delete_all,
            yes: _,
        } => {
            navigate(&Route::Config);
            if let Some(target) = export {
                views::config::export(store, &target, out)
            } else if let Some(source) = import {
                views::config::import(store, &source, out)
            } else if delete_all {
                views::config::delete_all(store, out)
            } else {
                views::config::render(store, out)
            }
        }
        Command::Open { location } => {
            let route = router.resolve(&location)?;
            navigate(&route);
            views::render(&route, store, router, out)
        }
        Command::Routes => {
            for record in router.routes() {
                writeln!(out, "{:<8} {}", record.name, record.path)?;
            }
            Ok(())
        }
    };

    views::write_issue(store, out)?;
    result
}

fn navigate(route: &Route) {
    info!(
        "event=navigate module=cli route={} path={}",
        route.name(),
        route.path()
    );
}
