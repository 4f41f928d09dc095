//! Text views for the four routes.
//!
//! Each view reads from (and for form submissions, writes to) the bookmark
//! store and prints to any `Write` sink.

use bookmarks_core::{Bookmark, BookmarkStore, Clock, KeyValueStore, Route, Router};
use std::io::Write;

pub mod add;
pub mod config;
pub mod edit;
pub mod home;

/// Renders the read-only screen for `route`.
pub fn render<S: KeyValueStore, C: Clock>(
    route: &Route,
    store: &BookmarkStore<S, C>,
    router: &Router,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match route {
        Route::Home => home::render(store, &Default::default(), router, out),
        Route::Add => add::render(out),
        Route::Edit { id } => edit::render(store, *id, router, out),
        Route::Config => config::render(store, out),
    }
}

/// Prints the store's persistence error flag, if raised.
pub fn write_issue<S: KeyValueStore, C: Clock>(
    store: &BookmarkStore<S, C>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Some(issue) = store.issue() {
        writeln!(out, "error: {issue}")?;
    }
    Ok(())
}

fn write_bookmark_line(bookmark: &Bookmark, out: &mut impl Write) -> std::io::Result<()> {
    write!(out, "{:>15}  {}  <{}>", bookmark.id, bookmark.title, bookmark.url)?;
    if !bookmark.tags.is_empty() {
        write!(out, "  [{}]", bookmark.tags.join(", "))?;
    }
    writeln!(out)
}
