//! List view (`/`).

use super::write_bookmark_line;
use bookmarks_core::{BookmarkStore, Clock, KeyValueStore, ListFilter, Route, Router};
use std::io::Write;

pub fn render<S: KeyValueStore, C: Clock>(
    store: &BookmarkStore<S, C>,
    filter: &ListFilter,
    router: &Router,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let items = store.list(filter);
    writeln!(out, "Bookmarks ({} of {})", items.len(), store.len())?;
    if items.is_empty() {
        if store.is_empty() {
            writeln!(
                out,
                "No bookmarks yet. Add one at {}.",
                router.href(&Route::Add)
            )?;
        } else {
            writeln!(out, "Nothing matches the current filter.")?;
        }
        return Ok(());
    }
    for bookmark in items {
        write_bookmark_line(bookmark, out)?;
    }

    let tags = store.tags();
    if !tags.is_empty() {
        writeln!(out, "Tags: {}", tags.join(", "))?;
    }
    Ok(())
}
