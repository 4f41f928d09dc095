//! Add form (`/add`).

use bookmarks_core::{BookmarkDraft, BookmarkStore, Clock, KeyValueStore, Route, Router};
use log::info;
use std::io::Write;

pub fn render(out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "New bookmark")?;
    writeln!(out, "  --title <TITLE>   required")?;
    writeln!(out, "  --url <URL>       required")?;
    writeln!(out, "  --tags <a,b,...>  optional, comma separated")?;
    Ok(())
}

/// Saves the form and reports where the new bookmark can be edited.
pub fn submit<S: KeyValueStore, C: Clock>(
    store: &mut BookmarkStore<S, C>,
    draft: BookmarkDraft,
    router: &Router,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let created = store.add_bookmark(draft)?;
    info!("event=view_submit module=cli view=add status=ok id={}", created.id);
    writeln!(
        out,
        "Added bookmark {} ({})",
        created.id,
        router.href(&Route::Edit { id: created.id })
    )?;
    Ok(())
}
