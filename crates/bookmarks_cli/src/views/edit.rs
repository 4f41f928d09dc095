//! Edit form (`/edit/:id`).

use bookmarks_core::{
    BookmarkId, BookmarkPatch, BookmarkStore, Clock, KeyValueStore, Route, Router,
};
use log::info;
use std::io::Write;

pub fn render<S: KeyValueStore, C: Clock>(
    store: &BookmarkStore<S, C>,
    id: BookmarkId,
    router: &Router,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(bookmark) = store.get_bookmark_by_id(id) else {
        anyhow::bail!("bookmark not found: {id}");
    };
    writeln!(out, "Edit {}", router.href(&Route::Edit { id }))?;
    writeln!(out, "  title: {}", bookmark.title)?;
    writeln!(out, "  url:   {}", bookmark.url)?;
    writeln!(out, "  tags:  {}", bookmark.tags.join(", "))?;
    Ok(())
}

/// Applies `patch`, or shows the bookmark unchanged when the patch is empty.
pub fn submit<S: KeyValueStore, C: Clock>(
    store: &mut BookmarkStore<S, C>,
    id: BookmarkId,
    patch: BookmarkPatch,
    router: &Router,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if patch.is_empty() {
        return render(store, id, router, out);
    }
    store.update_bookmark(id, patch)?;
    info!("event=view_submit module=cli view=edit status=ok id={id}");
    writeln!(out, "Updated bookmark {id}")?;
    render(store, id, router, out)
}

pub fn delete<S: KeyValueStore, C: Clock>(
    store: &mut BookmarkStore<S, C>,
    id: BookmarkId,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if !store.delete_bookmark(id) {
        anyhow::bail!("bookmark not found: {id}");
    }
    writeln!(out, "Deleted bookmark {id}")?;
    Ok(())
}
