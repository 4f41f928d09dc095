//! Config screen (`/config`): export, import, delete-all.

use anyhow::Context;
use bookmarks_core::{BookmarkStore, Clock, KeyValueStore};
use log::info;
use std::io::Write;
use std::path::Path;

pub fn render<S: KeyValueStore, C: Clock>(
    store: &BookmarkStore<S, C>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "Data")?;
    writeln!(out, "  bookmarks: {}", store.len())?;
    writeln!(out, "  tags:      {}", store.tags().len())?;
    writeln!(out, "  bookmarks_core {}", bookmarks_core::core_version())?;
    Ok(())
}

/// Writes the export to `target`, or to `out` when `target` is `-`.
pub fn export<S: KeyValueStore, C: Clock>(
    store: &BookmarkStore<S, C>,
    target: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let json = store.export_data()?;
    if target == Path::new("-") {
        writeln!(out, "{json}")?;
        return Ok(());
    }
    std::fs::write(target, json)
        .with_context(|| format!("cannot write {}", target.display()))?;
    info!(
        "event=view_submit module=cli view=config action=export status=ok count={}",
        store.len()
    );
    writeln!(out, "Exported {} bookmarks to {}", store.len(), target.display())?;
    Ok(())
}

pub fn import<S: KeyValueStore, C: Clock>(
    store: &mut BookmarkStore<S, C>,
    source: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(source)
        .with_context(|| format!("cannot read {}", source.display()))?;
    match store.import_data(&json) {
        Ok(count) => {
            writeln!(out, "Imported {count} bookmarks")?;
            Ok(())
        }
        Err(err) => anyhow::bail!("Invalid data format: {err}"),
    }
}

pub fn delete_all<S: KeyValueStore, C: Clock>(
    store: &mut BookmarkStore<S, C>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let count = store.len();
    store.delete_all();
    writeln!(out, "Deleted {count} bookmarks")?;
    Ok(())
}
