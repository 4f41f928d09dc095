//! Bookmark store over a key-value backend.
//!
//! # Responsibility
//! - Load the persisted collection once on construction.
//! - Apply add/update/delete/delete-all/import mutations and persist them.
//! - Serve linear-scan reads (by id, filtered list, tag listing).
//!
//! # Invariants
//! - New bookmarks are prepended; stored order is newest first.
//! - A new id is the clock value, bumped past the current maximum when the
//!   clock has not moved forward. If the maximum is `i64::MAX`, an unused id
//!   is picked instead.
//! - Import either replaces the whole collection or changes nothing.

use crate::kv::KeyValueStore;
use crate::model::bookmark::{Bookmark, BookmarkDraft, BookmarkId, BookmarkPatch, ValidationError};
use crate::store::clock::{Clock, SystemClock};
use log::{error, info, warn};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the serialized collection lives.
pub const STORAGE_KEY: &str = "my_bookmarks_v1";

/// User-visible persistence problem raised by the last load or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreIssue {
    LoadFailed,
    SaveFailed,
}

impl Display for StoreIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadFailed => write!(f, "Failed to load data"),
            Self::SaveFailed => write!(f, "Failed to save data"),
        }
    }
}

/// Rejected store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound(BookmarkId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "bookmark not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Why an import payload was refused. The collection is untouched in every case.
#[derive(Debug)]
pub enum ImportError {
    Malformed(serde_json::Error),
    NotAnArray,
    InvalidRecord { index: usize, reason: &'static str },
    DuplicateId(BookmarkId),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "import payload is not valid JSON: {err}"),
            Self::NotAnArray => write!(f, "import payload must be a JSON array"),
            Self::InvalidRecord { index, reason } => {
                write!(f, "import record #{index} is invalid: {reason}")
            }
            Self::DuplicateId(id) => write!(f, "import payload repeats bookmark id {id}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

/// Optional filters for `BookmarkStore::list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Exact tag match, case-insensitive.
    pub tag: Option<String>,
    /// Substring of title or url, case-insensitive.
    pub text: Option<String>,
}

impl ListFilter {
    fn accepts(&self, bookmark: &Bookmark) -> bool {
        let tag_ok = self.tag.as_deref().map_or(true, |tag| bookmark.has_tag(tag));
        let text_ok = self
            .text
            .as_deref()
            .map_or(true, |text| bookmark.matches_text(text));
        tag_ok && text_ok
    }
}

/// In-memory bookmark list mirrored to one key-value entry.
pub struct BookmarkStore<S: KeyValueStore, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    bookmarks: Vec<Bookmark>,
    issue: Option<StoreIssue>,
}

impl<S: KeyValueStore> BookmarkStore<S, SystemClock> {
    /// Creates a store on the wall clock and loads the persisted collection.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> BookmarkStore<S, C> {
    /// Creates a store with a custom id clock and loads the persisted collection.
    pub fn with_clock(storage: S, clock: C) -> Self {
        let mut store = Self {
            storage,
            clock,
            bookmarks: Vec::new(),
            issue: None,
        };
        store.load();
        store
    }

    /// Re-reads the collection from storage.
    ///
    /// A missing or empty entry yields an empty list. Read or parse failures also yield
    /// an empty list and raise `StoreIssue::LoadFailed`.
    pub fn load(&mut self) {
        let loaded = match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) if raw.is_empty() => Ok(Vec::new()),
            Ok(Some(raw)) => serde_json::from_str::<Vec<Bookmark>>(&raw)
                .map_err(|err| format!("parse_failed: {err}")),
            Ok(None) => Ok(Vec::new()),
            Err(err) => Err(format!("read_failed: {err}")),
        };

        match loaded {
            Ok(bookmarks) => {
                info!(
                    "event=store_load module=store status=ok count={}",
                    bookmarks.len()
                );
                self.bookmarks = bookmarks;
            }
            Err(reason) => {
                error!("event=store_load module=store status=error error={reason}");
                self.issue = Some(StoreIssue::LoadFailed);
                self.bookmarks = Vec::new();
            }
        }
    }

    /// Bookmarks in stored order (newest first).
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Last persistence problem, if any.
    pub fn issue(&self) -> Option<StoreIssue> {
        self.issue
    }

    pub fn clear_issue(&mut self) {
        self.issue = None;
    }

    /// Backing key-value store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Creates a bookmark, prepends it and persists the collection.
    pub fn add_bookmark(&mut self, draft: BookmarkDraft) -> Result<Bookmark, StoreError> {
        draft.validate()?;
        let bookmark = draft.into_bookmark(self.next_id());
        self.bookmarks.insert(0, bookmark.clone());
        info!(
            "event=bookmark_add module=store status=ok id={} count={}",
            bookmark.id,
            self.bookmarks.len()
        );
        self.save();
        Ok(bookmark)
    }

    /// Merges `patch` into the bookmark with `id` and persists.
    ///
    /// Unknown ids change nothing and persist nothing.
    pub fn update_bookmark(
        &mut self,
        id: BookmarkId,
        patch: BookmarkPatch,
    ) -> Result<Bookmark, StoreError> {
        patch.validate()?;
        let Some(target) = self.bookmarks.iter_mut().find(|b| b.id == id) else {
            warn!("event=bookmark_update module=store status=not_found id={id}");
            return Err(StoreError::NotFound(id));
        };
        target.apply(patch);
        let updated = target.clone();
        info!("event=bookmark_update module=store status=ok id={id}");
        self.save();
        Ok(updated)
    }

    /// Removes the bookmark with `id` and persists. Returns whether one was removed.
    pub fn delete_bookmark(&mut self, id: BookmarkId) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        let removed = self.bookmarks.len() != before;
        info!("event=bookmark_delete module=store status=ok id={id} removed={removed}");
        self.save();
        removed
    }

    /// Linear lookup by id.
    pub fn get_bookmark_by_id(&self, id: BookmarkId) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// Clears the collection and removes the persisted entry.
    pub fn delete_all(&mut self) {
        let count = self.bookmarks.len();
        self.bookmarks.clear();
        match self.storage.remove_item(STORAGE_KEY) {
            Ok(()) => info!("event=bookmark_delete_all module=store status=ok count={count}"),
            Err(err) => {
                error!("event=bookmark_delete_all module=store status=error error={err}");
                self.issue = Some(StoreIssue::SaveFailed);
            }
        }
    }

    /// Replaces the whole collection with a JSON array of bookmark objects.
    ///
    /// Every element must be an object with a non-zero integer `id` and
    /// non-empty `title`/`url` strings; `tags` is optional. Returns the number
    /// of imported bookmarks.
    pub fn import_data(&mut self, json: &str) -> Result<usize, ImportError> {
        let parsed = match parse_import(json) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("event=bookmark_import module=store status=rejected error={err}");
                return Err(err);
            }
        };
        let count = parsed.len();
        self.bookmarks = parsed;
        info!("event=bookmark_import module=store status=ok count={count}");
        self.save();
        Ok(count)
    }

    /// Serializes the collection as pretty JSON accepted by `import_data`.
    pub fn export_data(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.bookmarks)
    }

    /// Bookmarks accepted by `filter`, in stored order.
    pub fn list(&self, filter: &ListFilter) -> Vec<&Bookmark> {
        self.bookmarks.iter().filter(|b| filter.accepts(b)).collect()
    }

    /// Distinct tags, sorted case-insensitively.
    pub fn tags(&self) -> Vec<String> {
        let unique = self
            .bookmarks
            .iter()
            .flat_map(|b| b.tags.iter())
            .map(|tag| (tag.to_lowercase(), tag.clone()))
            .collect::<BTreeSet<_>>();
        unique.into_iter().map(|(_, tag)| tag).collect()
    }

    fn next_id(&self) -> BookmarkId {
        let now = self.clock.now_millis();
        match self.bookmarks.iter().map(|b| b.id).max() {
            Some(max) if now <= max => max
                .checked_add(1)
                .unwrap_or_else(|| self.free_id(now)),
            _ => now,
        }
    }

    /// `preferred` when unused, otherwise the lowest unused positive id.
    fn free_id(&self, preferred: BookmarkId) -> BookmarkId {
        let taken = self.bookmarks.iter().map(|b| b.id).collect::<HashSet<_>>();
        if preferred > 0 && !taken.contains(&preferred) {
            return preferred;
        }
        (1..BookmarkId::MAX)
            .find(|id| !taken.contains(id))
            .unwrap_or(BookmarkId::MIN)
    }

    fn save(&mut self) {
        let result = serde_json::to_string(&self.bookmarks)
            .map_err(|err| format!("serialize_failed: {err}"))
            .and_then(|raw| {
                self.storage
                    .set_item(STORAGE_KEY, &raw)
                    .map_err(|err| format!("write_failed: {err}"))
            });

        match result {
            Ok(()) => {}
            Err(reason) => {
                error!("event=store_save module=store status=error error={reason}");
                self.issue = Some(StoreIssue::SaveFailed);
            }
        }
    }
}

fn parse_import(json: &str) -> Result<Vec<Bookmark>, ImportError> {
    let value: Value = serde_json::from_str(json).map_err(ImportError::Malformed)?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray);
    };

    let mut seen = HashSet::new();
    let mut bookmarks = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let bookmark = parse_import_record(index, item)?;
        if !seen.insert(bookmark.id) {
            return Err(ImportError::DuplicateId(bookmark.id));
        }
        bookmarks.push(bookmark);
    }
    Ok(bookmarks)
}

fn parse_import_record(index: usize, item: &Value) -> Result<Bookmark, ImportError> {
    let invalid = |reason| ImportError::InvalidRecord { index, reason };
    let object = item.as_object().ok_or_else(|| invalid("not an object"))?;

    let id = object
        .get("id")
        .and_then(Value::as_i64)
        .filter(|id| *id != 0)
        .ok_or_else(|| invalid("`id` must be a non-zero integer"))?;
    let title = non_empty_text(object.get("title")).ok_or_else(|| invalid("`title` is missing"))?;
    let url = non_empty_text(object.get("url")).ok_or_else(|| invalid("`url` is missing"))?;
    let tags = match object.get("tags") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| invalid("`tags` must contain only strings"))?,
        Some(_) => return Err(invalid("`tags` must be an array")),
    };

    Ok(Bookmark {
        id,
        title,
        url,
        tags,
    })
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
