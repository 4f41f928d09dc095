//! Bookmark record and its create/update inputs.
//!
//! # Responsibility
//! - Define the persisted bookmark shape (`id`, `title`, `url`, `tags`).
//! - Validate create input and merge partial updates.
//! - Normalize free-form tag input.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Bookmark identifier: creation time in Unix epoch milliseconds.
pub type BookmarkId = i64;

/// One saved link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub title: String,
    pub url: String,
    /// Ordered, user-visible labels. Older blobs may omit the field.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Bookmark {
    /// Returns whether any tag equals `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }

    /// Case-insensitive substring match on title or url.
    pub fn matches_text(&self, text: &str) -> bool {
        let needle = text.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.url.to_lowercase().contains(&needle)
    }

    /// Overwrites every field present in `patch`. The id never changes.
    pub fn apply(&mut self, patch: BookmarkPatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(url) = patch.url {
            self.url = url.trim().to_string();
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(&tags);
        }
    }
}

/// Input for creating a bookmark. The id is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkDraft {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl BookmarkDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            tags: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Checks that title and url carry non-blank text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.url.trim().is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        Ok(())
    }

    /// Builds the stored record; missing tags become an empty list.
    pub fn into_bookmark(self, id: BookmarkId) -> Bookmark {
        Bookmark {
            id,
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
            tags: self.tags.map(|tags| normalize_tags(&tags)).unwrap_or_default(),
        }
    }
}

/// Partial update. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.tags.is_none()
    }

    /// Rejects fields that are present but blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ValidationError::EmptyTitle);
        }
        if self.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(ValidationError::EmptyUrl);
        }
        Ok(())
    }
}

/// Create/update input violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    EmptyUrl,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyUrl => write!(f, "url must not be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Trims tags, drops blanks and keeps the first of each duplicate.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_string()))
        .map(str::to_string)
        .collect()
}

/// Splits a comma separated form field such as `"rust, cli"`.
pub fn parse_tag_input(raw: &str) -> Vec<String> {
    let parts = raw.split(',').map(str::to_string).collect::<Vec<_>>();
    normalize_tags(&parts)
}
