//! Bookmark domain model.
//!
//! # Invariants
//! - Every bookmark is identified by a `BookmarkId` unique within its store.
//! - Tags keep caller order; blanks and duplicates are dropped.

pub mod bookmark;
