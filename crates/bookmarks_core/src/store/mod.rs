//! Bookmark collection state and its persistence policy.
//!
//! # Responsibility
//! - Keep the ordered in-memory bookmark list (newest first).
//! - Persist the whole list as one JSON blob after every mutation.
//!
//! # Invariants
//! - Bookmark ids are unique within the list.
//! - Persistence failures never panic and never roll back memory; they raise
//!   the user-visible `StoreIssue` flag instead.

mod bookmark_store;
mod clock;

pub use bookmark_store::{
    BookmarkStore, ImportError, ListFilter, StoreError, StoreIssue, STORAGE_KEY,
};
pub use clock::{Clock, ManualClock, SystemClock};
