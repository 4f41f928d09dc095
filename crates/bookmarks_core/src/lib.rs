//! Core logic for the bookmarks manager.
//!
//! Owns the bookmark model, the key-value persistence contract, the bookmark
//! store and the static route table. Presentation lives in `bookmarks_cli`.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod router;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::bookmark::{
    normalize_tags, parse_tag_input, Bookmark, BookmarkDraft, BookmarkId, BookmarkPatch,
    ValidationError,
};
pub use router::{Route, RouteError, RouteRecord, Router, ROUTES};
pub use store::{
    BookmarkStore, Clock, ImportError, ListFilter, ManualClock, StoreError, StoreIssue,
    SystemClock, STORAGE_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
