//! Synchronous key-value persistence contract.
//!
//! # Responsibility
//! - Define the `get_item`/`set_item`/`remove_item` triple the bookmark store
//!   persists through.
//! - Provide a SQLite-backed implementation and an in-memory one.
//!
//! # Invariants
//! - Values are opaque text; callers own their serialization format.
//! - `remove_item` on a missing key is not an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Failure raised by a key-value backend.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Backend refused the operation (quota, injected fault, read-only media).
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Text blob storage addressed by string keys.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key was never set.
    fn get_item(&self, key: &str) -> KvResult<Option<String>>;
    /// Inserts or replaces the value under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()>;
    /// Deletes `key` if present.
    fn remove_item(&mut self, key: &str) -> KvResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> KvResult<()> {
        (**self).remove_item(key)
    }
}
