//! In-process key-value store with optional fault injection.

use super::{KeyValueStore, KvError, KvResult};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    items: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one raw value, bypassing fault injection.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    /// Makes every subsequent `get_item` fail.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Makes every subsequent `set_item`/`remove_item` fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Raw stored value, bypassing fault injection.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        if self.fail_reads {
            return Err(KvError::Unavailable("read fault injected".to_string()));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()> {
        if self.fail_writes {
            return Err(KvError::Unavailable("write fault injected".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> KvResult<()> {
        if self.fail_writes {
            return Err(KvError::Unavailable("write fault injected".to_string()));
        }
        self.items.remove(key);
        Ok(())
    }
}
