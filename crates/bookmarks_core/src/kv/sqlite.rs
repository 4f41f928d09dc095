//! SQLite-backed key-value store over the `kv_items` table.

use super::{KeyValueStore, KvError, KvResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store borrowing a ready (schema-applied) connection.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection returned by `db::open_db` or `db::open_db_in_memory`.
    ///
    /// # Errors
    /// - Returns an error when the `kv_items` table is missing.
    pub fn try_new(conn: &'conn Connection) -> KvResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'kv_items'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(KvError::Unavailable(
                "missing required table `kv_items`".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_items WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_items (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        debug!(
            "event=kv_set module=kv status=ok key={key} bytes={}",
            value.len()
        );
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> KvResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM kv_items WHERE key = ?1;", [key])?;
        debug!("event=kv_remove module=kv status=ok key={key} removed={removed}");
        Ok(())
    }
}
