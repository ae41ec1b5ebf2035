/*!
 * SQLite-backed key/value store implementation.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use rusqlite::{OptionalExtension, params};
use std::path::Path;

use super::{KeyValueStore, StoreConnection};

/// Key/value store persisting to a single SQLite table
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    /// Database connection
    conn: StoreConnection,
}

impl SqliteKeyValueStore {
    /// Create a store over an existing connection
    pub fn new(conn: StoreConnection) -> Self {
        Self { conn }
    }

    /// Create a store at the default database location
    pub fn new_default() -> Result<Self> {
        Ok(Self::new(StoreConnection::new_default()?))
    }

    /// Create a store at the specified path
    pub fn new_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(StoreConnection::new(path)?))
    }

    /// Create an in-memory store (for testing)
    pub fn new_in_memory() -> Result<Self> {
        Ok(Self::new(StoreConnection::new_in_memory()?))
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();

        self.conn
            .execute_async(move |conn| {
                let value = conn
                    .query_row(
                        "SELECT value FROM kv_store WHERE key = ?1",
                        params![key],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(value)
            })
            .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();

        self.conn
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO kv_store (key, value, updated_at)
                    VALUES (?1, ?2, datetime('now'))
                    ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at
                    "#,
                    params![key, value],
                )?;
                debug!("Stored value under key '{}'", key);
                Ok(())
            })
            .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();

        self.conn
            .execute_async(move |conn| {
                conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
                Ok(())
            })
            .await
    }
}
