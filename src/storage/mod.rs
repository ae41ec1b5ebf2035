/*!
 * Persistent key/value storage.
 *
 * The library persists small records (the voice catalog, user
 * attribute defaults) through a narrow async key/value interface.
 * The default implementation is SQLite-backed:
 *
 * - `connection`: SQLite connection wrapper with async-safe access
 * - `sqlite`: the `KeyValueStore` implementation over one kv table
 */

use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

// Re-export main types for easier usage
pub use self::connection::StoreConnection;
pub use self::sqlite::SqliteKeyValueStore;

// Submodules
pub mod connection;
pub mod sqlite;

/// Async key/value store interface
///
/// Values are opaque strings; JSON payloads go through the
/// [`get_json`]/[`set_json`] helpers.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read the value stored under a key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value under a key, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under a key
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Read and deserialize a JSON value from a store
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize and store a JSON value in a store
pub async fn set_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
