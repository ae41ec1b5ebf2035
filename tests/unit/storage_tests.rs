/*!
 * Tests for the SQLite-backed key/value store
 */

use serde::{Deserialize, Serialize};

use ssmlstudio::storage::{KeyValueStore, SqliteKeyValueStore, get_json, set_json};

use crate::common::create_temp_dir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct SavedDefaults {
    voice: String,
    rate: u32,
}

#[tokio::test]
async fn test_fileStore_shouldPersistAcrossReopen() {
    let dir = create_temp_dir().unwrap();
    let db_path = dir.path().join("store.db");

    {
        let store = SqliteKeyValueStore::new_at(&db_path).unwrap();
        store.set("setting", "persisted").await.unwrap();
    }

    let reopened = SqliteKeyValueStore::new_at(&db_path).unwrap();
    assert_eq!(reopened.get("setting").await.unwrap(), Some("persisted".to_string()));
}

#[tokio::test]
async fn test_fileStore_removeThenGet_shouldReturnNone() {
    let dir = create_temp_dir().unwrap();
    let store = SqliteKeyValueStore::new_at(dir.path().join("store.db")).unwrap();

    store.set("key", "value").await.unwrap();
    store.remove("key").await.unwrap();

    assert_eq!(store.get("key").await.unwrap(), None);
}

#[tokio::test]
async fn test_jsonHelpers_shouldRoundTripUserDefaults() {
    let store = SqliteKeyValueStore::new_in_memory().unwrap();
    let defaults = SavedDefaults { voice: "zh-CN-XiaoxiaoNeural".to_string(), rate: 120 };

    set_json(&store, "attribute_defaults", &defaults).await.unwrap();
    let restored: Option<SavedDefaults> = get_json(&store, "attribute_defaults").await.unwrap();

    assert_eq!(restored, Some(defaults));
}

#[tokio::test]
async fn test_getJson_withCorruptPayload_shouldError() {
    let store = SqliteKeyValueStore::new_in_memory().unwrap();
    store.set("attribute_defaults", "not json at all").await.unwrap();

    let result: anyhow::Result<Option<SavedDefaults>> =
        get_json(&store, "attribute_defaults").await;

    assert!(result.is_err());
}
