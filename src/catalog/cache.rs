/*!
 * Time-boxed caching for the provider voice catalog.
 *
 * The cache is the only suspending component of the library: a fetch
 * replaces the whole entry list atomically, a failed fetch falls back
 * to the last-known-good list, and concurrent callers share a single
 * in-flight request. The cache can persist through a [`KeyValueStore`]
 * so a restarted process starts warm.
 */

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::VoiceCatalogEntry;
use super::client::VoiceListClient;
use crate::errors::CatalogError;
use crate::storage::{self, KeyValueStore};

/// Store key under which the catalog is persisted
pub const CATALOG_STORE_KEY: &str = "voice_catalog";

/// A fetched catalog with its fetch timestamp
#[derive(Debug, Clone)]
struct CachedCatalog {
    /// The full entry list
    entries: Vec<VoiceCatalogEntry>,
    /// When the list was fetched
    fetched_at: DateTime<Utc>,
}

impl CachedCatalog {
    /// Check whether the catalog is still within its time-to-live
    fn is_fresh(&self, ttl_secs: u64, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.fetched_at) < Duration::seconds(ttl_secs as i64)
    }
}

/// Persisted shape of the catalog record
#[derive(Debug, Serialize, Deserialize)]
struct PersistedCatalog {
    /// Fetch timestamp of the persisted list
    updated_at: DateTime<Utc>,
    /// The persisted entry list
    entries: Vec<VoiceCatalogEntry>,
}

/// Voice catalog service with TTL caching and offline fallback
#[derive(Debug)]
pub struct VoiceCatalogService {
    /// Voice-list source
    client: Arc<dyn VoiceListClient>,
    /// Optional persistence backend
    store: Option<Arc<dyn KeyValueStore>>,
    /// Cache time-to-live in seconds
    ttl_secs: u64,
    /// Last-known-good catalog
    cached: RwLock<Option<CachedCatalog>>,
    /// Serializes fetches so concurrent callers share one request
    fetch_guard: Mutex<()>,
}

impl VoiceCatalogService {
    /// Create a service over a voice-list client
    pub fn new(client: Arc<dyn VoiceListClient>, ttl_secs: u64) -> Self {
        Self {
            client,
            store: None,
            ttl_secs,
            cached: RwLock::new(None),
            fetch_guard: Mutex::new(()),
        }
    }

    /// Attach a persistence backend
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The configured time-to-live in seconds
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Prime the in-memory cache from the persisted record, if any
    ///
    /// A stale persisted record still primes the cache: it remains
    /// usable as the offline fallback while a refetch is attempted.
    ///
    /// # Returns
    /// * `Ok(true)` when a persisted catalog was loaded
    pub async fn restore_persisted(&self) -> anyhow::Result<bool> {
        let Some(store) = &self.store else {
            return Ok(false);
        };

        match storage::get_json::<PersistedCatalog>(store.as_ref(), CATALOG_STORE_KEY).await? {
            Some(record) => {
                info!(
                    "Restored persisted voice catalog: {} entries from {}",
                    record.entries.len(),
                    record.updated_at
                );
                self.store_catalog(record.entries, record.updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Get the voice catalog, fetching when the cache is absent or expired
    ///
    /// With `force` set the cache freshness check is skipped. On fetch
    /// failure a stale cache is returned with a warning when one
    /// exists; otherwise the typed fetch error propagates. Callers
    /// needing a deadline can wrap this in `tokio::time::timeout`;
    /// abandoning the wait never corrupts cache state.
    pub async fn get_voices(&self, force: bool) -> Result<Vec<VoiceCatalogEntry>, CatalogError> {
        if !force {
            if let Some(entries) = self.fresh_entries(Utc::now()) {
                debug!("Voice catalog cache hit ({} entries)", entries.len());
                return Ok(entries);
            }
        }

        let _guard = self.fetch_guard.lock().await;

        // Whoever held the guard before us may have refreshed the cache
        if !force {
            if let Some(entries) = self.fresh_entries(Utc::now()) {
                debug!("Voice catalog refreshed while waiting for in-flight fetch");
                return Ok(entries);
            }
        }

        match self.client.fetch_voice_list().await {
            Ok(entries) => {
                let fetched_at = Utc::now();
                self.store_catalog(entries.clone(), fetched_at);
                self.persist(&entries, fetched_at).await;
                info!("Voice catalog refreshed: {} entries", entries.len());
                Ok(entries)
            }
            Err(e) => {
                let stale = self.cached.read().as_ref().map(|c| c.entries.clone());
                match stale {
                    Some(entries) => {
                        warn!(
                            "Voice list fetch failed ({}); serving stale cache of {} entries",
                            e,
                            entries.len()
                        );
                        Ok(entries)
                    }
                    None => Err(e),
                }
            }
        }
    }

    /// The cached entries, fresh or stale, without fetching
    pub fn cached_entries(&self) -> Option<Vec<VoiceCatalogEntry>> {
        self.cached.read().as_ref().map(|c| c.entries.clone())
    }

    /// Resolve the human-facing name of a voice from the cached catalog
    pub fn display_name_for(&self, voice_id: &str) -> Option<String> {
        self.cached
            .read()
            .as_ref()?
            .entries
            .iter()
            .find(|entry| entry.short_name == voice_id)
            .map(|entry| entry.preferred_name().to_string())
    }

    /// Return the cached entries when still within the TTL
    fn fresh_entries(&self, now: DateTime<Utc>) -> Option<Vec<VoiceCatalogEntry>> {
        let guard = self.cached.read();
        guard
            .as_ref()
            .filter(|c| c.is_fresh(self.ttl_secs, now))
            .map(|c| c.entries.clone())
    }

    /// Replace the cached catalog, never with older data than is held
    fn store_catalog(&self, entries: Vec<VoiceCatalogEntry>, fetched_at: DateTime<Utc>) {
        let mut guard = self.cached.write();
        if let Some(existing) = guard.as_ref() {
            if fetched_at < existing.fetched_at {
                debug!("Discarding catalog older than the cached one");
                return;
            }
        }
        *guard = Some(CachedCatalog { entries, fetched_at });
    }

    /// Persist the catalog record, best-effort
    async fn persist(&self, entries: &[VoiceCatalogEntry], fetched_at: DateTime<Utc>) {
        let Some(store) = &self.store else {
            return;
        };

        let record = PersistedCatalog { updated_at: fetched_at, entries: entries.to_vec() };
        if let Err(e) = storage::set_json(store.as_ref(), CATALOG_STORE_KEY, &record).await {
            warn!("Failed to persist voice catalog: {}", e);
        }
    }
}
