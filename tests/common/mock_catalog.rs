/*!
 * Mock voice-list client for testing
 *
 * Provides a mock implementation of the VoiceListClient trait to avoid
 * external API calls in tests, with call tracking and failure injection.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use ssmlstudio::catalog::{VoiceCatalogEntry, VoiceListClient};
use ssmlstudio::errors::CatalogError;

/// Tracks API calls to ensure no actual external requests are made
#[derive(Debug, Default)]
pub struct ApiCallTracker {
    /// Count of mock API calls made
    pub call_count: usize,
    /// Should the next call fail
    pub should_fail: bool,
}

/// Mock implementation of the voice-list client
#[derive(Debug)]
pub struct MockCatalogClient {
    /// Entries returned on success
    entries: Vec<VoiceCatalogEntry>,
    /// Call tracker shared with the test
    tracker: Arc<Mutex<ApiCallTracker>>,
}

impl MockCatalogClient {
    /// Create a mock returning the given entries
    pub fn new(entries: Vec<VoiceCatalogEntry>) -> Self {
        Self { entries, tracker: Arc::new(Mutex::new(ApiCallTracker::default())) }
    }

    /// Get the API call tracker
    pub fn tracker(&self) -> Arc<Mutex<ApiCallTracker>> {
        self.tracker.clone()
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.tracker.lock().unwrap().call_count
    }

    /// Configure the mock to fail on every following call
    pub fn fail_from_now_on(&self) {
        self.tracker.lock().unwrap().should_fail = true;
    }
}

#[async_trait]
impl VoiceListClient for MockCatalogClient {
    async fn fetch_voice_list(&self) -> Result<Vec<VoiceCatalogEntry>, CatalogError> {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.call_count += 1;

        if tracker.should_fail {
            return Err(CatalogError::ConnectionError("mock connection refused".to_string()));
        }

        Ok(self.entries.clone())
    }
}
