/*!
 * Voice-list client for the speech provider.
 *
 * The endpoint returns the full voice catalog as JSON. The client is
 * defined behind a trait so the cache can be exercised in tests with a
 * mock implementation instead of a live endpoint.
 */

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use url::Url;

use super::VoiceCatalogEntry;
use crate::errors::CatalogError;

/// Request timeout for the voice-list endpoint
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Common trait for voice-list sources
///
/// The catalog cache only depends on this trait, allowing tests to
/// substitute predetermined responses for the live provider endpoint.
#[async_trait]
pub trait VoiceListClient: Send + Sync + Debug {
    /// Fetch the complete voice catalog
    ///
    /// # Returns
    /// * `Result<Vec<VoiceCatalogEntry>, CatalogError>` - The full entry list or a typed fetch error
    async fn fetch_voice_list(&self) -> Result<Vec<VoiceCatalogEntry>, CatalogError>;
}

/// HTTP client for the provider's voice-list endpoint
#[derive(Debug)]
pub struct HttpVoiceListClient {
    /// HTTP client for API requests
    client: Client,
    /// Voice-list endpoint URL
    endpoint: Url,
    /// Subscription key for authentication
    api_key: String,
}

impl HttpVoiceListClient {
    /// Create a client against the region-based default endpoint
    pub fn new(region: &str, api_key: impl Into<String>) -> Result<Self, CatalogError> {
        let endpoint = format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/voices/list",
            region
        );
        Self::with_endpoint(&endpoint, api_key)
    }

    /// Create a client against an explicit endpoint URL
    pub fn with_endpoint(endpoint: &str, api_key: impl Into<String>) -> Result<Self, CatalogError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| CatalogError::RequestFailed(format!("Invalid endpoint URL: {}", e)))?;

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            endpoint,
            api_key: api_key.into(),
        })
    }

    /// The endpoint this client targets
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl VoiceListClient for HttpVoiceListClient {
    async fn fetch_voice_list(&self) -> Result<Vec<VoiceCatalogEntry>, CatalogError> {
        debug!("Fetching voice list from {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    CatalogError::ConnectionError(e.to_string())
                } else {
                    CatalogError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Voice list API error ({}): {}", status, message);
            return Err(CatalogError::ApiError { status_code: status.as_u16(), message });
        }

        let entries = response
            .json::<Vec<VoiceCatalogEntry>>()
            .await
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        debug!("Fetched {} voice catalog entries", entries.len());
        Ok(entries)
    }
}
