use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the library configuration including loading,
/// validating and saving configuration settings.
/// Default voice catalog cache time-to-live (one hour)
pub const DEFAULT_VOICE_CACHE_TTL_SECS: u64 = 3600;

/// Extended catalog cache time-to-live (24 hours), for installations
/// that prefer fewer refetches over list freshness
pub const EXTENDED_VOICE_CACHE_TTL_SECS: u64 = 86_400;

/// Represents the library configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Speech synthesis settings
    pub speech: SpeechConfig,

    /// Voice catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Speech synthesis configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Provider region identifier, e.g. "eastus"
    #[serde(default = "String::new")]
    pub region: String,

    /// Subscription key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Whether to use a custom synthesis endpoint instead of the
    /// region-based default
    #[serde(default)]
    pub use_custom_endpoint: bool,

    /// Custom synthesis endpoint URL
    #[serde(default = "String::new")]
    pub custom_endpoint: String,

    /// Default voice applied to new sessions
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Default locale applied to new sessions
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Default rate percentage
    #[serde(default = "default_percent")]
    pub default_rate: u32,

    /// Default pitch percentage
    #[serde(default = "default_percent")]
    pub default_pitch: u32,

    /// Default volume percentage
    #[serde(default = "default_percent")]
    pub default_volume: u32,
}

impl SpeechConfig {
    /// The synthesis endpoint requests are submitted to
    pub fn synthesis_endpoint(&self) -> String {
        if self.use_custom_endpoint && !self.custom_endpoint.is_empty() {
            self.custom_endpoint.clone()
        } else {
            format!(
                "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
                self.region
            )
        }
    }
}

/// Voice catalog configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Cache time-to-live in seconds
    #[serde(default = "default_catalog_ttl_secs")]
    pub ttl_secs: u64,

    /// Voice-list endpoint override; the region-based default applies
    /// when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { ttl_secs: default_catalog_ttl_secs(), endpoint: None }
    }
}

fn default_voice() -> String {
    "zh-CN-XiaoxiaoNeural".to_string()
}

fn default_locale() -> String {
    "zh-cn".to_string()
}

fn default_percent() -> u32 {
    100
}

fn default_catalog_ttl_secs() -> u64 {
    DEFAULT_VOICE_CACHE_TTL_SECS
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            region: String::new(),
            api_key: String::new(),
            use_custom_endpoint: false,
            custom_endpoint: String::new(),
            default_voice: default_voice(),
            default_locale: default_locale(),
            default_rate: default_percent(),
            default_pitch: default_percent(),
            default_volume: default_percent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speech: SpeechConfig::default(),
            catalog: CatalogConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .context(format!("Failed to open config file: {:?}", path))?;

        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .context(format!("Failed to write config to file: {:?}", path))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.speech.use_custom_endpoint {
            if self.speech.custom_endpoint.is_empty() {
                return Err(anyhow!("Custom endpoint is enabled but no URL is configured"));
            }
            Url::parse(&self.speech.custom_endpoint)
                .map_err(|e| anyhow!("Invalid custom endpoint URL: {}", e))?;
        } else if self.speech.region.trim().is_empty() {
            return Err(anyhow!("Provider region must not be empty"));
        }

        if let Some(endpoint) = &self.catalog.endpoint {
            Url::parse(endpoint).map_err(|e| anyhow!("Invalid voice-list endpoint URL: {}", e))?;
        }

        if self.catalog.ttl_secs == 0 {
            return Err(anyhow!("Catalog TTL must be greater than zero"));
        }

        if self.speech.default_locale.trim().is_empty() {
            return Err(anyhow!("Default locale must not be empty"));
        }

        for (name, value) in [
            ("default_rate", self.speech.default_rate),
            ("default_pitch", self.speech.default_pitch),
            ("default_volume", self.speech.default_volume),
        ] {
            if value > 300 {
                return Err(anyhow!("{} out of range: {}", name, value));
            }
        }

        Ok(())
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}
