/*!
 * Provider voice catalog: entry types, locale operations, and the
 * time-boxed cache.
 *
 * - `client`: HTTP client for the provider voice-list endpoint, behind
 *   a trait so tests can substitute a mock
 * - `cache`: TTL cache with single-flight fetching, stale fallback,
 *   and key/value-store persistence
 */

use serde::{Deserialize, Serialize};

use crate::locale_utils;

// Re-export main types for easier usage
pub use self::cache::VoiceCatalogService;
pub use self::client::{HttpVoiceListClient, VoiceListClient};

// Submodules
pub mod cache;
pub mod client;

/// Voice gender as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceGender {
    /// Male voice
    Male,
    /// Female voice
    Female,
}

impl VoiceGender {
    /// Human-facing gender label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// One entry of the provider voice catalog
///
/// Deserialized from the provider's PascalCase JSON; every other field
/// of the response is treated as opaque and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCatalogEntry {
    /// Provider voice identifier, e.g. "zh-CN-XiaoxiaoNeural"
    #[serde(rename = "ShortName")]
    pub short_name: String,

    /// Human-facing voice name
    #[serde(rename = "DisplayName")]
    pub display_name: String,

    /// Localized voice name when the provider reports one
    #[serde(rename = "LocalName", default, skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,

    /// Locale code, e.g. "zh-CN"
    #[serde(rename = "Locale")]
    pub locale: String,

    /// Voice gender
    #[serde(rename = "Gender")]
    pub gender: VoiceGender,
}

impl VoiceCatalogEntry {
    /// The name to show in pickers: localized when available
    pub fn preferred_name(&self) -> &str {
        self.local_name.as_deref().unwrap_or(&self.display_name)
    }

    /// Picker label combining name and gender
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.preferred_name(), self.gender.label())
    }
}

/// A selectable locale with a human-readable label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleOption {
    /// Normalized locale code
    pub code: String,
    /// Display label
    pub label: String,
}

/// Derive the sorted-unique set of lower-cased locale codes
pub fn unique_locales(entries: &[VoiceCatalogEntry]) -> Vec<String> {
    let mut locales: Vec<String> = entries
        .iter()
        .map(|entry| locale_utils::normalize_locale(&entry.locale))
        .filter(|locale| !locale.is_empty())
        .collect();
    locales.sort();
    locales.dedup();
    locales
}

/// Filter entries whose locale matches the target, case-insensitively
pub fn filter_by_locale(entries: &[VoiceCatalogEntry], locale: &str) -> Vec<VoiceCatalogEntry> {
    entries
        .iter()
        .filter(|entry| locale_utils::locales_match(&entry.locale, locale))
        .cloned()
        .collect()
}

/// Pair each unique locale with a display label for locale pickers
pub fn locale_options(entries: &[VoiceCatalogEntry]) -> Vec<LocaleOption> {
    unique_locales(entries)
        .into_iter()
        .map(|code| LocaleOption {
            label: locale_utils::locale_display_name(&code),
            code,
        })
        .collect()
}
