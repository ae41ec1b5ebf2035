/*!
 * Ordered validation checks for compiled speech markup.
 *
 * Checks run in a fixed order and short-circuit on the first hard
 * failure. Version and extension-namespace declarations are advisory
 * only: problems there are logged, never fatal.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use super::tokenizer::{check_balance, tokenize};
use crate::catalog::VoiceCatalogEntry;
use crate::markup::{MSTTS_NAMESPACE, SSML_VERSION, SYNTHESIS_NAMESPACE};

/// Element names allowed to self-close
const SELF_CLOSING_TAGS: &[&str] = &["break"];

// Illegal adjacency: a prosody element directly opening a voice element
static PROSODY_VOICE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<prosody[^>]*><voice[^>]*>").expect("Invalid nesting regex")
});

// Voice elements with their name attribute
static VOICE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<voice[^>]*name=["']([^"']*)["'][^>]*>"#).expect("Invalid voice name regex")
});

/// Outcome of a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Whether the markup passed every hard check
    pub valid: bool,
    /// Failure description when invalid
    pub message: Option<String>,
}

impl ValidationReport {
    /// Create a passing report
    pub fn pass() -> Self {
        Self { valid: true, message: None }
    }

    /// Create a failing report with a description
    pub fn fail(message: impl Into<String>) -> Self {
        Self { valid: false, message: Some(message.into()) }
    }

    /// Check whether validation passed
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Validator for the markup subset this library emits
pub struct SsmlValidator;

impl SsmlValidator {
    /// Validate a candidate markup string
    ///
    /// # Arguments
    /// * `markup` - The markup string to check
    /// * `known_voices` - Catalog entries used to flag unknown voice
    ///   names; unknown names are logged as warnings and never fail
    ///   validation
    ///
    /// # Returns
    /// * `ValidationReport` - pass, or the first hard failure
    pub fn validate(markup: &str, known_voices: Option<&[VoiceCatalogEntry]>) -> ValidationReport {
        let trimmed = markup.trim();

        // 1. Root structure
        if !trimmed.starts_with("<speak") || !trimmed.ends_with("</speak>") {
            return ValidationReport::fail("Markup must start with <speak and end with </speak>");
        }

        // 2. Required synthesis namespace
        let namespace_attr = format!("xmlns=\"{}\"", SYNTHESIS_NAMESPACE);
        if !trimmed.contains(&namespace_attr) {
            return ValidationReport::fail(format!(
                "Markup must declare the synthesis namespace: {}",
                namespace_attr
            ));
        }

        // Advisory: version declaration
        let version_attr = format!("version=\"{}\"", SSML_VERSION);
        if !trimmed.contains(&version_attr) {
            warn!("Markup should declare {}", version_attr);
        }

        // 3. Language attribute
        if !trimmed.contains("xml:lang=") {
            return ValidationReport::fail("Markup must carry an xml:lang attribute");
        }

        // 4. Nesting order: voice wraps prosody, never the reverse
        if PROSODY_VOICE_REGEX.is_match(trimmed) {
            return ValidationReport::fail(
                "Illegal nesting order: <prosody> must not contain <voice>; \
                 wrap <prosody> inside <voice>",
            );
        }

        // 5. Voice names: non-empty, and known when a catalog is supplied
        for capture in VOICE_NAME_REGEX.captures_iter(trimmed) {
            let name = capture[1].trim();
            if name.is_empty() {
                return ValidationReport::fail("Voice name must not be empty");
            }

            if let Some(voices) = known_voices.filter(|v| !v.is_empty()) {
                if !voices.iter().any(|v| v.short_name == name) {
                    warn!(
                        "Voice name \"{}\" is not in the known voice list and may be unsupported",
                        name
                    );
                }
            }
        }

        // Advisory: extension namespace declaration shape
        if trimmed.contains("xmlns:mstts=") {
            let mstts_attr = format!("xmlns:mstts=\"{}\"", MSTTS_NAMESPACE);
            if !trimmed.contains(&mstts_attr) {
                warn!("Extension namespace declaration differs from the recommended {}", mstts_attr);
            }
        }

        // 6. Tag balance
        let tokens = tokenize(trimmed);
        if let Err(message) = check_balance(&tokens, SELF_CLOSING_TAGS) {
            return ValidationReport::fail(message);
        }

        ValidationReport::pass()
    }
}
