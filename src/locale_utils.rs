use isolang::Language;

/// Locale utilities for provider locale code handling
///
/// This module provides functions for normalizing, matching, and
/// labeling the BCP-47-style locale codes carried by voice catalog
/// entries (e.g. "zh-CN", "en-US").
/// Normalize a locale code to its canonical lower-cased form
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().to_lowercase()
}

/// Extract the ISO 639-1 language part of a locale code
pub fn locale_language(locale: &str) -> String {
    normalize_locale(locale)
        .split('-')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Check whether two locale codes refer to the same locale
pub fn locales_match(a: &str, b: &str) -> bool {
    normalize_locale(a) == normalize_locale(b)
}

/// Derive a human-readable label for a locale code
///
/// Uses the English name of the language part when it resolves,
/// keeping the region suffix (e.g. "zh-CN" -> "Chinese (zh-CN)");
/// falls back to the normalized code itself.
pub fn locale_display_name(locale: &str) -> String {
    let normalized = normalize_locale(locale);
    let language = locale_language(&normalized);

    match Language::from_639_1(&language) {
        Some(lang) => format!("{} ({})", lang.to_name(), normalized),
        None => normalized,
    }
}
