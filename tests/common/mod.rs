/*!
 * Common test utilities for the ssmlstudio test suite
 */

use anyhow::Result;
use tempfile::TempDir;

use ssmlstudio::catalog::{VoiceCatalogEntry, VoiceGender};
use ssmlstudio::document::{Block, BlockAttributes, Document, Inline, SpanAttributes};

// Re-export the mock catalog client module
pub mod mock_catalog;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Builds a voice catalog entry with sensible defaults
pub fn catalog_entry(short_name: &str, locale: &str, gender: VoiceGender) -> VoiceCatalogEntry {
    VoiceCatalogEntry {
        short_name: short_name.to_string(),
        display_name: short_name.split('-').next_back().unwrap_or(short_name).to_string(),
        local_name: None,
        locale: locale.to_string(),
        gender,
    }
}

/// A small realistic voice catalog spanning two locales
pub fn sample_catalog() -> Vec<VoiceCatalogEntry> {
    vec![
        VoiceCatalogEntry {
            short_name: "zh-CN-XiaoxiaoNeural".to_string(),
            display_name: "Xiaoxiao".to_string(),
            local_name: Some("晓晓".to_string()),
            locale: "zh-CN".to_string(),
            gender: VoiceGender::Female,
        },
        catalog_entry("zh-CN-YunxiNeural", "zh-CN", VoiceGender::Male),
        catalog_entry("en-US-AriaNeural", "en-US", VoiceGender::Female),
        catalog_entry("en-US-GuyNeural", "en-US", VoiceGender::Male),
    ]
}

/// Builds a single-block document from (text, attrs) pairs
pub fn doc_from_runs(runs: Vec<(&str, Option<SpanAttributes>)>) -> Document {
    let inlines = runs
        .into_iter()
        .map(|(text, attrs)| match attrs {
            Some(attrs) => Inline::marked_text(text, attrs),
            None => Inline::text(text),
        })
        .collect();

    Document::from_blocks(vec![Block { attrs: BlockAttributes::default(), inlines }])
}

/// Shorthand for voice-only span attributes
pub fn voice_attrs(voice: &str) -> SpanAttributes {
    SpanAttributes::new().with_voice(voice, None)
}
