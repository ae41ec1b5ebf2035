/*!
 * Tests for configuration loading, saving, and validation
 */

use ssmlstudio::app_config::{Config, DEFAULT_VOICE_CACHE_TTL_SECS, EXTENDED_VOICE_CACHE_TTL_SECS};

use crate::common::create_temp_dir;

#[test]
fn test_config_saveAndLoad_shouldRoundTrip() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.speech.region = "westeurope".to_string();
    config.speech.default_voice = "en-US-AriaNeural".to_string();
    config.catalog.ttl_secs = EXTENDED_VOICE_CACHE_TTL_SECS;

    config.save(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.speech.region, "westeurope");
    assert_eq!(loaded.speech.default_voice, "en-US-AriaNeural");
    assert_eq!(loaded.catalog.ttl_secs, EXTENDED_VOICE_CACHE_TTL_SECS);
}

#[test]
fn test_config_fromFile_withMissingFile_shouldError() {
    let dir = create_temp_dir().unwrap();
    assert!(Config::from_file(dir.path().join("missing.json")).is_err());
}

#[test]
fn test_config_fromFile_withInvalidJson_shouldError() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_config_validate_withExcessiveDefaultRate_shouldFail() {
    let mut config = Config::default();
    config.speech.region = "eastus".to_string();
    config.speech.default_rate = 500;

    assert!(config.validate().is_err());
}

#[test]
fn test_config_ttlConstants_shouldMatchDocumentedValues() {
    assert_eq!(DEFAULT_VOICE_CACHE_TTL_SECS, 3600);
    assert_eq!(EXTENDED_VOICE_CACHE_TTL_SECS, 86_400);
}
