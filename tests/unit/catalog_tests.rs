/*!
 * Tests for voice catalog caching and locale operations
 */

use std::sync::Arc;

use ssmlstudio::catalog::{
    VoiceCatalogService, VoiceGender, filter_by_locale, locale_options, unique_locales,
};

use crate::common::mock_catalog::MockCatalogClient;
use crate::common::{catalog_entry, sample_catalog};

#[tokio::test]
async fn test_getVoices_withWarmCache_shouldServeWithoutSecondFetch() {
    let client = Arc::new(MockCatalogClient::new(sample_catalog()));
    let service = VoiceCatalogService::new(client.clone(), 3600);

    let first = service.get_voices(false).await.unwrap();
    let second = service.get_voices(false).await.unwrap();

    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_getVoices_withForce_shouldAlwaysFetch() {
    let client = Arc::new(MockCatalogClient::new(sample_catalog()));
    let service = VoiceCatalogService::new(client.clone(), 3600);

    service.get_voices(false).await.unwrap();
    service.get_voices(true).await.unwrap();
    service.get_voices(true).await.unwrap();

    assert_eq!(client.call_count(), 3);
}

#[tokio::test]
async fn test_getVoices_afterFetchStartsFailing_shouldServeLastKnownGood() {
    let client = Arc::new(MockCatalogClient::new(sample_catalog()));
    let service = VoiceCatalogService::new(client.clone(), 3600);

    let good = service.get_voices(false).await.unwrap();

    client.fail_from_now_on();
    let fallback = service.get_voices(true).await.unwrap();

    assert_eq!(good, fallback);
}

#[tokio::test]
async fn test_getVoices_withNoCacheAndFailure_shouldPropagate() {
    let client = Arc::new(MockCatalogClient::new(vec![]));
    client.fail_from_now_on();
    let service = VoiceCatalogService::new(client, 3600);

    assert!(service.get_voices(false).await.is_err());
}

#[tokio::test]
async fn test_displayNameFor_shouldPreferLocalizedName() {
    let client = Arc::new(MockCatalogClient::new(sample_catalog()));
    let service = VoiceCatalogService::new(client, 3600);
    service.get_voices(false).await.unwrap();

    assert_eq!(service.display_name_for("zh-CN-XiaoxiaoNeural").as_deref(), Some("晓晓"));
    assert_eq!(service.display_name_for("en-US-AriaNeural").as_deref(), Some("AriaNeural"));
}

#[test]
fn test_uniqueLocales_overSampleCatalog_shouldBeSortedLowercase() {
    assert_eq!(unique_locales(&sample_catalog()), vec!["en-us", "zh-cn"]);
}

#[test]
fn test_filterByLocale_shouldReturnOnlyMatchingVoices() {
    let filtered = filter_by_locale(&sample_catalog(), "en-US");

    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|entry| entry.locale == "en-US"));
}

#[test]
fn test_filterByLocale_withUnknownLocale_shouldReturnEmpty() {
    assert!(filter_by_locale(&sample_catalog(), "ja-JP").is_empty());
}

#[test]
fn test_localeOptions_shouldCarryReadableLabels() {
    let options = locale_options(&sample_catalog());

    assert_eq!(options.len(), 2);
    assert!(options.iter().any(|o| o.code == "zh-cn" && o.label.contains("Chinese")));
    assert!(options.iter().any(|o| o.code == "en-us" && o.label.contains("English")));
}

#[test]
fn test_catalogEntry_displayLabel_shouldCombineNameAndGender() {
    let entry = catalog_entry("en-US-GuyNeural", "en-US", VoiceGender::Male);
    assert_eq!(entry.display_label(), "GuyNeural - Male");
}
