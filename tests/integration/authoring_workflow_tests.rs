/*!
 * End-to-end authoring pipeline tests: mutate a document through the
 * session, compile it, and gate-check the result.
 */

use std::sync::Arc;

use ssmlstudio::catalog::VoiceCatalogService;
use ssmlstudio::document::{Block, BreakStrength, Document};
use ssmlstudio::editor::{DocPoint, DocRange, EditorSession};
use ssmlstudio::markup::{segment_block, unescape_text};
use ssmlstudio::validation::SsmlValidator;

use crate::common::mock_catalog::MockCatalogClient;
use crate::common::{doc_from_runs, sample_catalog, voice_attrs};

#[tokio::test]
async fn test_fullAuthoringFlow_shouldProduceValidatedMarkup() {
    let client = Arc::new(MockCatalogClient::new(sample_catalog()));
    let catalog = Arc::new(VoiceCatalogService::new(client, 3600));
    catalog.get_voices(false).await.unwrap();

    let mut session = EditorSession::from_document(
        "zh-cn",
        Document::from_blocks(vec![Block::from_text("你好，世界")]),
    );
    session = session.with_catalog(catalog);

    session.set_voice(&DocRange::within_block(0, 0, 5), "zh-CN-XiaoxiaoNeural").unwrap();
    session.set_rate(&DocRange::within_block(0, 0, 2), 120).unwrap();
    session.insert_break(&DocPoint::new(0, 2), BreakStrength::Medium).unwrap();

    let ssml = session.compile_checked().unwrap();

    assert!(ssml.starts_with("<speak version=\"1.0\""));
    assert!(ssml.contains("xml:lang=\"zh-cn\""));
    assert!(ssml.contains("<voice name=\"zh-CN-XiaoxiaoNeural\">"));
    // The break is inert for grouping, so it stays inside the rate-120 run
    assert!(ssml.contains("<prosody rate=\"+20%\">你好<break strength=\"medium\"/></prosody>"));
    assert!(SsmlValidator::validate(&ssml, None).is_valid());
}

#[tokio::test]
async fn test_sessionSetVoice_shouldResolveDisplayNameFromCatalog() {
    let client = Arc::new(MockCatalogClient::new(sample_catalog()));
    let catalog = Arc::new(VoiceCatalogService::new(client, 3600));
    catalog.get_voices(false).await.unwrap();

    let mut session = EditorSession::from_document(
        "zh-cn",
        Document::from_blocks(vec![Block::from_text("你好")]),
    )
    .with_catalog(catalog);

    session.set_voice(&DocRange::within_block(0, 0, 2), "zh-CN-XiaoxiaoNeural").unwrap();

    let ssmlstudio::document::Inline::Text { attrs: Some(attrs), .. } =
        &session.document().blocks[0].inlines[0]
    else {
        panic!("expected a marked text run");
    };
    assert_eq!(attrs.voice_display_name.as_deref(), Some("晓晓"));
}

#[test]
fn test_groupingAcrossPipeline_shouldKeepNonAdjacentRunsApart() {
    // A, A, B, A with breaks between: the adjacent A runs merge, the
    // non-adjacent A run stays its own segment
    let attrs_a = voice_attrs("A").with_rate(110);
    let attrs_b = voice_attrs("B");

    let mut doc = doc_from_runs(vec![
        ("one ", Some(attrs_a.clone())),
        ("two", Some(attrs_a.clone())),
        ("three", Some(attrs_b)),
        ("four", Some(attrs_a)),
    ]);
    doc.blocks[0]
        .inlines
        .insert(2, ssmlstudio::document::Inline::break_marker(BreakStrength::Weak));

    let segments = segment_block(&doc.blocks[0]);

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].voice.as_deref(), Some("A"));
    assert_eq!(segments[0].text, "one two<break strength=\"weak\"/>");
    assert_eq!(segments[1].voice.as_deref(), Some("B"));
    assert_eq!(segments[2].voice.as_deref(), Some("A"));
    assert_eq!(segments[2].text, "four");
}

#[test]
fn test_escapingThroughPipeline_shouldBeLossless() {
    let original = r#"Tom & Jerry say "5 < 6" & 'more >>'"#;
    let doc = doc_from_runs(vec![(original, Some(voice_attrs("V1")))]);

    let session = EditorSession::from_document("en-us", doc);
    let ssml = session.compile();

    assert!(SsmlValidator::validate(&ssml, None).is_valid());

    // Recover the text content between the voice tags and unescape it
    let start = ssml.find("<voice name=\"V1\">").unwrap() + "<voice name=\"V1\">".len();
    let end = ssml.find("</voice>").unwrap();
    assert_eq!(unescape_text(&ssml[start..end]), original);
}

#[test]
fn test_allNeutralDocument_shouldNeverEmitProsody() {
    let attrs = voice_attrs("V1");
    let doc = doc_from_runs(vec![
        ("first ", Some(attrs.clone())),
        ("second ", Some(attrs.clone())),
        ("third", Some(attrs)),
    ]);

    let session = EditorSession::from_document("en-us", doc);
    let ssml = session.compile();

    assert!(SsmlValidator::validate(&ssml, None).is_valid());
    assert!(!ssml.contains("<prosody"));
    assert!(ssml.contains("<voice name=\"V1\">first second third</voice>"));
}

#[test]
fn test_compileChecked_withHandBrokenDocumentText_shouldStillValidate() {
    // Markup-looking user text must be escaped, not interpreted
    let doc = doc_from_runs(vec![("</speak> <voice name=''>", Some(voice_attrs("V1")))]);
    let session = EditorSession::from_document("en-us", doc);

    let ssml = session.compile_checked().unwrap();

    assert!(ssml.contains("&lt;/speak&gt;"));
}
