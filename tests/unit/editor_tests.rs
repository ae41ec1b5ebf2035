/*!
 * Tests for range-scoped attribute editing observed through the
 * compiled output.
 */

use ssmlstudio::document::{Block, BreakStrength, Document};
use ssmlstudio::editor::{DocPoint, DocRange, EditorSession};

fn session_with_text(locale: &str, text: &str) -> EditorSession {
    EditorSession::from_document(locale, Document::from_blocks(vec![Block::from_text(text)]))
}

#[test]
fn test_setVoice_onSubRange_shouldScopeVoiceElementToSelection() {
    let mut session = session_with_text("en-us", "plain voiced plain");

    session.set_voice(&DocRange::within_block(0, 6, 12), "en-US-AriaNeural").unwrap();

    let ssml = session.compile();

    assert!(ssml.contains("plain <voice name=\"en-US-AriaNeural\">voiced</voice> plain"));
}

#[test]
fn test_setRateThenClear_shouldRestoreOriginalOutput() {
    let mut session = session_with_text("en-us", "hello world");
    let range = DocRange::within_block(0, 0, 11);
    let original = session.compile();

    session.set_rate(&range, 150).unwrap();
    assert!(session.compile().contains("<prosody rate=\"+50%\">hello world</prosody>"));

    session.clear_attributes(&range).unwrap();
    assert_eq!(session.compile(), original);
}

#[test]
fn test_failedMutation_shouldLeaveCompiledOutputUnchanged() {
    let mut session = session_with_text("en-us", "hello");
    let before = session.compile();

    // Out-of-bounds range must not partially apply
    let result = session.set_rate(&DocRange::within_block(0, 2, 40), 120);

    assert!(result.is_err());
    assert_eq!(session.compile(), before);
}

#[test]
fn test_setPronunciation_shouldEmitPhonemeElement() {
    let mut session = session_with_text("zh-cn", "银行");

    session.set_pronunciation(&DocRange::within_block(0, 1, 2), "hang 2").unwrap();

    let ssml = session.compile();

    assert!(ssml.contains("银<phoneme alphabet=\"sapi\" ph=\"hang 2\">行</phoneme>"));
}

#[test]
fn test_insertAndRemoveBreak_shouldRoundTrip() {
    let mut session = session_with_text("en-us", "before after");
    let original = session.compile();

    session.insert_break(&DocPoint::new(0, 6), BreakStrength::Strong).unwrap();
    assert!(session.compile().contains("before<break strength=\"strong\"/> after"));

    let removed = session.remove_breaks(&DocRange::within_block(0, 0, 13)).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(session.compile(), original);
}

#[test]
fn test_setBreakStrength_shouldRewriteMarker() {
    let mut session = session_with_text("en-us", "ab");

    session.insert_break(&DocPoint::new(0, 1), BreakStrength::Weak).unwrap();
    session
        .set_break_strength(&DocRange::within_block(0, 0, 3), BreakStrength::XStrong)
        .unwrap();

    assert!(session.compile().contains("<break strength=\"x-strong\"/>"));
}

#[test]
fn test_overlappingMutations_shouldLayerAttributes() {
    let mut session = session_with_text("en-us", "abcdef");

    session.set_voice(&DocRange::within_block(0, 0, 6), "V1").unwrap();
    session.set_rate(&DocRange::within_block(0, 2, 4), 130).unwrap();

    let ssml = session.compile();

    // One voice element spans all three runs; only the middle has prosody
    assert_eq!(ssml.matches("<voice name=\"V1\">").count(), 1);
    assert!(ssml.contains("ab<prosody rate=\"+30%\">cd</prosody>ef"));
}

#[test]
fn test_mutationsAcrossBlocks_shouldCompileEachBlock() {
    let mut session = EditorSession::from_document(
        "en-us",
        Document::from_blocks(vec![Block::from_text("one"), Block::from_text("two")]),
    );

    session
        .set_voice(&DocRange::new(DocPoint::new(0, 0), DocPoint::new(1, 3)), "V1")
        .unwrap();

    let ssml = session.compile();

    assert!(ssml.contains("<voice name=\"V1\">one</voice><voice name=\"V1\">two</voice>"));
}
