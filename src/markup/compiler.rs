/*!
 * SSML document compilation.
 *
 * Renders a segmented document into a single markup string: one root
 * element, one `<voice>` element per contiguous same-voice group, and
 * a `<prosody>` wrapper only around segments whose rate, pitch, or
 * volume deviates from the neutral 100%.
 */

use log::debug;

use super::escape::escape_text;
use super::segmenter::{Prosody, Segment, segment_block};
use super::{MSTTS_NAMESPACE, SSML_VERSION, SYNTHESIS_NAMESPACE};
use crate::document::{Document, UNMODIFIED_PERCENT};

/// Compile a document into a complete SSML string
///
/// Pure and deterministic: identical input yields identical output.
/// The locale is lower-cased into the root `xml:lang` attribute. A
/// document holding only empty blocks produces an empty-bodied but
/// structurally valid root element.
pub fn compile(document: &Document, locale: &str) -> String {
    let lang = locale.trim().to_lowercase();

    let mut ssml = format!(
        "<speak version=\"{}\" xmlns=\"{}\" xmlns:mstts=\"{}\" xml:lang=\"{}\">",
        SSML_VERSION, SYNTHESIS_NAMESPACE, MSTTS_NAMESPACE, lang
    );

    for block in &document.blocks {
        let segments = segment_block(block);
        render_voice_groups(&mut ssml, &segments);
    }

    ssml.push_str("</speak>");

    debug!("Compiled document ({} blocks) into {} bytes of markup", document.block_count(), ssml.len());
    ssml
}

/// Render a block's segments grouped into contiguous same-voice runs
fn render_voice_groups(out: &mut String, segments: &[Segment]) {
    let mut group: Vec<&Segment> = Vec::new();
    let mut group_voice: Option<&str> = None;

    for segment in segments {
        let voice = segment.voice.as_deref();
        if !group.is_empty() && voice != group_voice {
            render_group(out, group_voice, &group);
            group.clear();
        }
        group_voice = voice;
        group.push(segment);
    }

    if !group.is_empty() {
        render_group(out, group_voice, &group);
    }
}

/// Render one voice-group, wrapping it in a `<voice>` element when a
/// voice is resolved and emitting its content bare otherwise
fn render_group(out: &mut String, voice: Option<&str>, group: &[&Segment]) {
    match voice {
        Some(name) => {
            out.push_str(&format!("<voice name=\"{}\">", escape_text(name)));
            for segment in group {
                render_segment(out, segment);
            }
            out.push_str("</voice>");
        }
        None => {
            for segment in group {
                render_segment(out, segment);
            }
        }
    }
}

/// Render a single segment, adding a prosody wrapper only when needed
fn render_segment(out: &mut String, segment: &Segment) {
    let attrs = prosody_attributes(&segment.prosody);
    if attrs.is_empty() {
        out.push_str(&segment.text);
    } else {
        out.push_str(&format!("<prosody {}>{}</prosody>", attrs.join(" "), segment.text));
    }
}

/// Render the prosody attributes that deviate from 100%
///
/// Rate and pitch use the signed relative percentage convention;
/// volume is an absolute percentage clamped to 0-100.
fn prosody_attributes(prosody: &Prosody) -> Vec<String> {
    let mut attrs = Vec::new();

    if prosody.rate != UNMODIFIED_PERCENT {
        attrs.push(format!("rate=\"{}\"", format_relative_percent(prosody.rate)));
    }
    if prosody.pitch != UNMODIFIED_PERCENT {
        attrs.push(format!("pitch=\"{}\"", format_relative_percent(prosody.pitch)));
    }
    if prosody.volume != UNMODIFIED_PERCENT {
        attrs.push(format!("volume=\"{}%\"", prosody.volume.min(100)));
    }

    attrs
}

/// Format a percentage centered at 100 as a signed relative percentage
fn format_relative_percent(value: u32) -> String {
    if value > UNMODIFIED_PERCENT {
        format!("+{}%", value - UNMODIFIED_PERCENT)
    } else {
        format!("-{}%", UNMODIFIED_PERCENT - value)
    }
}
