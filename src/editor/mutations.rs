/*!
 * Range-scoped attribute and break mutations.
 *
 * Mutations rebuild the affected blocks: runs are split at the range
 * boundaries, the attribute change is applied to the pieces inside the
 * range, and adjacent runs that end up with identical attributes are
 * coalesced back together — the same attribute identity the segmenter
 * groups by. Values and ranges are validated before anything changes.
 */

use log::debug;

use super::range::{BlockSpan, DocPoint, DocRange};
use crate::document::{
    Block, BreakStrength, Document, Inline, SpanAttributes, is_valid_pronunciation,
};
use crate::errors::DocumentError;

/// Upper bound for rate and pitch percentages (+200% relative)
const MAX_RELATIVE_PERCENT: u32 = 300;

/// Upper bound for the absolute volume percentage
const MAX_VOLUME_PERCENT: u32 = 100;

/// Apply a voice to every text run in the range
pub fn set_voice(
    doc: &mut Document,
    range: &DocRange,
    voice_id: &str,
    display_name: Option<String>,
) -> Result<(), DocumentError> {
    if voice_id.trim().is_empty() {
        return Err(DocumentError::InvalidAttributeValue {
            name: "voice",
            value: voice_id.to_string(),
        });
    }

    map_attrs_in_range(doc, range, |attrs| {
        let mut updated = attrs.cloned().unwrap_or_default();
        updated.voice = Some(voice_id.to_string());
        updated.voice_display_name = display_name.clone();
        Some(updated)
    })
}

/// Apply a speaking rate to every text run in the range
pub fn set_rate(doc: &mut Document, range: &DocRange, rate: u32) -> Result<(), DocumentError> {
    check_percent("rate", rate, MAX_RELATIVE_PERCENT)?;
    map_attrs_in_range(doc, range, |attrs| {
        let mut updated = attrs.cloned().unwrap_or_default();
        updated.rate = rate;
        Some(updated)
    })
}

/// Apply a pitch to every text run in the range
pub fn set_pitch(doc: &mut Document, range: &DocRange, pitch: u32) -> Result<(), DocumentError> {
    check_percent("pitch", pitch, MAX_RELATIVE_PERCENT)?;
    map_attrs_in_range(doc, range, |attrs| {
        let mut updated = attrs.cloned().unwrap_or_default();
        updated.pitch = pitch;
        Some(updated)
    })
}

/// Apply a volume to every text run in the range
pub fn set_volume(doc: &mut Document, range: &DocRange, volume: u32) -> Result<(), DocumentError> {
    check_percent("volume", volume, MAX_VOLUME_PERCENT)?;
    map_attrs_in_range(doc, range, |attrs| {
        let mut updated = attrs.cloned().unwrap_or_default();
        updated.volume = volume;
        Some(updated)
    })
}

/// Apply a phonetic override to every text run in the range
pub fn set_pronunciation(
    doc: &mut Document,
    range: &DocRange,
    pronunciation: &str,
) -> Result<(), DocumentError> {
    if !is_valid_pronunciation(pronunciation) {
        return Err(DocumentError::MalformedPronunciation(pronunciation.to_string()));
    }

    map_attrs_in_range(doc, range, |attrs| {
        let mut updated = attrs.cloned().unwrap_or_default();
        updated.pronunciation = Some(pronunciation.to_string());
        Some(updated)
    })
}

/// Remove all span attributes from the range
pub fn clear_attributes(doc: &mut Document, range: &DocRange) -> Result<(), DocumentError> {
    map_attrs_in_range(doc, range, |_| None)
}

/// Insert a break marker at a position
pub fn insert_break(
    doc: &mut Document,
    point: &DocPoint,
    strength: BreakStrength,
) -> Result<(), DocumentError> {
    point.validate(doc)?;

    let block = &mut doc.blocks[point.block];
    let mut rebuilt: Vec<Inline> = Vec::with_capacity(block.inlines.len() + 2);
    let mut pos = 0usize;
    let mut inserted = false;

    for inline in block.inlines.drain(..) {
        let width = inline.width();

        if !inserted && point.offset == pos {
            rebuilt.push(Inline::break_marker(strength));
            inserted = true;
        }

        if !inserted && point.offset < pos + width {
            // Strictly inside this inline; only a text run can be split
            match inline {
                Inline::Text { text, attrs } => {
                    let local = point.offset - pos;
                    let (before, after) = split_text_at(&text, local);
                    rebuilt.push(Inline::Text { text: before, attrs: attrs.clone() });
                    rebuilt.push(Inline::break_marker(strength));
                    rebuilt.push(Inline::Text { text: after, attrs });
                    inserted = true;
                }
                marker => rebuilt.push(marker),
            }
            pos += width;
            continue;
        }

        pos += width;
        rebuilt.push(inline);
    }

    if !inserted {
        // Validated offset equals the block width
        rebuilt.push(Inline::break_marker(strength));
    }

    block.inlines = coalesce(rebuilt);
    debug!("Inserted {} break at {:?}", strength, point);
    Ok(())
}

/// Update the strength of every break marker in the range
///
/// # Returns
/// * The number of markers updated; `NoBreakInRange` when none exist
pub fn set_break_strength(
    doc: &mut Document,
    range: &DocRange,
    strength: BreakStrength,
) -> Result<usize, DocumentError> {
    mutate_breaks_in_range(doc, range, |marker_strength| {
        *marker_strength = strength;
        true
    })
}

/// Remove every break marker in the range
///
/// # Returns
/// * The number of markers removed; `NoBreakInRange` when none exist
pub fn remove_breaks(doc: &mut Document, range: &DocRange) -> Result<usize, DocumentError> {
    mutate_breaks_in_range(doc, range, |_| false)
}

/// Check a percentage value at the mutation boundary
fn check_percent(name: &'static str, value: u32, max: u32) -> Result<(), DocumentError> {
    if value > max {
        return Err(DocumentError::InvalidAttributeValue { name, value: value.to_string() });
    }
    Ok(())
}

/// Apply an attribute transform to the text runs of a validated range
///
/// The transform receives the run's current attributes and returns the
/// replacement; a replacement equal to the all-default attribute set
/// normalizes to unmarked text.
fn map_attrs_in_range(
    doc: &mut Document,
    range: &DocRange,
    f: impl Fn(Option<&SpanAttributes>) -> Option<SpanAttributes>,
) -> Result<(), DocumentError> {
    range.validate(doc)?;

    for span in range.block_spans(doc) {
        map_attrs_in_block(&mut doc.blocks[span.block], &span, &f);
    }
    Ok(())
}

/// Rebuild one block, transforming the runs inside the span
fn map_attrs_in_block(
    block: &mut Block,
    span: &BlockSpan,
    f: &impl Fn(Option<&SpanAttributes>) -> Option<SpanAttributes>,
) {
    let mut rebuilt: Vec<Inline> = Vec::with_capacity(block.inlines.len() + 2);
    let mut pos = 0usize;

    for inline in block.inlines.drain(..) {
        let width = inline.width();
        let inline_start = pos;
        let inline_end = pos + width;
        pos = inline_end;

        let (text, attrs) = match inline {
            Inline::Text { text, attrs } => (text, attrs),
            // Attributes never apply to break markers
            marker => {
                rebuilt.push(marker);
                continue;
            }
        };

        let sel_start = span.start.clamp(inline_start, inline_end);
        let sel_end = span.end.clamp(inline_start, inline_end);
        if sel_start >= sel_end {
            rebuilt.push(Inline::Text { text, attrs });
            continue;
        }

        let (before, rest) = split_text_at(&text, sel_start - inline_start);
        let (middle, after) = split_text_at(&rest, sel_end - sel_start);

        if !before.is_empty() {
            rebuilt.push(Inline::Text { text: before, attrs: attrs.clone() });
        }
        let new_attrs = f(attrs.as_deref()).filter(|a| !a.is_plain()).map(Box::new);
        rebuilt.push(Inline::Text { text: middle, attrs: new_attrs });
        if !after.is_empty() {
            rebuilt.push(Inline::Text { text: after, attrs });
        }
    }

    block.inlines = coalesce(rebuilt);
}

/// Update or drop the break markers of a validated range
///
/// The closure mutates a marker's strength and returns whether the
/// marker is kept. Fails without touching the document when the range
/// holds no marker.
fn mutate_breaks_in_range(
    doc: &mut Document,
    range: &DocRange,
    f: impl Fn(&mut BreakStrength) -> bool,
) -> Result<usize, DocumentError> {
    range.validate(doc)?;

    let spans = range.block_spans(doc);

    let break_count: usize = spans
        .iter()
        .map(|span| {
            let mut pos = 0usize;
            doc.blocks[span.block]
                .inlines
                .iter()
                .filter(|inline| {
                    let at = pos;
                    pos += inline.width();
                    matches!(inline, Inline::Break { .. }) && at >= span.start && at < span.end
                })
                .count()
        })
        .sum();

    if break_count == 0 {
        return Err(DocumentError::NoBreakInRange(format!("{:?}", range)));
    }

    for span in &spans {
        let block = &mut doc.blocks[span.block];
        let mut rebuilt: Vec<Inline> = Vec::with_capacity(block.inlines.len());
        let mut pos = 0usize;

        for mut inline in block.inlines.drain(..) {
            let at = pos;
            pos += inline.width();

            if let Inline::Break { strength } = &mut inline {
                if at >= span.start && at < span.end && !f(strength) {
                    continue;
                }
            }
            rebuilt.push(inline);
        }

        block.inlines = coalesce(rebuilt);
    }

    debug!("Touched {} break marker(s) in {:?}", break_count, range);
    Ok(break_count)
}

/// Split a string at a character index
fn split_text_at(text: &str, index: usize) -> (String, String) {
    let byte_index = text
        .char_indices()
        .nth(index)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    (text[..byte_index].to_string(), text[byte_index..].to_string())
}

/// Merge adjacent text runs with identical attributes and drop empty runs
fn coalesce(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(inlines.len());

    for inline in inlines {
        if inline.is_empty_text() {
            continue;
        }

        if let (
            Some(Inline::Text { text: prev_text, attrs: prev_attrs }),
            Inline::Text { text, attrs },
        ) = (out.last_mut(), &inline)
        {
            if prev_attrs == attrs {
                prev_text.push_str(text);
                continue;
            }
        }

        out.push(inline);
    }

    out
}
