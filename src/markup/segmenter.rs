/*!
 * Run segmentation for block compilation.
 *
 * Walks a block's inline children in order and partitions them into
 * maximal runs sharing identical resolved (voice, prosody) attributes.
 * Break markers render inline into the current run's text and never
 * force a flush on their own; grouping is decided by text runs only.
 */

use log::debug;

use super::escape::escape_text;
use crate::document::{Block, BlockAttributes, BreakStrength, Inline, SpanAttributes, UNMODIFIED_PERCENT};

/// The rate/pitch/volume triple controlling speech delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prosody {
    /// Speaking rate percentage
    pub rate: u32,
    /// Pitch percentage
    pub pitch: u32,
    /// Volume percentage
    pub volume: u32,
}

impl Prosody {
    /// A prosody with every field at the neutral 100%
    pub fn unmodified() -> Self {
        Self {
            rate: UNMODIFIED_PERCENT,
            pitch: UNMODIFIED_PERCENT,
            volume: UNMODIFIED_PERCENT,
        }
    }

    /// Check whether no field deviates from 100%
    pub fn is_unmodified(&self) -> bool {
        self.rate == UNMODIFIED_PERCENT
            && self.pitch == UNMODIFIED_PERCENT
            && self.volume == UNMODIFIED_PERCENT
    }
}

impl Default for Prosody {
    fn default() -> Self {
        Self::unmodified()
    }
}

/// A maximal run of contiguous inline content sharing one attribute set
///
/// Derived and transient: the text already carries escaped characters
/// plus any embedded phoneme and break markup, ready for direct
/// inclusion in the compiled output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Resolved voice identifier, None when neither run nor block names one
    pub voice: Option<String>,
    /// Pre-escaped text with embedded inline markup
    pub text: String,
    /// Resolved prosody for the run
    pub prosody: Prosody,
}

/// Resolve the voice that applies to a text run
fn effective_voice(attrs: Option<&SpanAttributes>, block: &BlockAttributes) -> Option<String> {
    attrs
        .and_then(|a| a.voice.clone())
        .or_else(|| block.voice.clone())
}

/// Resolve the prosody that applies to a text run
///
/// A run value of exactly 100 means "unmodified" and defers to the
/// block default; anything else overrides it.
fn effective_prosody(attrs: Option<&SpanAttributes>, block: &BlockAttributes) -> Prosody {
    let pick = |run: Option<u32>, block_default: Option<u32>| -> u32 {
        match run {
            Some(v) if v != UNMODIFIED_PERCENT => v,
            _ => block_default.unwrap_or(UNMODIFIED_PERCENT),
        }
    };

    Prosody {
        rate: pick(attrs.map(|a| a.rate), block.rate),
        pitch: pick(attrs.map(|a| a.pitch), block.pitch),
        volume: pick(attrs.map(|a| a.volume), block.volume),
    }
}

/// Render a break marker as a self-closing element
fn render_break(strength: BreakStrength) -> String {
    format!("<break strength=\"{}\"/>", strength.as_str())
}

/// Wrap escaped run text in a phoneme annotation
fn render_phoneme(escaped_text: &str, pronunciation: &str) -> String {
    format!(
        "<phoneme alphabet=\"sapi\" ph=\"{}\">{}</phoneme>",
        escape_text(pronunciation),
        escaped_text
    )
}

/// Partition a block into maximal same-attribute segments
///
/// Returns an empty list for a block with no inline children. Adjacent
/// runs with identical resolved attributes merge into one segment even
/// when break markers sit between them; a run whose attributes differ
/// from the accumulator's flushes the accumulated segment first.
pub fn segment_block(block: &Block) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut current_voice: Option<String> = None;
    let mut current_prosody = Prosody::unmodified();
    let mut current_text = String::new();

    for inline in &block.inlines {
        match inline {
            Inline::Text { text, attrs } => {
                let attrs = attrs.as_deref();
                let voice = effective_voice(attrs, &block.attrs);
                let prosody = effective_prosody(attrs, &block.attrs);

                if (voice != current_voice || prosody != current_prosody) && !current_text.is_empty()
                {
                    segments.push(Segment {
                        voice: current_voice.clone(),
                        text: std::mem::take(&mut current_text),
                        prosody: current_prosody,
                    });
                }
                current_voice = voice;
                current_prosody = prosody;

                let mut escaped = escape_text(text);
                if let Some(pronunciation) =
                    attrs.and_then(|a| a.pronunciation.as_deref()).filter(|p| !p.is_empty())
                {
                    escaped = render_phoneme(&escaped, pronunciation);
                }
                current_text.push_str(&escaped);
            }
            // Breaks render in place and are inert with respect to grouping
            Inline::Break { strength } => {
                current_text.push_str(&render_break(*strength));
            }
        }
    }

    if !current_text.is_empty() {
        segments.push(Segment {
            voice: current_voice,
            text: current_text,
            prosody: current_prosody,
        });
    }

    debug!("Segmented block into {} run(s)", segments.len());
    segments
}
