/*!
 * Core document model for speech markup authoring.
 *
 * These types provide a rich, JSON-serializable representation of an
 * annotated prose document: a sequence of blocks, each holding inline
 * text runs with optional voice/prosody/pronunciation attributes and
 * zero-width break markers.
 */

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Neutral percentage value for rate, pitch, and volume
pub const UNMODIFIED_PERCENT: u32 = 100;

// SAPI pinyin pronunciation: one or more "syllable tone-digit" pairs, e.g. "xing 2"
static PRONUNCIATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]+ [1-5]( [A-Za-z]+ [1-5])*$").expect("Invalid pronunciation regex")
});

/// Pause strength for break markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BreakStrength {
    /// Shortest perceivable pause
    XWeak,
    /// Weak pause
    Weak,
    /// Sentence-level pause
    #[default]
    Medium,
    /// Paragraph-level pause
    Strong,
    /// Longest pause
    XStrong,
}

impl BreakStrength {
    /// The provider strength token as it appears in the break element
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XWeak => "x-weak",
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
            Self::XStrong => "x-strong",
        }
    }
}

impl fmt::Display for BreakStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BreakStrength {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "x-weak" => Ok(Self::XWeak),
            "weak" => Ok(Self::Weak),
            "medium" => Ok(Self::Medium),
            "strong" => Ok(Self::Strong),
            "x-strong" => Ok(Self::XStrong),
            _ => Err(anyhow!("Invalid break strength: {}", s)),
        }
    }
}

/// Per-span voice and prosody attributes
///
/// Rate, pitch, and volume are percentages centered at 100 (100 =
/// unmodified). Unknown keys are rejected at the deserialization
/// boundary rather than silently carried into compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpanAttributes {
    /// Provider voice identifier (short name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Human-facing name of the voice, resolved from the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_display_name: Option<String>,

    /// Speaking rate percentage
    #[serde(default = "default_percent")]
    pub rate: u32,

    /// Pitch percentage
    #[serde(default = "default_percent")]
    pub pitch: u32,

    /// Volume percentage
    #[serde(default = "default_percent")]
    pub volume: u32,

    /// Phonetic override in SAPI "syllable tone-digit" format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
}

fn default_percent() -> u32 {
    UNMODIFIED_PERCENT
}

impl Default for SpanAttributes {
    fn default() -> Self {
        Self {
            voice: None,
            voice_display_name: None,
            rate: UNMODIFIED_PERCENT,
            pitch: UNMODIFIED_PERCENT,
            volume: UNMODIFIED_PERCENT,
            pronunciation: None,
        }
    }
}

impl SpanAttributes {
    /// Create a fresh attribute set with all fields unmodified
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the voice identifier and its resolved display name
    pub fn with_voice(mut self, voice: impl Into<String>, display_name: Option<String>) -> Self {
        self.voice = Some(voice.into());
        self.voice_display_name = display_name;
        self
    }

    /// Set the speaking rate percentage
    pub fn with_rate(mut self, rate: u32) -> Self {
        self.rate = rate;
        self
    }

    /// Set the pitch percentage
    pub fn with_pitch(mut self, pitch: u32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Set the volume percentage
    pub fn with_volume(mut self, volume: u32) -> Self {
        self.volume = volume;
        self
    }

    /// Set the phonetic override
    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = Some(pronunciation.into());
        self
    }

    /// Check whether every field still carries its default value
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Check a phonetic string against the SAPI "syllable tone-digit" format
pub fn is_valid_pronunciation(value: &str) -> bool {
    PRONUNCIATION_REGEX.is_match(value)
}

/// A single inline node: a text run or a zero-width break marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    /// A run of text, optionally annotated
    Text {
        /// The run's text content
        text: String,
        /// Attributes, None for unmarked text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<Box<SpanAttributes>>,
    },
    /// A zero-width pause marker
    Break {
        /// Pause strength
        #[serde(default)]
        strength: BreakStrength,
    },
}

impl Inline {
    /// Create a plain text run
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into(), attrs: None }
    }

    /// Create an annotated text run
    pub fn marked_text(text: impl Into<String>, attrs: SpanAttributes) -> Self {
        Self::Text { text: text.into(), attrs: Some(Box::new(attrs)) }
    }

    /// Create a break marker
    pub fn break_marker(strength: BreakStrength) -> Self {
        Self::Break { strength }
    }

    /// Width of this node in document positions
    ///
    /// Text runs count one position per character; break markers are
    /// zero-width for speech but occupy one addressable position.
    pub fn width(&self) -> usize {
        match self {
            Self::Text { text, .. } => text.chars().count(),
            Self::Break { .. } => 1,
        }
    }

    /// Check whether this is a text run with no characters
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text { text, .. } if text.is_empty())
    }
}

/// Block-level default attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAttributes {
    /// Default voice for runs that carry none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Default rate percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<u32>,

    /// Default pitch percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<u32>,

    /// Default volume percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u32>,

    /// Marks the block the external preview feature reads from.
    /// Ignored by compilation.
    #[serde(default)]
    pub is_preview_source: bool,
}

/// A paragraph-like unit holding an ordered sequence of inline nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block-level default attributes
    #[serde(default)]
    pub attrs: BlockAttributes,

    /// Ordered inline children
    #[serde(default)]
    pub inlines: Vec<Inline>,
}

impl Block {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block holding a single plain text run
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { attrs: BlockAttributes::default(), inlines: vec![Inline::text(text)] }
    }

    /// Total width of the block in document positions
    pub fn width(&self) -> usize {
        self.inlines.iter().map(Inline::width).sum()
    }

    /// Check whether the block has no inline children
    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }
}

/// An ordered sequence of blocks
///
/// A document always contains at least one block; an empty document is
/// represented as one block with zero inline children. Constructors
/// enforce the invariant and mutations never remove the last block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DocumentData")]
pub struct Document {
    /// Ordered block nodes
    pub blocks: Vec<Block>,
}

/// Raw deserialization shape, normalized into the invariant-holding form
#[derive(Deserialize)]
struct DocumentData {
    #[serde(default)]
    blocks: Vec<Block>,
}

impl From<DocumentData> for Document {
    fn from(data: DocumentData) -> Self {
        Self::from_blocks(data.blocks)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document (one block, zero inlines)
    pub fn new() -> Self {
        Self { blocks: vec![Block::new()] }
    }

    /// Create a document from blocks, normalizing an empty list to one empty block
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            Self::new()
        } else {
            Self { blocks }
        }
    }

    /// Check whether no block carries any inline content
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }

    /// Number of blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
