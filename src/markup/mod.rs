/*!
 * Markup generation for speech synthesis.
 *
 * This module turns the annotated document model into a single SSML
 * string. It is split into several submodules:
 *
 * - `escape`: XML entity escaping for text content
 * - `segmenter`: partitions a block into maximal same-attribute runs
 * - `compiler`: renders segmented blocks into the final SSML document
 */

// Re-export main types for easier usage
pub use self::compiler::compile;
pub use self::escape::{escape_text, unescape_text};
pub use self::segmenter::{Prosody, Segment, segment_block};

// Submodules
pub mod compiler;
pub mod escape;
pub mod segmenter;

/// Namespace of the synthesis markup root element
pub const SYNTHESIS_NAMESPACE: &str = "http://www.w3.org/2001/10/synthesis";

/// Namespace of the provider markup extensions
pub const MSTTS_NAMESPACE: &str = "https://www.w3.org/2001/mstts";

/// Markup version declared on the root element
pub const SSML_VERSION: &str = "1.0";
