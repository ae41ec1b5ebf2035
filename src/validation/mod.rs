/*!
 * Validation for compiled speech markup.
 *
 * This module gate-checks a candidate SSML string before network
 * submission:
 * - root structure and required namespace/attributes
 * - legal nesting order (`<voice>` wraps `<prosody>`, never the reverse)
 * - balanced tags via an explicit tokenizer and stack machine
 * - soft (warn-only) reporting of unknown voice names
 *
 * It is a purpose-built linter for the subset of markup the compiler
 * emits plus hand-authored input from the same editing surface; it is
 * not a general XML conformance checker.
 *
 * # Architecture
 *
 * - `tokenizer`: scans tags into Open/Close/SelfClosing tokens and
 *   runs the stack-based balance check
 * - `service`: orchestrates the ordered, short-circuiting checks
 */

pub mod service;
pub mod tokenizer;

// Re-export main types
pub use service::{SsmlValidator, ValidationReport};
pub use tokenizer::TagToken;
