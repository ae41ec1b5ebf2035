/*!
 * # ssmlstudio
 *
 * A Rust library for authoring speech-synthesis markup: a structured
 * document model annotated with voice, prosody, and pronunciation
 * attributes is deterministically compiled into a single well-formed
 * SSML string for a cloud voice-synthesis API.
 *
 * ## Features
 *
 * - Annotated document model with per-span attributes and break markers
 * - Run segmentation merging adjacent identical-attribute spans
 * - Deterministic SSML compilation with minimal prosody wrappers
 * - Purpose-built markup validation (structure, nesting order, balance)
 * - Voice catalog caching with TTL, offline fallback, and persistence
 * - Range-scoped, atomic attribute mutations for the editing surface
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: The annotated document model
 * - `markup`: Run segmentation and SSML compilation:
 *   - `markup::segmenter`: Block-to-segment partitioning
 *   - `markup::compiler`: Markup rendering
 *   - `markup::escape`: XML entity escaping
 * - `validation`: Markup validation (tokenizer + ordered checks)
 * - `catalog`: Provider voice catalog client and TTL cache
 * - `editor`: Range-scoped mutations and the editing session
 * - `storage`: Persistent key/value store (SQLite-backed)
 * - `locale_utils`: Locale code utilities
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod catalog;
pub mod document;
pub mod editor;
pub mod errors;
pub mod locale_utils;
pub mod markup;
pub mod storage;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use catalog::{VoiceCatalogEntry, VoiceCatalogService};
pub use document::{Block, BreakStrength, Document, Inline, SpanAttributes};
pub use editor::{DocPoint, DocRange, EditorSession};
pub use errors::{AppError, CatalogError, DocumentError};
pub use markup::{Segment, compile, segment_block};
pub use validation::{SsmlValidator, ValidationReport};
