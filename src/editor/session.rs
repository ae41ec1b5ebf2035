/*!
 * Editing session lifecycle.
 *
 * An [`EditorSession`] is the explicitly constructed object the editing
 * surface talks to: it owns the document, holds a reference to the
 * shared voice catalog, and exposes the mutation API plus the
 * compile-then-validate gate. There is no global session state;
 * independent sessions can coexist.
 */

use std::sync::Arc;

use log::{debug, info};
use uuid::Uuid;

use super::mutations;
use super::range::{DocPoint, DocRange};
use crate::app_config::SpeechConfig;
use crate::catalog::VoiceCatalogService;
use crate::document::{BreakStrength, Document, UNMODIFIED_PERCENT};
use crate::errors::{AppError, DocumentError};
use crate::markup;
use crate::validation::SsmlValidator;

/// One editing session over one document
pub struct EditorSession {
    /// Session identifier for log correlation
    id: Uuid,
    /// Locale compiled into the markup root
    locale: String,
    /// The session's document
    document: Document,
    /// Shared voice catalog, used to resolve display names and to
    /// flag unknown voices during validation
    catalog: Option<Arc<VoiceCatalogService>>,
}

impl EditorSession {
    /// Create a session over a fresh empty document
    pub fn new(locale: impl Into<String>) -> Self {
        Self::from_document(locale, Document::new())
    }

    /// Create a session over an existing document
    pub fn from_document(locale: impl Into<String>, document: Document) -> Self {
        let id = Uuid::new_v4();
        let locale = locale.into();
        info!("Created editing session {} ({})", &id.to_string()[..8], locale);
        Self { id, locale, document, catalog: None }
    }

    /// Create a session seeded with the user's configured defaults
    ///
    /// The configured voice and prosody become block-level defaults of
    /// the initial block, so unmarked text speaks with them.
    pub fn from_config(config: &SpeechConfig) -> Self {
        let mut document = Document::new();
        let attrs = &mut document.blocks[0].attrs;
        if !config.default_voice.is_empty() {
            attrs.voice = Some(config.default_voice.clone());
        }
        if config.default_rate != UNMODIFIED_PERCENT {
            attrs.rate = Some(config.default_rate);
        }
        if config.default_pitch != UNMODIFIED_PERCENT {
            attrs.pitch = Some(config.default_pitch);
        }
        if config.default_volume != UNMODIFIED_PERCENT {
            attrs.volume = Some(config.default_volume);
        }

        Self::from_document(config.default_locale.clone(), document)
    }

    /// Attach the shared voice catalog
    pub fn with_catalog(mut self, catalog: Arc<VoiceCatalogService>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// The session identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The locale compiled into the markup root
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Change the session locale
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// The session's document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the session, yielding its document
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Replace the session's document wholesale
    pub fn replace_document(&mut self, document: Document) {
        debug!("Session {}: document replaced", &self.id.to_string()[..8]);
        self.document = document;
    }

    /// Apply a voice to a range, resolving its display name from the catalog
    pub fn set_voice(&mut self, range: &DocRange, voice_id: &str) -> Result<(), DocumentError> {
        let display_name = self
            .catalog
            .as_ref()
            .and_then(|catalog| catalog.display_name_for(voice_id));
        mutations::set_voice(&mut self.document, range, voice_id, display_name)
    }

    /// Apply a speaking rate to a range
    pub fn set_rate(&mut self, range: &DocRange, rate: u32) -> Result<(), DocumentError> {
        mutations::set_rate(&mut self.document, range, rate)
    }

    /// Apply a pitch to a range
    pub fn set_pitch(&mut self, range: &DocRange, pitch: u32) -> Result<(), DocumentError> {
        mutations::set_pitch(&mut self.document, range, pitch)
    }

    /// Apply a volume to a range
    pub fn set_volume(&mut self, range: &DocRange, volume: u32) -> Result<(), DocumentError> {
        mutations::set_volume(&mut self.document, range, volume)
    }

    /// Apply a phonetic override to a range
    pub fn set_pronunciation(
        &mut self,
        range: &DocRange,
        pronunciation: &str,
    ) -> Result<(), DocumentError> {
        mutations::set_pronunciation(&mut self.document, range, pronunciation)
    }

    /// Remove all span attributes from a range
    pub fn clear_attributes(&mut self, range: &DocRange) -> Result<(), DocumentError> {
        mutations::clear_attributes(&mut self.document, range)
    }

    /// Insert a break marker at a position
    pub fn insert_break(
        &mut self,
        point: &DocPoint,
        strength: BreakStrength,
    ) -> Result<(), DocumentError> {
        mutations::insert_break(&mut self.document, point, strength)
    }

    /// Update the strength of the break markers in a range
    pub fn set_break_strength(
        &mut self,
        range: &DocRange,
        strength: BreakStrength,
    ) -> Result<usize, DocumentError> {
        mutations::set_break_strength(&mut self.document, range, strength)
    }

    /// Remove the break markers in a range
    pub fn remove_breaks(&mut self, range: &DocRange) -> Result<usize, DocumentError> {
        mutations::remove_breaks(&mut self.document, range)
    }

    /// Mark one block as the preview source, clearing the flag elsewhere
    pub fn mark_preview_block(&mut self, index: usize) -> Result<(), DocumentError> {
        if index >= self.document.block_count() {
            return Err(DocumentError::InvalidRange(format!(
                "block index {} out of bounds ({} blocks)",
                index,
                self.document.block_count()
            )));
        }

        for (i, block) in self.document.blocks.iter_mut().enumerate() {
            block.attrs.is_preview_source = i == index;
        }
        Ok(())
    }

    /// Clear the preview-source flag from every block
    pub fn clear_preview_blocks(&mut self) {
        for block in &mut self.document.blocks {
            block.attrs.is_preview_source = false;
        }
    }

    /// Compile the current document into markup
    pub fn compile(&self) -> String {
        markup::compile(&self.document, &self.locale)
    }

    /// Compile and gate-check the current document
    ///
    /// The validator sees the cached catalog (when one is attached) so
    /// unknown voice names are warned about before submission. A hard
    /// validation failure surfaces as [`AppError::Validation`].
    pub fn compile_checked(&self) -> Result<String, AppError> {
        let ssml = self.compile();

        let known_voices = self.catalog.as_ref().and_then(|c| c.cached_entries());
        let report = SsmlValidator::validate(&ssml, known_voices.as_deref());

        if report.valid {
            Ok(ssml)
        } else {
            let message = report.message.unwrap_or_else(|| "invalid markup".to_string());
            debug!("Session {}: validation failed: {}", &self.id.to_string()[..8], message);
            Err(AppError::Validation(message))
        }
    }
}
