/*!
 * Error types for the ssmlstudio library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when fetching the provider voice catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Error when issuing the voice-list request fails
    #[error("Voice list request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing the voice-list response body fails
    #[error("Failed to parse voice list response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("Voice list API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors raised at the document mutation boundary
///
/// These cover the malformed-input family: a mutation is rejected as a
/// whole before any part of the range is touched.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A range does not resolve to valid positions in the document
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// An attribute value is outside its accepted shape
    #[error("Invalid value for {name}: {value}")]
    InvalidAttributeValue {
        /// Attribute name (voice, rate, pitch, volume, pronunciation)
        name: &'static str,
        /// The rejected value
        value: String
    },

    /// A pronunciation string does not follow the "syllable tone-digit" format
    #[error("Malformed pronunciation string: {0}")]
    MalformedPronunciation(String),

    /// No break marker exists in the targeted range
    #[error("No break marker in range: {0}")]
    NoBreakInRange(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the voice catalog
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error from a document mutation
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// The compiled markup failed the validation gate
    #[error("Markup validation failed: {0}")]
    Validation(String),

    /// Error from the persistent store
    #[error("Storage error: {0}")]
    Storage(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Storage(error.to_string())
    }
}
