//! Error types for the api_taste generation pipeline.
//!
//! - [`FieldError`] - One user-correctable validation failure
//! - [`TransformError`] - Unexpected failures while building the YAML document
//! - [`GenerateError`] - Top-level validate + transform errors
//! - [`FileError`] - CLI file reading and writing errors
//! - [`ServerError`] - HTTP server errors
//!
//! Validation never stops at the first [`FieldError`]: the validator renders
//! each one to its message and keeps going, so callers see the whole list.

use thiserror::Error;

// =============================================================================
// Field Validation Errors
// =============================================================================

/// A single field-level validation failure.
///
/// The `Display` output is the exact message shown to the person filling in
/// the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Service name is blank.
    #[error("Service name is required")]
    EmptyName,

    /// Service name contains something other than `[A-Za-z0-9_-]`.
    #[error("Service name can only contain letters, numbers, underscores, and hyphens")]
    InvalidCharacters,

    /// The description holds no API at all.
    #[error("At least one API is required")]
    MissingApis,

    /// API name is blank.
    #[error("API name is required")]
    EmptyApiName,

    /// URL is blank.
    #[error("URL is required")]
    EmptyUrl,

    /// URL does not match the accepted grammar.
    #[error("Please enter a valid URL (must start with http:// or https://)")]
    MalformedUrl,

    /// Method is not one of the seven supported verbs.
    #[error("Invalid HTTP method")]
    InvalidMethod,

    /// Status code is not an integer.
    #[error("Status code must be a valid number")]
    StatusNotANumber,

    /// Status code is outside `100..=599`.
    #[error("Status code must be between 100 and 599")]
    StatusOutOfRange,

    /// Repeat count is not an integer.
    #[error("Repeat count must be a valid number")]
    RepeatNotANumber,

    /// Repeat count is below 1.
    #[error("Repeat count must be at least 1")]
    RepeatTooSmall,

    /// A payload was given for a GET or DELETE request.
    #[error("Payload is not typically used with {method} method")]
    WrongMethodForPayload { method: String },

    /// Payload looks like JSON but does not parse.
    #[error("Invalid JSON format: {detail}")]
    InvalidJson { detail: String },

    /// Header key is blank (1-based index).
    #[error("Header {index}: Key is required")]
    HeaderKeyRequired { index: usize },

    /// Header value is blank (1-based index).
    #[error("Header {index}: Value is required")]
    HeaderValueRequired { index: usize },

    /// Extractor key is blank (1-based index).
    #[error("Extractor {index}: Key is required")]
    ExtractorKeyRequired { index: usize },

    /// Extractor value is blank (1-based index).
    #[error("Extractor {index}: Value is required")]
    ExtractorValueRequired { index: usize },

    /// Extractor type is neither `header` nor `body` (1-based index).
    #[error("Extractor {index}: Type must be either 'header' or 'body'")]
    ExtractorInvalidType { index: usize },
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors raised while turning a description into the canonical document.
///
/// These only occur when the transformer is handed input the validator
/// would have rejected.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A field that must be an integer could not be coerced.
    #[error("invalid literal for integer field '{field}': {value}")]
    NotAnInteger { field: &'static str, value: String },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Errors returned by [`crate::transform::pipeline::generate`].
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The description failed validation; holds every message in order.
    #[error("{} validation error(s): {}", .0.len(), .0.join("; "))]
    Invalid(Vec<String>),

    /// Transformation failed after validation passed.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

// =============================================================================
// File Errors
// =============================================================================

/// Errors reading descriptions from or writing documents to disk.
#[derive(Debug, Error)]
pub enum FileError {
    /// Failed to read or write a file.
    #[error("File IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON.
    #[error("Invalid JSON in description file: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding or serving failed.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid listen address.
    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),

    /// A configuration value cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for pipeline operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
