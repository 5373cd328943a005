//! # API Taste - mock API description validation and YAML generation
//!
//! API Taste turns a form-submitted description of mock HTTP endpoints into
//! an `api_taste` YAML configuration for a mock server runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Form JSON  │────▶│  Validator  │────▶│ Transformer │────▶│  YAML file  │
//! │  (untyped)  │     │ (all errors)│     │ (canonical) │     │ {name}.yaml │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apitaste::{generate, validate};
//! use serde_json::json;
//!
//! let input = json!({
//!     "service_name": "orders",
//!     "apis": [{ "name": "getOrder", "url": "http://api.test/x", "method": "GET" }]
//! });
//! assert!(validate(&input).is_empty());
//! let generated = generate(&input).unwrap();
//! println!("{}:\n{}", generated.filename, generated.yaml_content);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Description and canonical document models
//! - [`validation`] - Field checks and accumulate-all validation
//! - [`transform`] - Canonical document builder and pipeline
//! - [`config`] - Server configuration
//! - [`files`] - CLI file input/output
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Configuration
pub mod config;

// CLI file handling
pub mod files;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{FieldError, FileError, GenerateError, ServerError, TransformError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ApiDescription, ApiTaste, CanonicalConfig, ExtractConfig, Extractor, ExtractorKind,
    HttpMethod, IntField, KeyValue, ServiceDescription,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{
    validate, validate_description, validate_payload, validate_repeat, validate_service_name,
    validate_status_code, validate_url, ValidationIssue,
};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{build_config, generate, to_yaml, transform, GeneratedConfig};

// =============================================================================
// Re-exports - Config & API
// =============================================================================

pub use config::ServerConfig;

pub use api::types::{DownloadRequest, GenerateResponse};

// Server
pub mod server {
    pub use crate::api::server::{create_app, start_server};
}
