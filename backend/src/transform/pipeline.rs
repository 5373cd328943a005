//! High-level pipeline: validate, then transform.
//!
//! This is what the HTTP layer and the CLI call. It lifts untyped request
//! data, runs the validator, and only transforms when no error was found.
//!
//! # Example
//!
//! ```rust,ignore
//! use apitaste::generate;
//! use serde_json::json;
//!
//! let generated = generate(&json!({
//!     "service_name": "orders",
//!     "apis": [{ "name": "getOrder", "url": "http://api.test/x", "method": "GET" }]
//! }))?;
//! assert_eq!(generated.filename, "orders.yaml");
//! ```

use serde_json::Value;

use super::builder::{transform, GeneratedConfig};
use crate::error::{GenerateError, GenerateResult};
use crate::models::ServiceDescription;
use crate::validation::validate_description;

/// Validate `input` and, when it is acceptable, produce the YAML document.
///
/// Validation failures come back as [`GenerateError::Invalid`] holding every
/// message in order; transformation failures as [`GenerateError::Transform`].
pub fn generate(input: &Value) -> GenerateResult<GeneratedConfig> {
    let description = ServiceDescription::from_value(input);
    tracing::info!(
        service = description.name(),
        apis = description.apis.len(),
        "📝 Generating config"
    );

    let errors: Vec<String> = validate_description(&description)
        .iter()
        .map(|issue| issue.to_string())
        .collect();

    if !errors.is_empty() {
        tracing::warn!(count = errors.len(), "⚠️ Validation failed");
        for err in errors.iter().take(5) {
            tracing::info!("   {}", err);
        }
        return Err(GenerateError::Invalid(errors));
    }

    let generated = transform(&description).map_err(|e| {
        tracing::error!(error = %e, "❌ Error generating YAML");
        e
    })?;

    tracing::info!(
        filename = %generated.filename,
        bytes = generated.yaml_content.len(),
        "✅ Generated"
    );

    Ok(generated)
}
