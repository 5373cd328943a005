//! REST API types for the form client.
//!
//! The form posts JSON and only inspects `success`, so every reply of
//! `/generate_yaml` is a 200 with one of two shapes:
//!
//! ```text
//! { "success": false, "errors": ["API 1: URL is required", ...] }
//! { "success": true,  "yaml_content": "api_taste:\n...", "filename": "orders.yaml" }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::GenerateError;
use crate::transform::GeneratedConfig;

/// Message returned when the request carries no usable data.
pub const NO_DATA_RECEIVED: &str = "No data received";

/// Response of `POST /generate_yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaml_content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl GenerateResponse {
    /// A failed generation carrying the messages to show.
    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
            yaml_content: None,
            filename: None,
        }
    }
}

impl From<GeneratedConfig> for GenerateResponse {
    fn from(generated: GeneratedConfig) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            yaml_content: Some(generated.yaml_content),
            filename: Some(generated.filename),
        }
    }
}

/// Validation errors pass through; anything else becomes a single
/// `Server error: ...` message.
impl From<GenerateError> for GenerateResponse {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Invalid(errors) => Self::failure(errors),
            GenerateError::Transform(e) => Self::failure(vec![format!("Server error: {}", e)]),
        }
    }
}

/// Body of `POST /download_yaml`: a previously generated document echoed back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownloadRequest {
    #[serde(default)]
    pub yaml_content: String,

    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    GeneratedConfig::DEFAULT_FILENAME.to_string()
}

/// Whether a parsed body counts as "no data": `null`, `false`, `0`, `""`,
/// `[]` or `{}`.
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Create an error response for the download endpoint
pub fn error_response(error: &str) -> Value {
    json!({
        "success": false,
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;

    #[test]
    fn test_success_shape() {
        let response = GenerateResponse::from(GeneratedConfig {
            yaml_content: "api_taste: []\n".into(),
            filename: "orders.yaml".into(),
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "success": true, "yaml_content": "api_taste: []\n", "filename": "orders.yaml" })
        );
    }

    #[test]
    fn test_transform_failure_is_server_error() {
        let err = GenerateError::Transform(TransformError::NotAnInteger {
            field: "repeat",
            value: "x".into(),
        });
        let response = GenerateResponse::from(err);
        assert!(!response.success);
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].starts_with("Server error: "));
    }

    #[test]
    fn test_empty_payloads() {
        for v in [json!(null), json!({}), json!([]), json!(""), json!(0), json!(false)] {
            assert!(is_empty_payload(&v), "{v} should count as empty");
        }
        assert!(!is_empty_payload(&json!({ "service_name": "x" })));
        assert!(!is_empty_payload(&json!([1])));
    }

    #[test]
    fn test_download_request_defaults() {
        let req: DownloadRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.yaml_content, "");
        assert_eq!(req.filename, "service.yaml");
    }
}
