//! Validation of submitted service descriptions.
//!
//! Validation accumulates: every field is checked and every failure is
//! reported, in a stable order, so the form can show all problems at once.
//!
//! # Order of checks
//!
//! 1. Service name
//! 2. Presence of at least one API
//! 3. For each API, prefixed with `API {n}: `:
//!    name, url, method, status code, repeat, payload, headers, extractors
//!
//! # Field checks
//!
//! Each field check is callable on its own and returns `Ok(())` or the
//! [`FieldError`] describing the failure:
//!
//! - [`validate_service_name`]
//! - [`validate_url`]
//! - [`validate_status_code`]
//! - [`validate_repeat`]
//! - [`validate_payload`] (may report two problems at once)
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use apitaste::validate;
//!
//! let errors = validate(&json!({ "service_name": "", "apis": [] }));
//! assert_eq!(errors, vec!["Service name is required", "At least one API is required"]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::FieldError;
use crate::models::{ApiDescription, ExtractorKind, HttpMethod, IntField, ServiceDescription};

/// Letters, digits, underscore and hyphen; the name becomes a filename.
static SERVICE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("service name pattern is valid"));

/// `http(s)://` + domain, `localhost` or dotted-quad IPv4, optional port,
/// optional path or query. Case-insensitive.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?",
        r"|localhost",
        r"|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("url pattern is valid")
});

/// Lowest accepted status code.
pub const MIN_STATUS_CODE: i64 = 100;

/// Highest accepted status code.
pub const MAX_STATUS_CODE: i64 = 599;

// =============================================================================
// Field checks
// =============================================================================

/// Check the service name: non-blank and filename-safe once trimmed.
pub fn validate_service_name(service_name: &str) -> Result<(), FieldError> {
    let name = service_name.trim();
    if name.is_empty() {
        return Err(FieldError::EmptyName);
    }
    if !SERVICE_NAME_RE.is_match(name) {
        return Err(FieldError::InvalidCharacters);
    }
    Ok(())
}

/// Check a mock endpoint URL.
pub fn validate_url(url: &str) -> Result<(), FieldError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FieldError::EmptyUrl);
    }
    if !URL_RE.is_match(url) {
        return Err(FieldError::MalformedUrl);
    }
    Ok(())
}

/// Check that the status code is an integer in `100..=599`.
pub fn validate_status_code(status_code: &IntField) -> Result<(), FieldError> {
    match status_code.as_int() {
        None => Err(FieldError::StatusNotANumber),
        Some(code) if (MIN_STATUS_CODE..=MAX_STATUS_CODE).contains(&code) => Ok(()),
        Some(_) => Err(FieldError::StatusOutOfRange),
    }
}

/// Check that the repeat count is an integer of at least 1.
pub fn validate_repeat(repeat: &IntField) -> Result<(), FieldError> {
    match repeat.as_int() {
        None => Err(FieldError::RepeatNotANumber),
        Some(count) if count >= 1 => Ok(()),
        Some(_) => Err(FieldError::RepeatTooSmall),
    }
}

/// Check a payload against the method it is sent with.
///
/// A blank payload always passes. The method is upper-cased before the
/// GET/DELETE check, even when it is not a valid method. A trimmed payload
/// starting with `{` or `[` must be valid JSON. Both problems are reported
/// when both apply.
pub fn validate_payload(payload: &str, method: &str) -> Result<(), Vec<FieldError>> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(());
    }

    let mut errors = Vec::new();

    let method = method.to_uppercase();
    if HttpMethod::parse(&method).is_some_and(|m| !m.accepts_payload()) {
        errors.push(FieldError::WrongMethodForPayload { method });
    }

    if payload.starts_with('{') || payload.starts_with('[') {
        if let Err(e) = serde_json::from_str::<Value>(payload) {
            errors.push(FieldError::InvalidJson { detail: e.to_string() });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Orchestration
// =============================================================================

/// A validation failure, optionally tied to an API by 0-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub api_index: Option<usize>,
    pub error: FieldError,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.api_index {
            Some(i) => write!(f, "API {}: {}", i + 1, self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Validate untyped request data and return every error message, in order.
///
/// An empty list means the description is acceptable.
pub fn validate(input: &Value) -> Vec<String> {
    let description = ServiceDescription::from_value(input);
    validate_description(&description)
        .into_iter()
        .map(|issue| issue.to_string())
        .collect()
}

/// Validate a lifted description, keeping issues structured.
pub fn validate_description(description: &ServiceDescription) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if let Err(error) = validate_service_name(&description.service_name) {
        issues.push(ValidationIssue { api_index: None, error });
    }

    if description.apis.is_empty() {
        issues.push(ValidationIssue {
            api_index: None,
            error: FieldError::MissingApis,
        });
    }

    for (i, api) in description.apis.iter().enumerate() {
        issues.extend(
            validate_api(api)
                .into_iter()
                .map(|error| ValidationIssue { api_index: Some(i), error }),
        );
    }

    issues
}

/// All failures for a single API, in field order.
fn validate_api(api: &ApiDescription) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if api.name.trim().is_empty() {
        errors.push(FieldError::EmptyApiName);
    }

    errors.extend(validate_url(&api.url).err());

    if HttpMethod::parse(&api.method).is_none() {
        errors.push(FieldError::InvalidMethod);
    }

    errors.extend(validate_status_code(&api.status_code).err());
    errors.extend(validate_repeat(&api.repeat).err());

    if let Err(payload_errors) = validate_payload(&api.payload, &api.method) {
        errors.extend(payload_errors);
    }

    for (j, header) in api.headers.iter().enumerate() {
        let index = j + 1;
        if header.key.trim().is_empty() {
            errors.push(FieldError::HeaderKeyRequired { index });
        }
        if header.value.trim().is_empty() {
            errors.push(FieldError::HeaderValueRequired { index });
        }
    }

    for (j, extractor) in api.extractors.iter().enumerate() {
        let index = j + 1;
        if extractor.key.trim().is_empty() {
            errors.push(FieldError::ExtractorKeyRequired { index });
        }
        if extractor.value.trim().is_empty() {
            errors.push(FieldError::ExtractorValueRequired { index });
        }
        if ExtractorKind::parse(&extractor.kind).is_none() {
            errors.push(FieldError::ExtractorInvalidType { index });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_api() -> Value {
        json!({
            "name": "getOrder",
            "url": "http://api.test/x",
            "method": "GET",
            "status_code": "200",
            "repeat": "1"
        })
    }

    #[test]
    fn test_service_name() {
        assert!(validate_service_name("orders-v2_beta").is_ok());
        assert!(validate_service_name("  orders  ").is_ok());
        assert_eq!(validate_service_name("   "), Err(FieldError::EmptyName));
        assert_eq!(validate_service_name("orders!"), Err(FieldError::InvalidCharacters));
        assert_eq!(validate_service_name("my service"), Err(FieldError::InvalidCharacters));
    }

    #[test]
    fn test_url_grammar() {
        for ok in [
            "http://api.test/x",
            "https://Example.COM",
            "http://localhost:8080/health",
            "http://127.0.0.1/",
            "https://sub.domain.example.org/path?q=1",
            "http://example.com?x=y",
        ] {
            assert!(validate_url(ok).is_ok(), "{ok} should be accepted");
        }
        assert_eq!(validate_url(""), Err(FieldError::EmptyUrl));
        for bad in [
            "ftp://example.com",
            "example.com",
            "http://",
            "http://example",
            "http://example.com/has space",
        ] {
            assert_eq!(validate_url(bad), Err(FieldError::MalformedUrl), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_status_code_bounds() {
        assert!(validate_status_code(&IntField(json!("100"))).is_ok());
        assert!(validate_status_code(&IntField(json!(599))).is_ok());
        assert_eq!(validate_status_code(&IntField(json!("99"))), Err(FieldError::StatusOutOfRange));
        assert_eq!(validate_status_code(&IntField(json!(600))), Err(FieldError::StatusOutOfRange));
        assert_eq!(validate_status_code(&IntField(json!("ok"))), Err(FieldError::StatusNotANumber));
    }

    #[test]
    fn test_repeat_bounds() {
        assert!(validate_repeat(&IntField(json!("3"))).is_ok());
        assert_eq!(validate_repeat(&IntField(json!(0))), Err(FieldError::RepeatTooSmall));
        assert_eq!(validate_repeat(&IntField(json!("-2"))), Err(FieldError::RepeatTooSmall));
        assert_eq!(validate_repeat(&IntField(json!("x"))), Err(FieldError::RepeatNotANumber));
    }

    #[test]
    fn test_payload_rules() {
        assert!(validate_payload("   ", "GET").is_ok());
        assert!(validate_payload(r#"{"id": 1}"#, "POST").is_ok());
        assert!(validate_payload("plain text", "PUT").is_ok());

        let errs = validate_payload("x", "delete").unwrap_err();
        assert_eq!(errs, vec![FieldError::WrongMethodForPayload { method: "DELETE".into() }]);

        let errs = validate_payload("[1, 2", "POST").unwrap_err();
        assert!(matches!(errs.as_slice(), [FieldError::InvalidJson { .. }]));
    }

    #[test]
    fn test_get_with_bad_json_reports_both() {
        let errs = validate_payload("{bad json", "GET").unwrap_err();
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[0].to_string(), "Payload is not typically used with GET method");
        assert!(errs[1].to_string().starts_with("Invalid JSON format: "));
    }

    #[test]
    fn test_unknown_method_still_checks_payload() {
        let mut api = valid_api();
        api["method"] = json!("FETCH");
        api["payload"] = json!("{bad json");

        let errors = validate(&json!({ "service_name": "s", "apis": [api.clone()] }));
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert_eq!(errors[0], "API 1: Invalid HTTP method");
        assert!(errors[1].starts_with("API 1: Invalid JSON format: "));

        api["payload"] = json!(r#"{"id": 1}"#);
        assert_eq!(
            validate(&json!({ "service_name": "s", "apis": [api] })),
            vec!["API 1: Invalid HTTP method"]
        );
    }

    #[test]
    fn test_overflowing_integers_are_range_checked() {
        let huge = "100000000000000000000";
        assert_eq!(validate_status_code(&IntField(json!(huge))), Err(FieldError::StatusOutOfRange));
        assert_eq!(
            validate_status_code(&IntField(json!(format!("-{huge}")))),
            Err(FieldError::StatusOutOfRange)
        );
        assert_eq!(validate_status_code(&IntField(json!(1e20))), Err(FieldError::StatusOutOfRange));
        assert_eq!(validate_status_code(&IntField(json!(u64::MAX))), Err(FieldError::StatusOutOfRange));

        assert!(validate_repeat(&IntField(json!(huge))).is_ok());
        assert_eq!(
            validate_repeat(&IntField(json!(format!("-{huge}")))),
            Err(FieldError::RepeatTooSmall)
        );
    }

    #[test]
    fn test_valid_description_has_no_errors() {
        let input = json!({ "service_name": "orders", "apis": [valid_api()] });
        assert!(validate(&input).is_empty());
    }

    #[test]
    fn test_missing_everything() {
        assert_eq!(
            validate(&json!({})),
            vec!["Service name is required", "At least one API is required"]
        );
        assert_eq!(
            validate(&json!(null)),
            vec!["Service name is required", "At least one API is required"]
        );
    }

    #[test]
    fn test_defaults_apply_only_when_absent() {
        let mut api = valid_api();
        api.as_object_mut().unwrap().remove("status_code");
        api.as_object_mut().unwrap().remove("repeat");
        assert!(validate(&json!({ "service_name": "s", "apis": [api] })).is_empty());

        let mut api = valid_api();
        api["status_code"] = Value::Null;
        assert_eq!(
            validate(&json!({ "service_name": "s", "apis": [api] })),
            vec!["API 1: Status code must be a valid number"]
        );
    }

    #[test]
    fn test_per_api_order_and_prefix() {
        let input = json!({
            "service_name": "bad name",
            "apis": [
                valid_api(),
                {
                    "name": " ",
                    "url": "nope",
                    "method": "get",
                    "status_code": "700",
                    "repeat": "0",
                    "payload": "{oops",
                    "headers": [{ "key": "", "value": "" }, { "key": "X-A", "value": "1" }],
                    "extractors": [{ "key": "", "value": "$.id", "type": "cookie" }]
                }
            ]
        });

        let errors = validate(&input);
        assert!(errors[7].starts_with("API 2: Invalid JSON format: "));
        let without_json_detail: Vec<&str> = errors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 7)
            .map(|(_, e)| e.as_str())
            .collect();
        assert_eq!(
            without_json_detail,
            vec![
                "Service name can only contain letters, numbers, underscores, and hyphens",
                "API 2: API name is required",
                "API 2: Please enter a valid URL (must start with http:// or https://)",
                "API 2: Invalid HTTP method",
                "API 2: Status code must be between 100 and 599",
                "API 2: Repeat count must be at least 1",
                "API 2: Payload is not typically used with GET method",
                "API 2: Header 1: Key is required",
                "API 2: Header 1: Value is required",
                "API 2: Extractor 1: Key is required",
                "API 2: Extractor 1: Type must be either 'header' or 'body'",
            ]
        );
    }

    #[test]
    fn test_single_name_error_for_symbols() {
        let input = json!({ "service_name": "a/b", "apis": [valid_api()] });
        let errors = validate(&input);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Service name"));
    }
}
