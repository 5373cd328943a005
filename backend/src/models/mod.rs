//! Domain models for the api_taste generator.
//!
//! Two families of types live here:
//!
//! - The *description* submitted by the form: [`ServiceDescription`],
//!   [`ApiDescription`], [`KeyValue`], [`Extractor`]. These deserialize
//!   leniently from any JSON value: missing fields take defaults, wrongly
//!   typed text fields read as blank and non-array lists read as empty, so
//!   the validator can report problems instead of failing to parse.
//! - The *canonical document* written to YAML: [`CanonicalConfig`],
//!   [`ApiTaste`], [`ExtractConfig`].
//!
//! Plus the two closed vocabularies, [`HttpMethod`] and [`ExtractorKind`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_yaml::Mapping;
use std::num::IntErrorKind;

// =============================================================================
// HTTP Method
// =============================================================================

/// HTTP verbs a mock API may use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Every supported method, in form order.
    pub const ALL: [HttpMethod; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Head,
        Self::Options,
    ];

    /// Parse an upper-case method name. Matching is exact: `get` is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// The wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether a request body is expected with this method.
    pub fn accepts_payload(&self) -> bool {
        !matches!(self, Self::Get | Self::Delete)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Extractor Kind
// =============================================================================

/// Where an extractor reads its value from in a mock response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    Header,
    Body,
}

impl ExtractorKind {
    /// Parse `header` or `body`, exactly.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "header" => Some(Self::Header),
            "body" => Some(Self::Body),
            _ => None,
        }
    }
}

// =============================================================================
// Integer Fields
// =============================================================================

/// An integer-valued form field (`status_code`, `repeat`).
///
/// The form posts these as strings, API clients may post numbers; the raw
/// JSON value is kept and coerced on demand with [`IntField::as_int`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct IntField(pub Value);

impl IntField {
    /// Wrap a textual default such as `"200"`.
    pub fn text(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }

    /// Coerce to an integer.
    ///
    /// Integers pass through, finite floats truncate toward zero, booleans
    /// read as 0/1 and strings are trimmed then parsed in base 10. Anything
    /// else, `null` included, is not a number.
    ///
    /// Values beyond the `i64` range saturate to `i64::MIN`/`i64::MAX`, so
    /// they still fail range checks instead of reading as non-numbers.
    pub fn as_int(&self) -> Option<i64> {
        match &self.0 {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::String(s) => match s.trim().parse::<i64>() {
                Ok(n) => Some(n),
                Err(e) => match e.kind() {
                    IntErrorKind::PosOverflow => Some(i64::MAX),
                    IntErrorKind::NegOverflow => Some(i64::MIN),
                    _ => None,
                },
            },
            _ => None,
        }
    }

    /// Display form of the raw value, for error messages.
    pub fn raw(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

fn default_status_code() -> IntField {
    IntField::text("200")
}

fn default_repeat() -> IntField {
    IntField::text("1")
}

// =============================================================================
// Service Description (input)
// =============================================================================

/// A named service and the mock APIs it declares.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceDescription {
    #[serde(default, deserialize_with = "lenient_string")]
    pub service_name: String,

    #[serde(default, deserialize_with = "lenient_list")]
    pub apis: Vec<ApiDescription>,
}

impl ServiceDescription {
    /// Lift untyped request data into a description.
    ///
    /// Never fails: a non-object input yields an empty description, which
    /// the validator then reports as missing a name and APIs.
    pub fn from_value(value: &Value) -> Self {
        lift(value.clone())
    }

    /// The trimmed service name.
    pub fn name(&self) -> &str {
        self.service_name.trim()
    }
}

/// One mock endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiDescription {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,

    /// Raw method string; may be invalid until validated.
    #[serde(default, deserialize_with = "lenient_string")]
    pub method: String,

    #[serde(default = "default_status_code")]
    pub status_code: IntField,

    #[serde(default = "default_repeat")]
    pub repeat: IntField,

    /// Response payload; blank means none.
    #[serde(default, deserialize_with = "lenient_string")]
    pub payload: String,

    #[serde(default, deserialize_with = "lenient_list")]
    pub headers: Vec<KeyValue>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub extractors: Vec<Extractor>,
}

impl Default for ApiDescription {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            method: String::new(),
            status_code: default_status_code(),
            repeat: default_repeat(),
            payload: String::new(),
            headers: Vec::new(),
            extractors: Vec::new(),
        }
    }
}

/// A response header pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyValue {
    #[serde(default, deserialize_with = "lenient_string")]
    pub key: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
}

/// A rule naming a value to pull out of a mock response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Extractor {
    #[serde(default, deserialize_with = "lenient_string")]
    pub key: String,

    /// JSONPath-like expression or header name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,

    /// `header` or `body`; kept raw so invalid kinds can be reported.
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
}

// =============================================================================
// Canonical Config (output)
// =============================================================================

/// The document written to `{service_name}.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CanonicalConfig {
    pub api_taste: Vec<ApiTaste>,
}

/// One entry of `api_taste`, keys in the order they are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiTaste {
    pub api_name: String,
    pub method: String,
    pub url: String,
    pub status_code: i64,
    pub repeat: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Mapping>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<ExtractConfig>,
}

/// Extractor rules grouped by where they read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Mapping>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Mapping>,
}

// =============================================================================
// Lenient deserialization helpers
// =============================================================================

fn lift<T: DeserializeOwned + Default>(value: Value) -> T {
    if value.is_object() {
        serde_json::from_value(value).unwrap_or_default()
    } else {
        T::default()
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(lift).collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parse_is_exact() {
        assert_eq!(HttpMethod::parse("PATCH"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::parse("patch"), None);
        assert_eq!(HttpMethod::parse("TRACE"), None);
        assert!(!HttpMethod::Get.accepts_payload());
        assert!(!HttpMethod::Delete.accepts_payload());
        assert!(HttpMethod::Post.accepts_payload());
    }

    #[test]
    fn test_int_coercion() {
        assert_eq!(IntField(json!("200")).as_int(), Some(200));
        assert_eq!(IntField(json!(" 42 ")).as_int(), Some(42));
        assert_eq!(IntField(json!(404)).as_int(), Some(404));
        assert_eq!(IntField(json!(3.9)).as_int(), Some(3));
        assert_eq!(IntField(json!(true)).as_int(), Some(1));
        assert_eq!(IntField(json!("2.5")).as_int(), None);
        assert_eq!(IntField(json!("abc")).as_int(), None);
        assert_eq!(IntField(Value::Null).as_int(), None);
        assert_eq!(IntField(json!("100000000000000000000")).as_int(), Some(i64::MAX));
        assert_eq!(IntField(json!("-100000000000000000000")).as_int(), Some(i64::MIN));
        assert_eq!(IntField(json!(u64::MAX)).as_int(), Some(i64::MAX));
        assert_eq!(IntField(json!(-1e30)).as_int(), Some(i64::MIN));
    }

    #[test]
    fn test_lenient_lift() {
        let desc = ServiceDescription::from_value(&json!({
            "service_name": 12,
            "apis": [
                "not an object",
                { "name": "a", "headers": "nope", "status_code": null }
            ]
        }));
        assert_eq!(desc.service_name, "");
        assert_eq!(desc.apis.len(), 2);
        assert_eq!(desc.apis[0], ApiDescription::default());
        assert!(desc.apis[1].headers.is_empty());
        assert_eq!(desc.apis[1].status_code, IntField(Value::Null));
        assert_eq!(desc.apis[1].repeat.as_int(), Some(1));
    }

    #[test]
    fn test_non_object_input_is_empty() {
        assert_eq!(ServiceDescription::from_value(&json!([1, 2])), ServiceDescription::default());
    }
}
