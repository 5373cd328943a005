//! Build the canonical `api_taste` document from a description.
//!
//! # Output Format
//!
//! ```yaml
//! api_taste:
//! - api_name: getOrder
//!   method: GET
//!   url: http://api.test/orders
//!   status_code: 200
//!   repeat: 1
//!   headers:
//!     X-Trace: abc
//!   extract:
//!     body:
//!       token: $.id
//! ```
//!
//! - `headers`, `payload` and `extract` are OMITTED when there is nothing
//!   to put in them; so are the `header`/`body` sub-maps of `extract`.
//! - Keys keep insertion order. A repeated header or extractor key keeps its
//!   first position and takes the last value.
//! - Strings a YAML 1.1 reader would type (`yes`, `on`, `12:30`) are quoted;
//!   see [`super::emitter`].

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};

use super::emitter;
use crate::error::{TransformError, TransformResult};
use crate::models::{
    ApiDescription, ApiTaste, CanonicalConfig, ExtractConfig, ExtractorKind, IntField,
    ServiceDescription,
};

/// A serialized configuration ready for download.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedConfig {
    pub yaml_content: String,
    pub filename: String,
}

impl GeneratedConfig {
    /// Extension of generated files.
    pub const EXTENSION: &'static str = "yaml";

    /// MIME type used when the file is downloaded.
    pub const MIME_TYPE: &'static str = "application/x-yaml";

    /// Filename used when a download request names none.
    pub const DEFAULT_FILENAME: &'static str = "service.yaml";

    /// `{service_name}.yaml`
    pub fn filename_for(service_name: &str) -> String {
        format!("{}.{}", service_name.trim(), Self::EXTENSION)
    }
}

/// Transform a description into YAML text plus its suggested filename.
///
/// The description is expected to have passed validation; integer fields
/// that do not coerce are reported as [`TransformError::NotAnInteger`].
pub fn transform(description: &ServiceDescription) -> TransformResult<GeneratedConfig> {
    let config = build_config(description)?;
    let yaml_content = to_yaml(&config);

    Ok(GeneratedConfig {
        yaml_content,
        filename: GeneratedConfig::filename_for(description.name()),
    })
}

/// Build the in-memory canonical document.
pub fn build_config(description: &ServiceDescription) -> TransformResult<CanonicalConfig> {
    let api_taste = description
        .apis
        .iter()
        .map(build_entry)
        .collect::<TransformResult<Vec<_>>>()?;

    Ok(CanonicalConfig { api_taste })
}

/// Serialize the document as block-style YAML.
pub fn to_yaml(config: &CanonicalConfig) -> String {
    emitter::emit(config)
}

fn build_entry(api: &ApiDescription) -> TransformResult<ApiTaste> {
    let headers = ordered_pairs(api.headers.iter().map(|h| (h.key.as_str(), h.value.as_str())));

    let payload = Some(api.payload.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    Ok(ApiTaste {
        api_name: api.name.trim().to_string(),
        method: api.method.clone(),
        url: api.url.trim().to_string(),
        status_code: coerce(&api.status_code, "status_code")?,
        repeat: coerce(&api.repeat, "repeat")?,
        headers,
        payload,
        extract: build_extract(api),
    })
}

fn build_extract(api: &ApiDescription) -> Option<ExtractConfig> {
    let of_kind = |kind: ExtractorKind| {
        ordered_pairs(
            api.extractors
                .iter()
                .filter(move |e| ExtractorKind::parse(&e.kind) == Some(kind))
                .map(|e| (e.key.as_str(), e.value.as_str())),
        )
    };

    let extract = ExtractConfig {
        header: of_kind(ExtractorKind::Header),
        body: of_kind(ExtractorKind::Body),
    };

    if extract.header.is_none() && extract.body.is_none() {
        None
    } else {
        Some(extract)
    }
}

/// Collect trimmed pairs whose key and value are both non-blank.
/// `None` when no pair qualifies.
fn ordered_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Option<Mapping> {
    let mut mapping = Mapping::new();
    for (key, value) in pairs {
        let (key, value) = (key.trim(), value.trim());
        if !key.is_empty() && !value.is_empty() {
            mapping.insert(YamlValue::from(key), YamlValue::from(value));
        }
    }
    (!mapping.is_empty()).then_some(mapping)
}

fn coerce(field: &IntField, name: &'static str) -> TransformResult<i64> {
    field.as_int().ok_or_else(|| TransformError::NotAnInteger {
        field: name,
        value: field.raw(),
    })
}
