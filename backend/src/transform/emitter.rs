//! Block-style YAML writer for the canonical document.
//!
//! Mock runtimes load these files with YAML 1.1 readers, which resolve far
//! more plain scalars than YAML 1.2 does: `yes`/`on` become booleans,
//! `12:30` a base-60 integer, `2001-12-14` a date, `1_000` an integer.
//! Every string that such a reader would not read back as the same string
//! is quoted.
//!
//! # Scalar styles
//!
//! - plain: ordinary text (`getOrder`, `http://api.test/x`, `$.id`)
//! - single-quoted: empty, leading/trailing spaces, leading indicator
//!   characters, `": "`/`" #"`, or implicitly typed (`'yes'`, `'12:30'`)
//! - double-quoted: control characters, line breaks included

use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::{Mapping, Value as YamlValue};
use std::borrow::Cow;
use std::fmt::Write as _;

use crate::models::{ApiTaste, CanonicalConfig, ExtractConfig};

/// Plain scalars a YAML 1.1 reader resolves to bool, null, int, float,
/// timestamp, merge or value.
static IMPLICIT_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:",
        // bool
        r"y|Y|n|N|yes|Yes|YES|no|No|NO|true|True|TRUE|false|False|FALSE|on|On|ON|off|Off|OFF",
        // null
        r"|~|null|Null|NULL",
        // int: binary, octal, decimal, hex, base 60
        r"|[-+]?0b[01_]+",
        r"|[-+]?0[0-7_]+",
        r"|[-+]?(?:0|[1-9][0-9_]*)",
        r"|[-+]?0x[0-9a-fA-F_]+",
        r"|[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+",
        // float
        r"|[-+]?(?:[0-9][0-9_]*)?\.[0-9_]*(?:[eE][-+]?[0-9]+)?",
        r"|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*",
        r"|[-+]?\.(?:inf|Inf|INF)",
        r"|\.(?:nan|NaN|NAN)",
        // timestamp
        r"|[0-9]{4}-[0-9]{2}-[0-9]{2}",
        r"|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt]|[ \t]+)[0-9]{1,2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::[0-9]{2})?))?",
        // merge, value
        r"|<<|=",
        r")$",
    ))
    .expect("implicit type pattern is valid")
});

/// Characters that cannot start a plain scalar.
const INDICATORS: &str = "-?:,[]{}#&*!|>'\"%@`";

/// Indentation step for nested mappings.
const INDENT: &str = "  ";

/// Render the document.
pub fn emit(config: &CanonicalConfig) -> String {
    let mut out = String::new();

    if config.api_taste.is_empty() {
        out.push_str("api_taste: []\n");
        return out;
    }

    out.push_str("api_taste:\n");
    for entry in &config.api_taste {
        emit_entry(&mut out, entry);
    }
    out
}

fn emit_entry(out: &mut String, entry: &ApiTaste) {
    // First key shares the line with the sequence dash
    let _ = writeln!(out, "- api_name: {}", scalar(&entry.api_name));
    let _ = writeln!(out, "{INDENT}method: {}", scalar(&entry.method));
    let _ = writeln!(out, "{INDENT}url: {}", scalar(&entry.url));
    let _ = writeln!(out, "{INDENT}status_code: {}", entry.status_code);
    let _ = writeln!(out, "{INDENT}repeat: {}", entry.repeat);

    if let Some(headers) = &entry.headers {
        emit_mapping(out, "headers", headers, 1);
    }
    if let Some(payload) = &entry.payload {
        let _ = writeln!(out, "{INDENT}payload: {}", scalar(payload));
    }
    if let Some(extract) = &entry.extract {
        emit_extract(out, extract);
    }
}

fn emit_extract(out: &mut String, extract: &ExtractConfig) {
    let _ = writeln!(out, "{INDENT}extract:");
    if let Some(header) = &extract.header {
        emit_mapping(out, "header", header, 2);
    }
    if let Some(body) = &extract.body {
        emit_mapping(out, "body", body, 2);
    }
}

/// Write `name:` at `depth`, then the string pairs of `mapping` one deeper.
fn emit_mapping(out: &mut String, name: &str, mapping: &Mapping, depth: usize) {
    let _ = writeln!(out, "{}{}:", INDENT.repeat(depth), name);
    let inner = INDENT.repeat(depth + 1);
    for (key, value) in mapping {
        let _ = writeln!(out, "{}{}: {}", inner, scalar(text(key)), scalar(text(value)));
    }
}

/// Mappings are only ever filled with strings by the builder.
fn text(value: &YamlValue) -> &str {
    value.as_str().unwrap_or_default()
}

/// Render a string scalar in the least quoted style that reads back as the
/// same string.
pub fn scalar(value: &str) -> Cow<'_, str> {
    if value.chars().any(needs_escape) {
        Cow::Owned(double_quoted(value))
    } else if needs_quotes(value) {
        Cow::Owned(format!("'{}'", value.replace('\'', "''")))
    } else {
        Cow::Borrowed(value)
    }
}

/// YAML 1.1 also breaks lines on U+2028/U+2029.
fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}

fn needs_quotes(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    // Leading/trailing whitespace
    if value.starts_with(' ') || value.ends_with(' ') {
        return true;
    }

    if value.starts_with(|c: char| INDICATORS.contains(c)) {
        return true;
    }

    // Mapping value or comment markers
    if value.contains(": ") || value.contains(" #") || value.ends_with(':') {
        return true;
    }

    IMPLICIT_TYPE_RE.is_match(value) || value.parse::<f64>().is_ok()
}

fn double_quoted(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');

    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\0' => quoted.push_str("\\0"),
            c if needs_escape(c) && (c as u32) <= 0xff => {
                let _ = write!(quoted, "\\x{:02X}", c as u32);
            }
            c if needs_escape(c) => {
                let _ = write!(quoted, "\\u{:04X}", c as u32);
            }
            c => quoted.push(c),
        }
    }

    quoted.push('"');
    quoted
}
