//! Flat `${placeholder}` layout templates
//!
//! A template is plain text with `${name}` (or `$name`) placeholders that are
//! replaced by the matching page document field. There are no conditionals,
//! loops or nested lookups; `$$` yields a literal `$`.

mod renderer;

pub use renderer::{RenderStats, SiteRenderer};

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(
        r"\$(?:(?P<escaped>\$)|\{(?P<braced>[_a-zA-Z][_a-zA-Z0-9]*)\}|(?P<named>[_a-zA-Z][_a-zA-Z0-9]*))"
    )
    .expect("valid placeholder pattern");
}

/// Template substitution errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("missing key '{0}'")]
    MissingKey(String),
}

/// A loaded layout template
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Replace every placeholder with its field from `fields`
    ///
    /// Strings are inserted verbatim and `null` as nothing; any other value
    /// is written as JSON text (`true`, `3`, `["a","b"]`). The first
    /// placeholder without a field aborts the substitution.
    pub fn substitute(&self, fields: &IndexMap<String, Value>) -> Result<String, TemplateError> {
        let mut output = String::with_capacity(self.source.len());
        let mut last = 0;

        for caps in PLACEHOLDER_RE.captures_iter(&self.source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            output.push_str(&self.source[last..whole.start()]);
            last = whole.end();

            if caps.name("escaped").is_some() {
                output.push('$');
                continue;
            }

            let key = caps
                .name("braced")
                .or_else(|| caps.name("named"))
                .map_or("", |m| m.as_str());
            let value = fields
                .get(key)
                .ok_or_else(|| TemplateError::MissingKey(key.to_string()))?;
            output.push_str(&value_to_text(value));
        }

        output.push_str(&self.source[last..]);
        Ok(output)
    }
}

/// Text inserted for a field value
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
