//! Front-matter parsing

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::error::{Error, Result};

lazy_static! {
    /// Opening `---` at the very start, a lazily matched block, a closing
    /// `---` line, then everything else as the body.
    static ref FRONT_MATTER_RE: Regex =
        Regex::new(r"(?ms)\A---\s*$(.*?)^\s*---\s*$(.*)").expect("valid front-matter pattern");
}

/// Front-matter metadata of one source document
///
/// Keys keep the order they were written in, values are the usual
/// JSON-shaped union (null, bool, number, string, list, mapping).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, Value>);

impl Metadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace a field, keeping the position of an existing key
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// String value of a key, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Whether a key is present and exactly boolean `true`
    pub fn is_true(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(Value::Bool(true)))
    }

    /// Value of a key the caller cannot do without
    pub fn require(&self, key: &str, path: &Path) -> Result<&Value> {
        self.0.get(key).ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
            path: path.to_path_buf(),
        })
    }

    /// String value of a key the caller cannot do without
    pub fn require_str(&self, key: &str, path: &Path) -> Result<&str> {
        self.require(key, path)?
            .as_str()
            .ok_or_else(|| Error::InvalidValue {
                key: key.to_string(),
                path: path.to_path_buf(),
                message: "expected a string".to_string(),
            })
    }
}

/// Split a source document into its front matter and its body
///
/// Without a leading `---` block the text is returned unchanged. A block
/// that parses as a mapping is stripped and the body is trimmed. A block
/// that does not parse is logged and the *whole* text, delimiters
/// included, becomes the body.
pub fn parse_front_matter(text: &str) -> (Metadata, String) {
    let Some(caps) = FRONT_MATTER_RE.captures(text) else {
        return (Metadata::new(), text.to_string());
    };

    let block = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    match parse_yaml_block(block) {
        Ok(metadata) => (metadata, body.trim().to_string()),
        Err(e) => {
            tracing::warn!("Could not parse YAML front matter, keeping it as content: {}", e);
            (Metadata::new(), text.to_string())
        }
    }
}

fn parse_yaml_block(block: &str) -> std::result::Result<Metadata, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(block).map_err(|e| e.to_string())?;

    match value {
        serde_yaml::Value::Null => Ok(Metadata::new()),
        serde_yaml::Value::Mapping(_) => serde_yaml::from_value::<IndexMap<String, Value>>(value)
            .map(Metadata)
            .map_err(|e| e.to_string()),
        _ => Err("front matter is not a key/value mapping".to_string()),
    }
}
