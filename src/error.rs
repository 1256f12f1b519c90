//! Error types for the build pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning source pages into page documents and HTML
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem I/O error
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A page document could not be read or written as JSON
    #[error("JSON error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A YAML file (other than front matter) could not be parsed
    #[error("YAML error at {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Front matter lacks a key the current component depends on
    #[error("missing front-matter key '{key}' in {path:?}")]
    MissingKey { key: String, path: PathBuf },

    /// Front matter holds a key with an unusable value
    #[error("invalid value for '{key}' in {path:?}: {message}")]
    InvalidValue {
        key: String,
        path: PathBuf,
        message: String,
    },
}

/// Convenience alias used by the library modules
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON error with the path it happened on
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
