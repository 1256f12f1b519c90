//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Name of the configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub pages_dir: String,
    pub json_dir: String,
    pub template_dir: String,
    pub output_dir: String,
    #[serde(default)]
    pub static_dirs: Vec<String>,

    // Rendering
    pub default_layout: String,
    pub json_indent: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            pages_dir: "_data/pages".to_string(),
            json_dir: "_data/working/page_json".to_string(),
            template_dir: "_data/assets/templates".to_string(),
            output_dir: "docs".to_string(),
            static_dirs: vec![
                "_data/assets/css".to_string(),
                "_data/assets/scripts".to_string(),
                "_data/pages/images".to_string(),
            ],

            default_layout: "page".to_string(),
            json_indent: 4,
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        // An empty file is a valid "all defaults" configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SiteConfig = serde_yaml::from_str(&content).map_err(|e| Error::Yaml {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

/// Syntax highlighting for fenced code blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}
