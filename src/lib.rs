//! mdpress: a small static site builder
//!
//! Markdown pages with YAML front matter are turned into one JSON page
//! document per page, and every page document is then rendered into HTML
//! through a flat `${placeholder}` template selected by its layout.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod templates;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// Relative-root prefix used for pages at the top of the tree
pub const ROOT_PREFIX: &str = "./";

/// Parent-reference token appended to the prefix for every directory level
pub const PARENT_PREFIX: &str = "../";

/// The main site handle
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown source pages
    pub pages_dir: PathBuf,
    /// Working directory for JSON page documents
    pub json_dir: PathBuf,
    /// Layout templates
    pub template_dir: PathBuf,
    /// Rendered HTML output
    pub output_dir: PathBuf,
    /// Static directories copied verbatim into the output
    pub static_dirs: Vec<PathBuf>,
}

impl Site {
    /// Create a new site from a base directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(config::CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let pages_dir = base_dir.join(&config.pages_dir);
        let json_dir = base_dir.join(&config.json_dir);
        let template_dir = base_dir.join(&config.template_dir);
        let output_dir = base_dir.join(&config.output_dir);
        let static_dirs = config.static_dirs.iter().map(|d| base_dir.join(d)).collect();

        Self {
            config,
            base_dir,
            pages_dir,
            json_dir,
            template_dir,
            output_dir,
            static_dirs,
        }
    }

    /// Bootstrap the source layout
    pub fn init(&self) -> anyhow::Result<()> {
        commands::init::run(self)
    }

    /// Run the whole pipeline: generate, render, copy assets
    pub fn build(&self) -> anyhow::Result<()> {
        commands::build::run(self)
    }

    /// Remove the output and the JSON working directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}
