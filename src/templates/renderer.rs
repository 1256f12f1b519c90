//! Site renderer - turns the JSON page documents into HTML pages

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Template;
use crate::content::list_dir;
use crate::error::{Error, Result};
use crate::{Site, PARENT_PREFIX, ROOT_PREFIX};

/// Counters reported after a render run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub rendered: usize,
    pub skipped: usize,
}

/// Renders page documents through their layout templates
pub struct SiteRenderer {
    template_dir: PathBuf,
    default_layout: String,
    /// Loaded templates by file name, `None` when the file does not exist
    templates: HashMap<String, Option<Template>>,
}

impl SiteRenderer {
    /// Create a renderer from the site settings
    pub fn new(site: &Site) -> Self {
        Self {
            template_dir: site.template_dir.clone(),
            default_layout: site.config.default_layout.clone(),
            templates: HashMap::new(),
        }
    }

    /// Render every page document under `json_dir` into `output_dir`
    ///
    /// Missing template or data directories are reported and nothing is
    /// rendered. A page that cannot be rendered is skipped with a warning.
    pub fn render(&mut self, json_dir: &Path, output_dir: &Path) -> Result<RenderStats> {
        let mut stats = RenderStats::default();

        if !self.template_dir.is_dir() {
            tracing::error!("Template directory not found: {:?}", self.template_dir);
            return Ok(stats);
        }
        if !json_dir.is_dir() {
            tracing::error!("JSON data directory not found: {:?}", json_dir);
            return Ok(stats);
        }

        tracing::info!("Rendering site from JSON data in {:?}", json_dir);
        self.render_dir(json_dir, output_dir, ROOT_PREFIX, &mut stats)?;
        Ok(stats)
    }

    fn render_dir(
        &mut self,
        json_dir: &Path,
        output_dir: &Path,
        ref_prefix: &str,
        stats: &mut RenderStats,
    ) -> Result<()> {
        fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

        for entry in list_dir(json_dir)? {
            let path = entry.path();

            if entry.file_type().is_dir() {
                tracing::debug!("Subdirectory found: {:?}", path);
                let child_prefix = format!("{}{}", ref_prefix, PARENT_PREFIX);
                self.render_dir(path, &output_dir.join(entry.file_name()), &child_prefix, stats)?;
                continue;
            }

            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            match self.render_page(path, ref_prefix)? {
                Some(html) => {
                    let output_path = html_path_for(output_dir, path);
                    fs::write(&output_path, html).map_err(|e| Error::io(&output_path, e))?;
                    stats.rendered += 1;
                    tracing::debug!("Rendered {:?} -> {:?}", path, output_path);
                }
                None => stats.skipped += 1,
            }
        }

        Ok(())
    }

    /// Render one page document, `Ok(None)` when the page has to be skipped
    pub fn render_page(&mut self, json_path: &Path, ref_prefix: &str) -> Result<Option<String>> {
        let raw = fs::read_to_string(json_path).map_err(|e| Error::io(json_path, e))?;
        let mut fields: IndexMap<String, Value> = match serde_json::from_str(&raw) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!("Invalid page data in {:?}: {}. Skipping.", json_path, e);
                return Ok(None);
            }
        };

        let layout = match fields.get("layout") {
            Some(Value::String(layout)) => layout.clone(),
            Some(other) => other.to_string(),
            None => self.default_layout.clone(),
        };
        let template_name = format!("{}.html", layout);

        let Some(template) = self.template(&template_name)? else {
            tracing::warn!(
                "Template '{}' not found for {:?}. Skipping.",
                template_name,
                json_path
            );
            return Ok(None);
        };

        fields
            .entry("title".to_string())
            .or_insert_with(|| Value::String("Untitled".to_string()));
        fields
            .entry("page_markdown".to_string())
            .or_insert_with(|| Value::String(String::new()));
        fields.insert("ref_prefix".to_string(), Value::String(ref_prefix.to_string()));

        match template.substitute(&fields) {
            Ok(html) => Ok(Some(html)),
            Err(e) => {
                tracing::warn!("Cannot render {:?}: {}. Skipping.", json_path, e);
                Ok(None)
            }
        }
    }

    /// Load a template once per run
    fn template(&mut self, name: &str) -> Result<Option<&Template>> {
        if !self.templates.contains_key(name) {
            let path = self.template_dir.join(name);
            let template = match fs::read_to_string(&path) {
                Ok(source) => Some(Template::new(source)),
                Err(e) if e.kind() == ErrorKind::NotFound => None,
                Err(e) => return Err(Error::io(path, e)),
            };
            self.templates.insert(name.to_string(), template);
        }

        Ok(self.templates.get(name).and_then(Option::as_ref))
    }
}

/// `<output_dir>/<stem>.html` for a page document
fn html_path_for(output_dir: &Path, json_path: &Path) -> PathBuf {
    let mut name = json_path.file_stem().unwrap_or_default().to_os_string();
    name.push(".html");
    output_dir.join(name)
}
