//! Per-directory navigation menu

use serde_json::Value;
use std::cmp::Ordering;
use std::path::Path;

use super::{markdown_files, read_document};
use crate::error::{Error, Result};

/// Sort key of a navigation entry, taken from `navorder`
#[derive(Debug, Clone, PartialEq)]
pub enum NavOrder {
    Number(f64),
    Text(String),
}

impl NavOrder {
    fn from_value(value: &Value, path: &Path) -> Result<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(NavOrder::Number),
            Value::String(s) => Some(NavOrder::Text(s.clone())),
            _ => None,
        }
        .ok_or_else(|| Error::InvalidValue {
            key: "navorder".to_string(),
            path: path.to_path_buf(),
            message: format!("expected a number or a string, found {}", value),
        })
    }

    fn same_kind(&self, other: &NavOrder) -> bool {
        matches!(
            (self, other),
            (NavOrder::Number(_), NavOrder::Number(_)) | (NavOrder::Text(_), NavOrder::Text(_))
        )
    }

    fn cmp_same_kind(&self, other: &NavOrder) -> Ordering {
        match (self, other) {
            (NavOrder::Number(a), NavOrder::Number(b)) => a.total_cmp(b),
            (NavOrder::Text(a), NavOrder::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// One entry of the navigation menu
#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    /// Output file relative to the directory, e.g. `about.html`
    pub html_file: String,
    pub page_name: String,
    pub page_order: NavOrder,
}

/// Build the navigation menu for one directory level
///
/// Only direct markdown children with `navmenu: true` are listed; such a
/// page must also carry `title` and `navorder`. The result is sorted by
/// `navorder`, pages with equal orders keep their listing order.
pub fn collect_navigation(dir: &Path) -> Result<Vec<NavEntry>> {
    let mut entries: Vec<NavEntry> = Vec::new();

    for path in markdown_files(dir)? {
        let (metadata, _) = read_document(&path)?;
        if !metadata.is_true("navmenu") {
            continue;
        }

        let page_name = metadata.require_str("title", &path)?.to_string();
        let page_order = NavOrder::from_value(metadata.require("navorder", &path)?, &path)?;

        if let Some(first) = entries.first().map(|e| &e.page_order) {
            if !first.same_kind(&page_order) {
                return Err(Error::InvalidValue {
                    key: "navorder".to_string(),
                    path: path.clone(),
                    message: "numbers and strings cannot be mixed in one directory".to_string(),
                });
            }
        }

        entries.push(NavEntry {
            html_file: html_file_name(&path),
            page_name,
            page_order,
        });
    }

    entries.sort_by(|a, b| a.page_order.cmp_same_kind(&b.page_order));
    tracing::debug!("Collected {} navigation entries in {:?}", entries.len(), dir);

    Ok(entries)
}

/// Render the menu as `<li>` items for a page titled `current_title`
///
/// The entry whose name equals the page title gets `class="active"`.
pub fn render_navigation_links(
    entries: &[NavEntry],
    current_title: Option<&str>,
    ref_prefix: &str,
) -> String {
    let mut links = String::new();
    for entry in entries {
        let active = if current_title == Some(entry.page_name.as_str()) {
            r#" class="active""#
        } else {
            ""
        };
        links.push_str(&format!(
            "\n\t\t\t\t\t\t<li><a href=\"{}{}\"{}>{}</a></li>",
            ref_prefix, entry.html_file, active, entry.page_name
        ));
    }
    links
}

fn html_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("{}.html", stem)
}
