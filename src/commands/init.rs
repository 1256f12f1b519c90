//! Bootstrap a new site layout

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILE;
use crate::Site;

const CONFIG_CONTENT: &str = r#"# mdpress configuration

# Directory
pages_dir: _data/pages
json_dir: _data/working/page_json
template_dir: _data/assets/templates
output_dir: docs
static_dirs:
  - _data/assets/css
  - _data/assets/scripts
  - _data/pages/images

# Rendering
default_layout: page
json_indent: 4
highlight:
  enable: false
  theme: base16-ocean.dark
"#;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
	<meta charset="utf-8">
	<title>${title}</title>
	<link rel="stylesheet" href="${ref_prefix}css/style.css">
</head>
<body>
	<nav>
		<ul>${navigation_links}
		</ul>
	</nav>
	<main>
${page_markdown}
	</main>
</body>
</html>
"#;

const INDEX_PAGE: &str = r#"---
title: Home
navmenu: true
navorder: 1
layout: page
---

# Welcome

This page was created by `mdpress init`. Edit it under `_data/pages`.
"#;

/// Create the directories and starter files of a site; existing files are kept
pub fn run(site: &Site) -> Result<()> {
    fs::create_dir_all(&site.base_dir)?;

    for dir in [&site.pages_dir, &site.template_dir]
        .into_iter()
        .chain(site.static_dirs.iter())
    {
        create_missing_directory(dir)?;
    }

    write_if_missing(&site.base_dir.join(CONFIG_FILE), CONFIG_CONTENT)?;
    write_if_missing(&site.template_dir.join("page.html"), PAGE_TEMPLATE)?;
    write_if_missing(&site.pages_dir.join("index.md"), INDEX_PAGE)?;

    Ok(())
}

fn create_missing_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        tracing::info!("Created directory: {:?}", path);
    }
    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::debug!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::info!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_init_then_build() {
        let base = tempfile::tempdir().unwrap();
        let site = Site::with_config(base.path().to_path_buf(), SiteConfig::default());

        run(&site).unwrap();
        assert!(base.path().join(CONFIG_FILE).is_file());
        assert!(site.static_dirs.iter().all(|d| d.is_dir()));

        let site = Site::new(base.path()).unwrap();
        site.build().unwrap();

        let html = fs::read_to_string(site.output_dir.join("index.html")).unwrap();
        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains(r#"<a href="./index.html" class="active">Home</a>"#));
        assert!(html.contains("<h1>Welcome</h1>"));
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let base = tempfile::tempdir().unwrap();
        let site = Site::with_config(base.path().to_path_buf(), SiteConfig::default());
        fs::create_dir_all(&site.pages_dir).unwrap();
        fs::write(site.pages_dir.join("index.md"), "mine").unwrap();

        run(&site).unwrap();
        assert_eq!(fs::read_to_string(site.pages_dir.join("index.md")).unwrap(), "mine");
    }
}
