//! Data generator - turns the markdown tree into a tree of JSON page documents

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{
    assemble_containers, collect_navigation, is_markdown_file, list_dir, read_document,
    render_navigation_links, MarkdownRenderer, Metadata, NavEntry,
};
use crate::error::{Error, Result};
use crate::{Site, PARENT_PREFIX, ROOT_PREFIX};

/// Layout that pulls in the container grid
pub const CONTAINERS_LAYOUT: &str = "containers";

/// Counters reported after a generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub pages: usize,
    pub directories: usize,
}

/// Writes one JSON page document per markdown source page
pub struct DataGenerator {
    renderer: MarkdownRenderer,
    default_layout: String,
    json_indent: usize,
}

impl DataGenerator {
    /// Create a generator from the site settings
    pub fn new(site: &Site) -> Self {
        Self {
            renderer: MarkdownRenderer::with_options(&site.config.highlight),
            default_layout: site.config.default_layout.clone(),
            json_indent: site.config.json_indent,
        }
    }

    /// Generate page documents for the whole source tree
    ///
    /// A missing source directory is reported and nothing is generated.
    pub fn generate(&self, pages_dir: &Path, json_dir: &Path) -> Result<GenerateStats> {
        let mut stats = GenerateStats::default();

        if !pages_dir.is_dir() {
            tracing::error!("Input directory not found: {:?}", pages_dir);
            return Ok(stats);
        }

        tracing::info!("Generating data from markdown in {:?}", pages_dir);
        self.generate_dir(pages_dir, json_dir, ROOT_PREFIX, &mut stats)?;
        Ok(stats)
    }

    /// Generate one directory level, then recurse into its subdirectories
    fn generate_dir(
        &self,
        src_dir: &Path,
        json_dir: &Path,
        ref_prefix: &str,
        stats: &mut GenerateStats,
    ) -> Result<()> {
        fs::create_dir_all(json_dir).map_err(|e| Error::io(json_dir, e))?;
        stats.directories += 1;

        // Navigation is scoped to this level; subdirectories build their own
        let navigation = collect_navigation(src_dir)?;

        for entry in list_dir(src_dir)? {
            let path = entry.path();

            if entry.file_type().is_dir() {
                tracing::debug!("Subdirectory found: {:?}", path);
                let child_prefix = format!("{}{}", ref_prefix, PARENT_PREFIX);
                self.generate_dir(path, &json_dir.join(entry.file_name()), &child_prefix, stats)?;
                continue;
            }

            if !is_markdown_file(path) {
                continue;
            }

            let document = self.build_page_document(path, src_dir, &navigation, ref_prefix)?;
            let output_path = json_path_for(json_dir, path);
            self.write_document(&document, &output_path)?;
            stats.pages += 1;

            tracing::debug!("Generated data for {:?} -> {:?}", path, output_path);
        }

        Ok(())
    }

    /// Assemble the page document for one source page
    ///
    /// The front matter is kept as-is and `page_markdown`,
    /// `navigation_links` and, for the containers layout,
    /// `containers_markdown` are added to it.
    pub fn build_page_document(
        &self,
        path: &Path,
        src_dir: &Path,
        navigation: &[NavEntry],
        ref_prefix: &str,
    ) -> Result<Metadata> {
        let (mut document, body) = read_document(path)?;

        let page_markdown = self.renderer.render(&body);
        document.insert("page_markdown", Value::String(page_markdown));

        let links = render_navigation_links(navigation, document.get_str("title"), ref_prefix);
        document.insert("navigation_links", Value::String(links));

        let layout = document.get_str("layout").unwrap_or(self.default_layout.as_str());
        if layout == CONTAINERS_LAYOUT {
            let containers_path = document.require_str("containerspath", path)?;
            let containers = assemble_containers(&src_dir.join(containers_path))?;
            document.insert(
                "containers_markdown",
                containers.map(Value::String).unwrap_or(Value::Null),
            );
        }

        Ok(document)
    }

    /// Write a page document as indented JSON
    fn write_document(&self, document: &Metadata, output_path: &Path) -> Result<()> {
        let indent = " ".repeat(self.json_indent);
        let mut buf = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        document
            .serialize(&mut serializer)
            .map_err(|e| Error::json(output_path, e))?;

        fs::write(output_path, buf).map_err(|e| Error::io(output_path, e))
    }
}

/// `<json_dir>/<stem>.json` for a source page
fn json_path_for(json_dir: &Path, source: &Path) -> PathBuf {
    let mut name = source.file_stem().unwrap_or_default().to_os_string();
    name.push(".json");
    json_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use serde_json::json;

    fn site(base: &Path) -> Site {
        Site::with_config(base.to_path_buf(), SiteConfig::default())
    }

    fn read_json(path: &Path) -> serde_json::Map<String, Value> {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_generate_mirrors_tree() {
        let base = tempfile::tempdir().unwrap();
        let site = site(base.path());
        let pages = &site.pages_dir;
        fs::create_dir_all(pages.join("docs/deep")).unwrap();
        fs::write(
            pages.join("index.md"),
            "---\ntitle: Home\nnavmenu: true\nnavorder: 1\n---\n# Hi\n",
        )
        .unwrap();
        fs::write(
            pages.join("about.markdown"),
            "---\ntitle: About\nnavmenu: true\nnavorder: 2\n---\nAbout text\n",
        )
        .unwrap();
        fs::write(pages.join("notes.txt"), "ignored").unwrap();
        fs::write(
            pages.join("docs/guide.md"),
            "---\ntitle: Guide\nnavmenu: true\nnavorder: 1\n---\nGuide\n",
        )
        .unwrap();
        fs::write(pages.join("docs/deep/leaf.md"), "---\ntitle: Leaf\n---\nLeaf\n").unwrap();

        let stats = DataGenerator::new(&site)
            .generate(pages, &site.json_dir)
            .unwrap();
        assert_eq!(stats, GenerateStats { pages: 4, directories: 3 });

        let json = &site.json_dir;
        assert!(json.join("index.json").is_file());
        assert!(json.join("about.json").is_file());
        assert!(!json.join("notes.json").exists());
        assert!(json.join("docs/guide.json").is_file());
        assert!(json.join("docs/deep/leaf.json").is_file());

        let index = read_json(&json.join("index.json"));
        assert_eq!(index["title"], json!("Home"));
        assert_eq!(index["page_markdown"], json!("<h1>Hi</h1>\n"));
        let links = index["navigation_links"].as_str().unwrap();
        assert!(links.contains(r#"<a href="./index.html" class="active">Home</a>"#));
        assert!(links.contains(r#"<a href="./about.html">About</a>"#));

        // Nested pages only see their own level, with a deeper prefix
        let guide = read_json(&json.join("docs/guide.json"));
        let links = guide["navigation_links"].as_str().unwrap();
        assert!(links.contains(r#"<a href="./../guide.html" class="active">Guide</a>"#));
        assert!(!links.contains("About"));

        let leaf = read_json(&json.join("docs/deep/leaf.json"));
        assert_eq!(leaf["navigation_links"], json!(""));
    }

    #[test]
    fn test_document_keeps_front_matter_order() {
        let base = tempfile::tempdir().unwrap();
        let site = site(base.path());
        fs::create_dir_all(&site.pages_dir).unwrap();
        fs::write(
            site.pages_dir.join("p.md"),
            "---\nlayout: page\ntitle: P\nextra:\n  nested: [1, 2]\n---\nText\n",
        )
        .unwrap();

        DataGenerator::new(&site)
            .generate(&site.pages_dir, &site.json_dir)
            .unwrap();

        let raw = fs::read_to_string(site.json_dir.join("p.json")).unwrap();
        assert!(raw.starts_with("{\n    \"layout\": \"page\",\n    \"title\": \"P\","));
        let doc = read_json(&site.json_dir.join("p.json"));
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["layout", "title", "extra", "page_markdown", "navigation_links"]
        );
        assert_eq!(doc["extra"], json!({"nested": [1, 2]}));
    }

    #[test]
    fn test_containers_layout() {
        let base = tempfile::tempdir().unwrap();
        let site = site(base.path());
        let pages = &site.pages_dir;
        let containers = base.path().join("_data/containers");
        fs::create_dir_all(pages).unwrap();
        fs::create_dir_all(&containers).unwrap();
        fs::write(
            pages.join("showcase.md"),
            "---\ntitle: Showcase\nlayout: containers\ncontainerspath: ../containers\n---\n",
        )
        .unwrap();
        fs::write(
            containers.join("one.md"),
            "---\ncontainergroups: [web]\ncontainerimage: a.png\ncontaineralttext: A\ncontainerlink: a.html\ncontainertitle: One\n---\n",
        )
        .unwrap();

        DataGenerator::new(&site)
            .generate(pages, &site.json_dir)
            .unwrap();

        let doc = read_json(&site.json_dir.join("showcase.json"));
        let grid = doc["containers_markdown"].as_str().unwrap();
        assert!(grid.contains(r#"data-filter="web">web</button>"#));
        assert!(grid.contains("<h3>One</h3>"));
    }

    #[test]
    fn test_containers_layout_with_missing_directory() {
        let base = tempfile::tempdir().unwrap();
        let site = site(base.path());
        fs::create_dir_all(&site.pages_dir).unwrap();
        fs::write(
            site.pages_dir.join("showcase.md"),
            "---\ntitle: Showcase\nlayout: containers\ncontainerspath: missing\n---\n",
        )
        .unwrap();

        DataGenerator::new(&site)
            .generate(&site.pages_dir, &site.json_dir)
            .unwrap();

        let doc = read_json(&site.json_dir.join("showcase.json"));
        assert_eq!(doc["containers_markdown"], Value::Null);
    }

    #[test]
    fn test_containers_layout_requires_path() {
        let base = tempfile::tempdir().unwrap();
        let site = site(base.path());
        fs::create_dir_all(&site.pages_dir).unwrap();
        fs::write(
            site.pages_dir.join("showcase.md"),
            "---\ntitle: Showcase\nlayout: containers\n---\n",
        )
        .unwrap();

        let err = DataGenerator::new(&site)
            .generate(&site.pages_dir, &site.json_dir)
            .unwrap_err();
        assert!(matches!(err, Error::MissingKey { ref key, .. } if key == "containerspath"));
    }

    #[test]
    fn test_malformed_front_matter_becomes_body() {
        let base = tempfile::tempdir().unwrap();
        let site = site(base.path());
        fs::create_dir_all(&site.pages_dir).unwrap();
        fs::write(site.pages_dir.join("broken.md"), "---\ntitle: [oops\n---\nText\n").unwrap();

        DataGenerator::new(&site)
            .generate(&site.pages_dir, &site.json_dir)
            .unwrap();

        let doc = read_json(&site.json_dir.join("broken.json"));
        assert!(doc.get("title").is_none());
        assert!(doc["page_markdown"].as_str().unwrap().contains("title: [oops"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_pages_and_directories_are_followed() {
        use std::os::unix::fs::symlink;

        let base = tempfile::tempdir().unwrap();
        let site = site(base.path());
        let outside = base.path().join("shared");
        fs::create_dir_all(outside.join("section")).unwrap();
        fs::create_dir_all(&site.pages_dir).unwrap();
        fs::write(
            site.pages_dir.join("a.md"),
            "---\ntitle: A\nnavmenu: true\nnavorder: 1\n---\nA\n",
        )
        .unwrap();
        fs::write(
            outside.join("b.md"),
            "---\ntitle: B\nnavmenu: true\nnavorder: 2\n---\nB\n",
        )
        .unwrap();
        fs::write(
            outside.join("section/c.md"),
            "---\ntitle: C\nnavmenu: true\nnavorder: 1\n---\nC\n",
        )
        .unwrap();
        symlink(outside.join("b.md"), site.pages_dir.join("b.md")).unwrap();
        symlink(outside.join("section"), site.pages_dir.join("sec")).unwrap();

        let stats = DataGenerator::new(&site)
            .generate(&site.pages_dir, &site.json_dir)
            .unwrap();
        assert_eq!(stats, GenerateStats { pages: 3, directories: 2 });

        let a = read_json(&site.json_dir.join("a.json"));
        let links = a["navigation_links"].as_str().unwrap();
        assert!(links.contains(r#"<a href="./b.html">B</a>"#));
        assert!(site.json_dir.join("b.json").is_file());

        let c = read_json(&site.json_dir.join("sec/c.json"));
        let links = c["navigation_links"].as_str().unwrap();
        assert!(links.contains(r#"<a href="./../c.html" class="active">C</a>"#));
    }

    #[test]
    fn test_missing_input_directory_is_skipped() {
        let base = tempfile::tempdir().unwrap();
        let site = site(base.path());

        let stats = DataGenerator::new(&site)
            .generate(&site.pages_dir, &site.json_dir)
            .unwrap();
        assert_eq!(stats, GenerateStats::default());
        assert!(!site.json_dir.exists());
    }
}
