//! Content module - front matter, markdown, navigation and containers

pub mod containers;
mod frontmatter;
mod markdown;
pub mod navigation;

pub use containers::{assemble_containers, ContainerFragment};
pub use frontmatter::{parse_front_matter, Metadata};
pub use markdown::MarkdownRenderer;
pub use navigation::{collect_navigation, render_navigation_links, NavEntry, NavOrder};

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Direct children of a directory, in file-name order
///
/// Symlinks are followed, so a linked page or directory is listed as
/// whatever it points to.
pub(crate) fn list_dir(dir: &Path) -> Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| entry.map_err(|e| Error::io(dir, e.into())))
        .collect()
}

/// Markdown files directly inside a directory (subdirectories are not entered)
pub(crate) fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(list_dir(dir)?
        .into_iter()
        .filter(|entry| entry.file_type().is_file() && is_markdown_file(entry.path()))
        .map(DirEntry::into_path)
        .collect())
}

/// Read a source document and split off its front matter
pub(crate) fn read_document(path: &Path) -> Result<(Metadata, String)> {
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse_front_matter(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file(Path::new("a/index.md")));
        assert!(is_markdown_file(Path::new("notes.markdown")));
        assert!(!is_markdown_file(Path::new("style.css")));
        assert!(!is_markdown_file(Path::new("README")));
    }

    #[test]
    fn test_markdown_files_is_flat_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "").unwrap();
        fs::write(dir.path().join("a.markdown"), "").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();
        fs::create_dir(dir.path().join("sub.md")).unwrap();
        fs::write(dir.path().join("sub.md/inner.md"), "").unwrap();

        let names: Vec<String> = markdown_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.markdown", "b.md"]);
    }
}
