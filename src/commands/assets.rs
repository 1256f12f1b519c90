//! Copy static asset directories (css, scripts, images) into the output

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copy each static directory to `<output_dir>/<directory name>`
///
/// A previous copy is replaced. Missing directories are skipped with a
/// warning. Returns the destinations that were written.
pub fn copy_static_assets(static_dirs: &[PathBuf], output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for src in static_dirs {
        if !src.is_dir() {
            tracing::warn!("Static source directory {:?} not found. Skipping copy.", src);
            continue;
        }

        let Some(name) = src.file_name() else {
            tracing::warn!("Static source directory {:?} has no name. Skipping copy.", src);
            continue;
        };
        let dest = output_dir.join(name);

        if dest.exists() {
            fs::remove_dir_all(&dest)?;
        }
        copy_tree(src, &dest)?;

        tracing::info!("Copied {:?} -> {:?}", src, dest);
        copied.push(dest);
    }

    Ok(copied)
}

fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;

    for entry in WalkDir::new(src).min_depth(1).follow_links(true) {
        let entry = entry?;
        let target = dest.join(entry.path().strip_prefix(src)?);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            tracing::debug!("Copied: {:?} -> {:?}", entry.path(), target);
        }
    }

    Ok(())
}
