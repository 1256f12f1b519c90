//! Clean the generated output

use anyhow::Result;
use std::fs;

use crate::Site;

/// Remove the output directory and the JSON working directory
pub fn run(site: &Site) -> Result<()> {
    for dir in [&site.output_dir, &site.json_dir] {
        if dir.exists() {
            fs::remove_dir_all(dir)?;
            tracing::info!("Deleted: {:?}", dir);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_clean_removes_generated_dirs_only() {
        let base = tempfile::tempdir().unwrap();
        let site = Site::with_config(base.path().to_path_buf(), SiteConfig::default());
        fs::create_dir_all(site.output_dir.join("css")).unwrap();
        fs::create_dir_all(&site.json_dir).unwrap();
        fs::create_dir_all(&site.pages_dir).unwrap();

        run(&site).unwrap();
        assert!(!site.output_dir.exists());
        assert!(!site.json_dir.exists());
        assert!(site.pages_dir.exists());

        // Nothing left to clean is fine
        run(&site).unwrap();
    }
}
