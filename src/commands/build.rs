//! Full site build

use anyhow::Result;

use crate::Site;

/// Generate page documents, render them, then copy the static assets
///
/// Rendering only starts once the whole tree has been generated.
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    super::generate::run(site)?;
    super::render::run(site)?;
    super::assets::copy_static_assets(&site.static_dirs, &site.output_dir)?;

    tracing::info!("Site generation complete in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
