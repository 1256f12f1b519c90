//! Render HTML pages from the JSON page documents

use anyhow::Result;

use crate::templates::{RenderStats, SiteRenderer};
use crate::Site;

/// Run the render stage over the whole JSON tree
pub fn run(site: &Site) -> Result<RenderStats> {
    let start = std::time::Instant::now();

    let mut renderer = SiteRenderer::new(site);
    let stats = renderer.render(&site.json_dir, &site.output_dir)?;

    if stats.skipped > 0 {
        tracing::warn!("{} pages were skipped", stats.skipped);
    }
    tracing::info!(
        "Rendered {} pages ({:.2}s)",
        stats.rendered,
        start.elapsed().as_secs_f64()
    );

    Ok(stats)
}
