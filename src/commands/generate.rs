//! Generate JSON page documents from the markdown sources

use anyhow::Result;

use crate::generator::{DataGenerator, GenerateStats};
use crate::Site;

/// Run the data generation stage over the whole source tree
pub fn run(site: &Site) -> Result<GenerateStats> {
    let start = std::time::Instant::now();

    let generator = DataGenerator::new(site);
    let stats = generator.generate(&site.pages_dir, &site.json_dir)?;

    tracing::info!(
        "Generated {} page documents in {} directories ({:.2}s)",
        stats.pages,
        stats.directories,
        start.elapsed().as_secs_f64()
    );

    Ok(stats)
}
