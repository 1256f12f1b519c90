//! CLI entry point for mdpress

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(version)]
#[command(about = "Build a static HTML site from markdown pages", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the source layout and starter files
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate page data, render HTML and copy static assets
    #[command(alias = "b")]
    Build,

    /// Only generate the JSON page documents
    #[command(alias = "g")]
    Generate,

    /// Only render HTML from existing JSON page documents
    #[command(alias = "r")]
    Render,

    /// Remove the output and JSON working directories
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdpress=debug,info"
    } else {
        "mdpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            let site = mdpress::Site::new(&target_dir)?;
            site.init()?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Build => {
            let site = mdpress::Site::new(&base_dir)?;
            site.build()?;
            println!("Built site into {:?}", site.output_dir);
        }

        Commands::Generate => {
            let site = mdpress::Site::new(&base_dir)?;
            mdpress::commands::generate::run(&site)?;
        }

        Commands::Render => {
            let site = mdpress::Site::new(&base_dir)?;
            mdpress::commands::render::run(&site)?;
        }

        Commands::Clean => {
            let site = mdpress::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("mdpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
