//! Binary entry point: resolve configuration, start file logging, pick the
//! asset source and hand control to the Ratatui event loop.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use openlyrics_viewer::config::{default_config_path, default_log_path, ViewerConfig};
use openlyrics_viewer::logging::init_logging;
use openlyrics_viewer::{run_app, App, AssetSource, DirectoryAssets, MemoryAssets};

/// Display the lyrics of an OpenLyrics song in the terminal.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Asset path of the song, e.g. `assets/amazing_grace.xml`.
    song: Option<String>,

    /// Read assets from this directory instead of the bundled ones.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Config file to use instead of `~/.openlyrics-viewer/config.toml`.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = ViewerConfig::load(&config_path)?;

    let log_path = default_log_path()?;
    init_logging(&log_path, &config.log_filter)?;
    info!(
        "Starting OpenLyrics viewer v{} (config {})",
        env!("CARGO_PKG_VERSION"),
        config_path.display()
    );

    let song_path = cli.song.unwrap_or(config.song);
    let source: Box<dyn AssetSource> = match cli.assets.or(config.asset_dir) {
        Some(dir) => {
            let dir = dir
                .canonicalize()
                .with_context(|| format!("asset directory {} is not accessible", dir.display()))?;
            info!(asset_dir = %dir.display(), "reading assets from disk");
            Box::new(DirectoryAssets::new(dir))
        }
        None => Box::new(MemoryAssets::bundled()),
    };

    let mut app = App::new(source, song_path);
    run_app(&mut app)
}
