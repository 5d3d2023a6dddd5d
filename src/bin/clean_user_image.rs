//! Batch cleanup of painted user images.
//!
//! Writes `<base>_cleaned.png` next to every input that decodes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use contour_annotator::config::LogLevel;
use contour_annotator::{AppConfig, MaskCleanup, default_palette, logging};

/// Remove specks and thin strokes from painted user images.
#[derive(Debug, Parser)]
#[command(name = "clean-user-image", version)]
struct Cli {
    /// Side of the square structuring element
    #[arg(long)]
    kernel_size: Option<u32>,

    /// Config file (default: the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// User images to clean
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, config_error) = match AppConfig::resolve(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logging::init(logging::resolve_level(cli.log_level, &config));
    if let Some(e) = config_error {
        log::warn!("Could not load config {:?}: {}; using defaults", cli.config, e);
    }

    let palette = config.to_palette().unwrap_or_else(|e| {
        log::warn!("{}; using the default palette", e);
        default_palette()
    });
    let kernel_size = cli
        .kernel_size
        .unwrap_or(config.preferences.cleanup_kernel_size);
    let cleanup = MaskCleanup::new(palette, kernel_size);
    let size = cleanup.element().size();
    log::debug!("Opening with a {}x{} square", size, size);

    let report = cleanup.run_batch(&cli.files);
    log::info!(
        "Cleaned {} file(s), skipped {}",
        report.cleaned.len(),
        report.skipped.len()
    );
    ExitCode::SUCCESS
}
