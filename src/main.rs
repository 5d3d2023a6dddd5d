//! Contour annotator, driven by text commands from stdin or a script.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use contour_annotator::config::LogLevel;
use contour_annotator::{
    AnnotationSession, Annotator, AppConfig, EntryNaming, Navigator, Playlist, default_palette,
    logging,
};

/// Where entry boundaries come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
enum Mode {
    /// Each file is a grayscale boundary image
    #[default]
    Static,
    /// Each file names a `_depth.png` (and optional `_rgb.png`) pair
    Depth,
}

/// Annotate images by flood filling boundary-enclosed regions.
#[derive(Debug, Parser)]
#[command(name = "contour-annotator", version)]
struct Cli {
    /// Boundary source
    #[arg(long, value_enum, default_value_t = Mode::Static)]
    mode: Mode,

    /// Config file (default: the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suffix of the saved user image names
    #[arg(long)]
    suffix: Option<String>,

    /// Gray level above which a boundary pixel is open
    #[arg(long)]
    threshold: Option<u8>,

    /// Radius of the boundary brush
    #[arg(long)]
    brush_radius: Option<u32>,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Playlist entries
    files: Vec<String>,
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

    let naming = match cli.mode {
        Mode::Static => EntryNaming::BoundaryFile,
        Mode::Depth => EntryNaming::DepthBase,
    };
    let playlist = match Playlist::from_args(&cli.files, naming) {
        Ok(playlist) => playlist,
        Err(e) => {
            log::error!("{}; pass at least one file", e);
            return ExitCode::FAILURE;
        }
    };

    let palette = config.to_palette().unwrap_or_else(|e| {
        log::warn!("{}; using the default palette", e);
        default_palette()
    });
    let mut settings = config.session_settings();
    if let Some(suffix) = cli.suffix {
        settings.user_image_suffix = suffix;
    }
    if let Some(threshold) = cli.threshold {
        settings.boundary_threshold = threshold;
    }
    if let Some(radius) = cli.brush_radius {
        settings.brush_radius = radius;
    }

    let session = match cli.mode {
        Mode::Static => AnnotationSession::with_static_boundary(palette, settings),
        Mode::Depth => AnnotationSession::with_depth_boundary(
            palette,
            settings,
            Box::new(config.edge_detection.to_detector()),
        ),
    };
    log::info!(
        "Annotating {} entries with {} boundaries",
        playlist.len(),
        session.source_id()
    );
    let navigator = Navigator::start(playlist, session);
    let mut annotator = Annotator::new(navigator, config.keybindings.clone());

    match &cli.script {
        Some(path) => match File::open(path) {
            Ok(file) => annotator.run(BufReader::new(file)),
            Err(e) => {
                log::warn!("Could not open script {:?}: {}", path, e);
                annotator.run(io::empty());
            }
        },
        None => annotator.run(io::stdin().lock()),
    }

    log::debug!("Annotator finished in state {:?}", annotator.state());
    ExitCode::SUCCESS
}
