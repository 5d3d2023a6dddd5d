//! Configuration file support for the annotator.
//!
//! This module provides serialization and deserialization of application settings.
//! Both binaries read the same file; command-line flags override its values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BOUNDARY_THRESHOLD, DEFAULT_BRUSH_RADIUS, DEFAULT_CANNY_HIGH, DEFAULT_CANNY_LOW,
    DEFAULT_CLEANUP_KERNEL_SIZE, DEFAULT_USER_IMAGE_SUFFIX,
};
use crate::keybindings::KeyBindings;
use crate::model::{Palette, PaletteColor, default_palette};
use crate::session::{CannyDepthEdges, SessionSettings};
use crate::tools::Connectivity;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindings,

    /// Palette definition, eraser first
    #[serde(default = "default_palette_config")]
    pub palette: Vec<PaletteColorConfig>,

    /// Depth edge detection thresholds
    #[serde(default)]
    pub edge_detection: EdgeDetectionConfig,
}

fn default_palette_config() -> Vec<PaletteColorConfig> {
    default_palette().iter().map(PaletteColorConfig::from).collect()
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Suffix of the persisted user image name
    #[serde(default = "default_user_image_suffix")]
    pub user_image_suffix: String,

    /// Gray level above which a boundary pixel is open
    #[serde(default = "default_boundary_threshold")]
    pub boundary_threshold: u8,

    /// Radius of the boundary brush
    #[serde(default = "default_brush_radius")]
    pub brush_radius: u32,

    /// Side of the structuring element used by cleanup
    #[serde(default = "default_cleanup_kernel_size")]
    pub cleanup_kernel_size: u32,

    /// Flood fill neighbourhood
    #[serde(default)]
    pub connectivity: Connectivity,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_user_image_suffix() -> String {
    DEFAULT_USER_IMAGE_SUFFIX.to_string()
}

fn default_boundary_threshold() -> u8 {
    DEFAULT_BOUNDARY_THRESHOLD
}

fn default_brush_radius() -> u32 {
    DEFAULT_BRUSH_RADIUS
}

fn default_cleanup_kernel_size() -> u32 {
    DEFAULT_CLEANUP_KERNEL_SIZE
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            user_image_suffix: default_user_image_suffix(),
            boundary_threshold: default_boundary_threshold(),
            brush_radius: default_brush_radius(),
            cleanup_kernel_size: default_cleanup_kernel_size(),
            connectivity: Connectivity::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Palette color configuration for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColorConfig {
    /// Display name of the color
    pub name: String,
    /// RGB value of the color
    pub color: [u8; 3],
}

impl From<&PaletteColor> for PaletteColorConfig {
    fn from(color: &PaletteColor) -> Self {
        Self {
            name: color.name.clone(),
            color: color.color,
        }
    }
}

impl From<&PaletteColorConfig> for PaletteColor {
    fn from(config: &PaletteColorConfig) -> Self {
        PaletteColor::new(&config.name, config.color)
    }
}

/// Canny thresholds for depth mode, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeDetectionConfig {
    /// Lower hysteresis threshold
    pub low: f32,
    /// Upper hysteresis threshold
    pub high: f32,
}

impl Default for EdgeDetectionConfig {
    fn default() -> Self {
        Self {
            low: DEFAULT_CANNY_LOW,
            high: DEFAULT_CANNY_HIGH,
        }
    }
}

impl EdgeDetectionConfig {
    /// Build the detector these thresholds describe.
    pub fn to_detector(&self) -> CannyDepthEdges {
        CannyDepthEdges::new(self.low, self.high)
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
            keybindings: KeyBindings::default(),
            palette: default_palette_config(),
            edge_detection: EdgeDetectionConfig::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Read configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Write configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get the default filename of the config file.
    pub fn default_filename() -> &'static str {
        "contour-annotator.json"
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("contour-annotator").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("contour-annotator")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Configuration for this run: `explicit` if given, else the default
    /// path, else built-in defaults.
    ///
    /// Only an explicitly requested file that cannot be read is an error.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => Ok(Self::load_from_default_path().unwrap_or_default()),
        }
    }

    /// Build the palette described by this configuration.
    pub fn to_palette(&self) -> crate::error::Result<Palette> {
        Palette::new(self.palette.iter().map(PaletteColor::from).collect())
    }

    /// Session settings described by the preferences.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            user_image_suffix: self.preferences.user_image_suffix.clone(),
            boundary_threshold: self.preferences.boundary_threshold,
            brush_radius: self.preferences.brush_radius,
            connectivity: self.preferences.connectivity,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trip() {
        let config = AppConfig::default();
        let json = config.to_json().unwrap();
        let parsed = AppConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.to_palette().unwrap(), default_palette());
    }

    #[test]
    fn test_rejects_newer_version() {
        let json = format!(r#"{{"version": {}}}"#, CONFIG_VERSION + 1);
        assert!(matches!(
            AppConfig::from_json(&json),
            Err(ConfigError::VersionTooNew { .. })
        ));
    }

    #[test]
    fn test_missing_sections_default() {
        let config = AppConfig::from_json(
            r#"{"version": 1, "preferences": {"brush_radius": 7, "connectivity": "eight"}}"#,
        )
        .unwrap();
        assert_eq!(config.preferences.brush_radius, 7);
        assert_eq!(config.preferences.connectivity, Connectivity::Eight);
        assert_eq!(config.preferences.cleanup_kernel_size, DEFAULT_CLEANUP_KERNEL_SIZE);
        assert_eq!(config.palette.len(), 13);
        assert_eq!(config.edge_detection, EdgeDetectionConfig::default());

        let settings = config.session_settings();
        assert_eq!(settings.brush_radius, 7);
        assert_eq!(settings.user_image_suffix, DEFAULT_USER_IMAGE_SUFFIX);
    }

    #[test]
    fn test_invalid_palette_is_rejected() {
        let mut config = AppConfig::default();
        config.palette.clear();
        assert!(config.to_palette().is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = AppConfig::default();
        config.preferences.log_level = LogLevel::Debug;
        config.save(&path).unwrap();

        assert_eq!(AppConfig::resolve(Some(path.as_path())).unwrap(), config);
        let missing = dir.path().join("missing.json");
        assert!(AppConfig::resolve(Some(missing.as_path())).is_err());
    }
}
