//! Error types for annotator operations.

use thiserror::Error;

/// Errors that can occur while loading, editing or saving annotations.
#[derive(Error, Debug)]
pub enum AnnotatorError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The playlist given at startup has no entries
    #[error("Cannot load an empty playlist")]
    EmptyPlaylist,

    /// Palette definition is unusable
    #[error("Invalid palette: {message}")]
    InvalidPalette {
        /// Description of the palette problem
        message: String,
    },

    /// A boundary was requested before any entry was loaded
    #[error("No entry loaded in the '{source_id}' boundary source")]
    NoEntryLoaded {
        /// Identifier of the boundary source
        source_id: &'static str,
    },
}

impl AnnotatorError {
    /// Create an invalid palette error with a message.
    pub fn invalid_palette(message: impl Into<String>) -> Self {
        Self::InvalidPalette {
            message: message.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AnnotatorError>;
