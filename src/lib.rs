//! Contour annotator: ground-truth segmentation masks by edge-constrained flood fill.
//!
//! A user walks a playlist of images. Each image comes with a binary boundary
//! raster (read from disk, or detected in a depth image). Clicking fills the
//! boundary-enclosed region under the pointer with a palette color; the
//! boundary itself can be extended with a brush. Painted user images are
//! saved next to their inputs and can later be denoised by [`cleanup`].

pub mod app;
pub mod cleanup;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod keybindings;
pub mod logging;
pub mod message;
pub mod model;
pub mod navigator;
pub mod paths;
pub mod playlist;
pub mod preview;
pub mod raster;
pub mod session;
pub mod tools;

pub use app::{Annotator, RunState};
pub use cleanup::{BatchReport, MaskCleanup};
pub use config::AppConfig;
pub use error::{AnnotatorError, Result};
pub use message::Action;
pub use model::{Palette, PaletteColor, default_palette};
pub use navigator::Navigator;
pub use playlist::{EntryNaming, Playlist};
pub use session::{AnnotationSession, SessionSettings};

#[cfg(test)]
mod tests;
