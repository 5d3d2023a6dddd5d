//! Data models for the annotator.

mod palette;

pub use palette::{ERASER_INDEX, Palette, PaletteColor, default_palette};
