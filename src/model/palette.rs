//! Palette data model for annotation colors.

use image::Rgb;

use crate::error::{AnnotatorError, Result};

/// Index of the eraser entry. Its color is the unset background of a user image.
pub const ERASER_INDEX: usize = 0;

/// A labelled palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteColor {
    /// Display name of the color
    pub name: String,
    /// RGB value painted into the user image
    pub color: [u8; 3],
}

impl PaletteColor {
    /// Create a new palette color with the given name and RGB value.
    pub fn new(name: &str, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }

    /// The color as an image pixel.
    pub fn rgb(&self) -> Rgb<u8> {
        Rgb(self.color)
    }
}

/// Fixed ordered set of colors the user paints with.
///
/// Order matters twice: entry `i` is selected with digit key `i`, and during
/// cleanup later entries win pixels contested by earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<PaletteColor>,
}

impl Palette {
    /// Build a palette, rejecting empty lists and duplicate colors.
    pub fn new(colors: Vec<PaletteColor>) -> Result<Self> {
        if colors.is_empty() {
            return Err(AnnotatorError::invalid_palette("palette has no colors"));
        }
        for (i, a) in colors.iter().enumerate() {
            if let Some(b) = colors[i + 1..].iter().find(|b| b.color == a.color) {
                return Err(AnnotatorError::invalid_palette(format!(
                    "'{}' and '{}' share color {:?}",
                    a.name, b.name, a.color
                )));
            }
        }
        Ok(Self { colors })
    }

    /// Number of colors, eraser included.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false: a palette holds at least the eraser.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get the entry at `index`.
    pub fn get(&self, index: usize) -> Option<&PaletteColor> {
        self.colors.get(index)
    }

    /// Get the pixel value at `index`.
    pub fn color(&self, index: usize) -> Option<Rgb<u8>> {
        self.get(index).map(PaletteColor::rgb)
    }

    /// Color of unset pixels (the eraser).
    pub fn unset(&self) -> Rgb<u8> {
        self.colors[ERASER_INDEX].rgb()
    }

    /// Find the palette index of an exact pixel value.
    pub fn index_of(&self, pixel: Rgb<u8>) -> Option<usize> {
        self.colors.iter().position(|c| c.color == pixel.0)
    }

    /// Iterate over the colors in palette order.
    pub fn iter(&self) -> impl Iterator<Item = &PaletteColor> {
        self.colors.iter()
    }

    /// The index selected when a session starts: the first non-eraser color.
    pub fn default_selection(&self) -> usize {
        if self.len() > 1 { 1 } else { ERASER_INDEX }
    }
}

impl Default for Palette {
    fn default() -> Self {
        default_palette()
    }
}

/// The built-in 13 color palette.
pub fn default_palette() -> Palette {
    Palette {
        colors: vec![
            PaletteColor::new("eraser", [0, 0, 0]),
            PaletteColor::new("red", [255, 0, 0]),
            PaletteColor::new("green", [0, 255, 0]),
            PaletteColor::new("blue", [0, 0, 255]),
            PaletteColor::new("cyan", [0, 255, 255]),
            PaletteColor::new("magenta", [255, 0, 255]),
            PaletteColor::new("yellow", [255, 255, 0]),
            PaletteColor::new("azure", [0, 160, 255]),
            PaletteColor::new("spring green", [0, 255, 160]),
            PaletteColor::new("violet", [160, 0, 255]),
            PaletteColor::new("rose", [255, 0, 160]),
            PaletteColor::new("orange", [255, 160, 0]),
            PaletteColor::new("chartreuse", [160, 255, 0]),
        ],
    }
}
