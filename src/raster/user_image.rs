//! The palette-quantized color raster produced by annotation.

use image::{Rgb, RgbImage, imageops};

use super::BinaryMask;

/// Color raster being painted.
///
/// Pixels are only ever written with whole palette colors, never blended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserImage {
    pixels: RgbImage,
}

impl UserImage {
    /// Create a raster filled with the unset color.
    pub fn blank(width: u32, height: u32, unset: Rgb<u8>) -> Self {
        Self {
            pixels: RgbImage::from_pixel(width, height, unset),
        }
    }

    /// Wrap an existing RGB raster.
    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Read one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// Set every pixel of `mask` to `color`. Returns the number of pixels written.
    pub fn fill_mask(&mut self, mask: &BinaryMask, color: Rgb<u8>) -> usize {
        debug_assert_eq!(mask.dimensions(), self.dimensions());
        let mut written = 0;
        for (x, y) in mask.iter_set() {
            if let Some(p) = self.pixels.get_pixel_mut_checked(x, y) {
                *p = color;
                written += 1;
            }
        }
        written
    }

    /// Reset every pixel to `unset`.
    pub fn clear(&mut self, unset: Rgb<u8>) {
        for p in self.pixels.pixels_mut() {
            *p = unset;
        }
    }

    /// Exact-equality mask of `color`.
    pub fn color_mask(&self, color: Rgb<u8>) -> BinaryMask {
        BinaryMask::from_fn(self.width(), self.height(), |x, y| {
            *self.pixels.get_pixel(x, y) == color
        })
    }

    /// Number of pixels equal to `color`.
    pub fn count_color(&self, color: Rgb<u8>) -> usize {
        self.pixels.pixels().filter(|p| **p == color).count()
    }

    /// Resample to new dimensions with nearest-neighbour so no new colors appear.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if self.dimensions() == (width, height) {
            return self.clone();
        }
        Self {
            pixels: imageops::resize(&self.pixels, width, height, imageops::FilterType::Nearest),
        }
    }

    /// Borrow the underlying RGB raster.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    /// Consume into the underlying RGB raster.
    pub fn into_rgb(self) -> RgbImage {
        self.pixels
    }
}
