//! Boolean pixel masks.

use image::{GrayImage, Luma};

const SET: Luma<u8> = Luma([255]);
const CLEAR: Luma<u8> = Luma([0]);

/// A two-level grayscale raster read as a pixel set: 255 is set, 0 is clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    /// Create an all-clear mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, CLEAR),
        }
    }

    /// Create a mask from a per-pixel predicate.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        Self {
            image: GrayImage::from_fn(width, height, |x, y| if f(x, y) { SET } else { CLEAR }),
        }
    }

    /// Wrap a grayscale image; any non-zero pixel is set.
    pub fn from_gray(image: GrayImage) -> Self {
        let mut image = image;
        for pixel in image.pixels_mut() {
            if pixel[0] != 0 {
                *pixel = SET;
            }
        }
        Self { image }
    }

    /// The underlying image, set pixels at 255.
    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Read a pixel. Out-of-range reads are false.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.image
            .get_pixel_checked(x, y)
            .is_some_and(|pixel| pixel[0] != 0)
    }

    /// Write a pixel. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
            *pixel = if value { SET } else { CLEAR };
        }
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.image.pixels().filter(|pixel| pixel[0] != 0).count()
    }

    /// True if no pixel is set.
    pub fn is_clear(&self) -> bool {
        self.image.pixels().all(|pixel| pixel[0] == 0)
    }

    /// Iterate over the coordinates of set pixels in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.image
            .enumerate_pixels()
            .filter(|(_, _, pixel)| pixel[0] != 0)
            .map(|(x, y, _)| (x, y))
    }
}
