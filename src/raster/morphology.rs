//! Binary morphology on [`BinaryMask`] with square structuring elements.
//!
//! Built on `imageproc::morphology`. imageproc evaluates both its erosion and
//! its dilation over the mask offsets as given, so [`dilate`] passes the
//! element reflected about its anchor. This keeps [`open`] a true opening
//! for even sizes as well.
//!
//! Border handling: samples outside the raster are ignored. Erosion therefore
//! never shrinks a mask from the image border, and dilation never grows one
//! from outside it.

use image::{GrayImage, Luma};
use imageproc::morphology::{Mask, grayscale_dilate, grayscale_erode};

use super::BinaryMask;

/// Largest supported element side.
pub const MAX_ELEMENT_SIZE: u32 = 511;

/// Square structuring element with an anchor.
///
/// The anchor sits at `size / 2`, so even sizes reach one pixel further
/// towards negative offsets than towards positive ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    size: u32,
    anchor: u32,
}

impl StructuringElement {
    /// Create a `size` x `size` square element, clamped to
    /// `1..=MAX_ELEMENT_SIZE`.
    pub fn square(size: u32) -> Self {
        let size = size.clamp(1, MAX_ELEMENT_SIZE);
        Self {
            size,
            anchor: size / 2,
        }
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The element as an imageproc mask centred at `center`.
    fn mask(&self, center: u32) -> Mask {
        let square = GrayImage::from_pixel(self.size, self.size, Luma([255]));
        // size is at most 511, so both centres fit in a u8
        let center = u8::try_from(center).unwrap_or(u8::MAX);
        Mask::from_image(&square, center, center)
    }

    /// Offsets `[-anchor, size - 1 - anchor]`.
    fn forward(&self) -> Mask {
        self.mask(self.anchor)
    }

    /// Offsets `[-(size - 1 - anchor), anchor]`.
    fn reflected(&self) -> Mask {
        self.mask(self.size - 1 - self.anchor)
    }
}

/// Erode a mask: a pixel survives if the element placed at it fits inside the mask.
pub fn erode(mask: &BinaryMask, element: StructuringElement) -> BinaryMask {
    BinaryMask::from_gray(grayscale_erode(mask.as_gray(), &element.forward()))
}

/// Dilate a mask with the reflected element, the adjoint of [`erode`].
pub fn dilate(mask: &BinaryMask, element: StructuringElement) -> BinaryMask {
    BinaryMask::from_gray(grayscale_dilate(mask.as_gray(), &element.reflected()))
}

/// Open a mask: erosion followed by dilation.
///
/// Removes foreground features that the element cannot fit inside, such as
/// isolated specks and strokes thinner than the element. Opening is
/// idempotent for a fixed mask and element.
pub fn open(mask: &BinaryMask, element: StructuringElement) -> BinaryMask {
    dilate(&erode(mask, element), element)
}
