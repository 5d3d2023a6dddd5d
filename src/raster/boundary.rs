//! Two-level boundary raster.

use image::{GrayImage, Luma};

use crate::constants::{EDGE, OPEN};

use super::BinaryMask;

/// Edge map constraining flood fills.
///
/// Every pixel is exactly [`EDGE`] or [`OPEN`]. Constructors binarize their
/// input and the only mutation is [`BoundaryMask::set_edge`] (and the brush
/// built on top of it), so the invariant survives every edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryMask {
    pixels: GrayImage,
}

impl BoundaryMask {
    /// Create a boundary with every pixel open.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            pixels: GrayImage::from_pixel(width, height, Luma([OPEN])),
        }
    }

    /// Binarize a grayscale image: values strictly above `threshold` are open.
    pub fn from_gray(gray: &GrayImage, threshold: u8) -> Self {
        let mut pixels = gray.clone();
        for p in pixels.pixels_mut() {
            p.0[0] = if p.0[0] > threshold { OPEN } else { EDGE };
        }
        Self { pixels }
    }

    /// Build from a mask of edge pixels.
    pub fn from_edges(edges: &BinaryMask) -> Self {
        let (width, height) = edges.dimensions();
        Self {
            pixels: GrayImage::from_fn(width, height, |x, y| {
                Luma([if edges.get(x, y) { EDGE } else { OPEN }])
            }),
        }
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

    /// True if the pixel is paintable. Out-of-range pixels are not.
    pub fn is_open(&self, x: u32, y: u32) -> bool {
        self.pixels
            .get_pixel_checked(x, y)
            .is_some_and(|p| p.0[0] == OPEN)
    }

    /// True if the pixel is an edge.
    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        self.pixels
            .get_pixel_checked(x, y)
            .is_some_and(|p| p.0[0] == EDGE)
    }

    /// Mark one pixel as edge. Returns true if it was open before.
    pub fn set_edge(&mut self, x: u32, y: u32) -> bool {
        match self.pixels.get_pixel_mut_checked(x, y) {
            Some(p) if p.0[0] == OPEN => {
                p.0[0] = EDGE;
                true
            }
            _ => false,
        }
    }

    /// Number of edge pixels.
    pub fn edge_count(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0[0] == EDGE).count()
    }

    /// The set of edge pixels as a mask.
    pub fn edges(&self) -> BinaryMask {
        BinaryMask::from_fn(self.width(), self.height(), |x, y| self.is_edge(x, y))
    }

    /// Borrow the underlying grayscale raster.
    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }

    /// Mutable access for drawing routines. Callers must only write [`EDGE`].
    pub(crate) fn gray_mut(&mut self) -> &mut GrayImage {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarizes() {
        let gray = GrayImage::from_fn(4, 1, |x, _| Luma([[0, 128, 129, 255][x as usize]]));
        let boundary = BoundaryMask::from_gray(&gray, 128);

        assert!(boundary.is_edge(0, 0));
        assert!(boundary.is_edge(1, 0), "threshold value itself is an edge");
        assert!(boundary.is_open(2, 0));
        assert!(boundary.is_open(3, 0));
        assert!(
            boundary
                .as_gray()
                .pixels()
                .all(|p| p.0[0] == EDGE || p.0[0] == OPEN)
        );
    }

    #[test]
    fn test_set_edge_reports_change() {
        let mut boundary = BoundaryMask::open(2, 2);
        assert!(boundary.set_edge(1, 1));
        assert!(!boundary.set_edge(1, 1));
        assert!(!boundary.set_edge(5, 5));
        assert_eq!(boundary.edge_count(), 1);
    }

    #[test]
    fn test_out_of_range_is_neither() {
        let boundary = BoundaryMask::open(2, 2);
        assert!(!boundary.is_open(2, 0));
        assert!(!boundary.is_edge(2, 0));
    }
}
