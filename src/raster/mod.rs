//! Fixed-size rasters the annotator works on.
//!
//! - [`BoundaryMask`]: two-level edge map constraining fills
//! - [`UserImage`]: palette-quantized color raster being painted
//! - [`BinaryMask`]: boolean pixel set (fill regions, cleanup masks)
//! - [`morphology`]: erosion, dilation and opening on binary masks

mod boundary;
mod mask;
pub mod morphology;
mod user_image;

pub use boundary::BoundaryMask;
pub use mask::BinaryMask;
pub use user_image::UserImage;

/// A pixel coordinate as delivered by the user, possibly outside the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to unsigned pixel coordinates if inside a `width` x `height` raster.
    pub fn to_pixel(self, width: u32, height: u32) -> Option<(u32, u32)> {
        let x = u32::try_from(self.x).ok()?;
        let y = u32::try_from(self.y).ok()?;
        (x < width && y < height).then_some((x, y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_to_pixel() {
        assert_eq!(Point::new(0, 0).to_pixel(4, 3), Some((0, 0)));
        assert_eq!(Point::new(3, 2).to_pixel(4, 3), Some((3, 2)));
        assert_eq!(Point::new(4, 2).to_pixel(4, 3), None);
        assert_eq!(Point::new(-1, 0).to_pixel(4, 3), None);
        assert_eq!(Point::new(0, 3).to_pixel(4, 3), None);
    }
}
