//! Boundary sources: where the edge map of a playlist entry comes from.
//!
//! A session owns one [`BoundarySource`] chosen at construction:
//!
//! - [`StaticBoundary`]: the entry is a grayscale boundary image on disk
//! - [`DepthBoundary`]: the entry names a depth image whose edges are
//!   detected by an [`EdgeDetector`], with tunable thresholds
//!
//! New sources can be added by implementing the trait and handing a boxed
//! instance to [`AnnotationSession::new`](super::AnnotationSession::new).

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage};
use imageproc::edges::canny;

use crate::constants::{DEFAULT_CANNY_HIGH, DEFAULT_CANNY_LOW, DEPTH_LEVELS_PER_METRE};
use crate::error::{AnnotatorError, Result};
use crate::paths::{depth_image_path, rgb_image_path};
use crate::raster::{BinaryMask, BoundaryMask};

/// Depth raster in metres.
pub type DepthImage = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Strategy producing the boundary raster of an entry.
pub trait BoundarySource {
    /// Unique identifier for this source (e.g. "static", "depth").
    fn id(&self) -> &'static str;

    /// Read the inputs of `entry` from disk, replacing any previous entry.
    fn load_entry(&mut self, entry: &Path) -> Result<()>;

    /// Compute the boundary of the loaded entry.
    ///
    /// `threshold` is the gray level above which a pixel counts as open,
    /// for sources that read gray boundaries.
    fn compute_boundary(&self, threshold: u8) -> Result<BoundaryMask>;

    /// RGB image to show under unset pixels, if the entry provides one.
    fn background(&self) -> Option<&RgbImage> {
        None
    }

    /// Update edge detection thresholds. Returns false if unsupported or invalid.
    fn set_thresholds(&mut self, _low: f32, _high: f32) -> bool {
        false
    }
}

/// Boundary read from a grayscale image file.
#[derive(Debug, Default)]
pub struct StaticBoundary {
    loaded: Option<GrayImage>,
}

impl StaticBoundary {
    /// Create a source with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoundarySource for StaticBoundary {
    fn id(&self) -> &'static str {
        "static"
    }

    fn load_entry(&mut self, entry: &Path) -> Result<()> {
        self.loaded = None;
        let gray = image::open(entry)?.to_luma8();
        log::debug!(
            "Loaded boundary {:?} ({}x{})",
            entry,
            gray.width(),
            gray.height()
        );
        self.loaded = Some(gray);
        Ok(())
    }

    fn compute_boundary(&self, threshold: u8) -> Result<BoundaryMask> {
        let gray = self
            .loaded
            .as_ref()
            .ok_or(AnnotatorError::NoEntryLoaded { source_id: "static" })?;
        Ok(BoundaryMask::from_gray(gray, threshold))
    }
}

/// Edge detection over a depth raster.
pub trait EdgeDetector {
    /// Mask of edge pixels in `depth`.
    fn detect(&self, depth: &DepthImage) -> BinaryMask;

    /// Current (low, high) thresholds.
    fn thresholds(&self) -> (f32, f32);

    /// Replace the thresholds. Returns false and keeps the old ones if invalid.
    fn set_thresholds(&mut self, low: f32, high: f32) -> bool;
}

/// Canny edges on depth quantized to [`DEPTH_LEVELS_PER_METRE`].
///
/// Thresholds are expressed in metres and scaled by the quantization factor
/// before reaching the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyDepthEdges {
    low: f32,
    high: f32,
}

impl CannyDepthEdges {
    /// Create a detector, clamping thresholds into a valid order.
    pub fn new(low: f32, high: f32) -> Self {
        let low = low.max(0.0);
        Self {
            low,
            high: high.max(low),
        }
    }

    /// Quantize a depth raster to 8 bits.
    pub fn quantize(depth: &DepthImage) -> GrayImage {
        GrayImage::from_fn(depth.width(), depth.height(), |x, y| {
            let metres = depth.get_pixel(x, y).0[0];
            Luma([(metres * DEPTH_LEVELS_PER_METRE).round().clamp(0.0, 255.0) as u8])
        })
    }
}

impl Default for CannyDepthEdges {
    fn default() -> Self {
        Self::new(DEFAULT_CANNY_LOW, DEFAULT_CANNY_HIGH)
    }
}

impl EdgeDetector for CannyDepthEdges {
    fn detect(&self, depth: &DepthImage) -> BinaryMask {
        let gray = Self::quantize(depth);
        let edges = canny(
            &gray,
            self.low * DEPTH_LEVELS_PER_METRE,
            self.high * DEPTH_LEVELS_PER_METRE,
        );
        BinaryMask::from_fn(edges.width(), edges.height(), |x, y| {
            edges.get_pixel(x, y).0[0] > 0
        })
    }

    fn thresholds(&self) -> (f32, f32) {
        (self.low, self.high)
    }

    fn set_thresholds(&mut self, low: f32, high: f32) -> bool {
        if !low.is_finite() || !high.is_finite() || low < 0.0 || high < low {
            log::warn!(
                "Invalid edge thresholds ({}, {}), keeping ({}, {})",
                low,
                high,
                self.low,
                self.high
            );
            return false;
        }
        self.low = low;
        self.high = high;
        true
    }
}

/// Convert a decoded depth file to metres.
///
/// 16-bit images hold millimetres. Anything else is read as 8-bit levels of
/// the quantization step.
pub fn depth_to_metres(image: DynamicImage) -> DepthImage {
    match image {
        DynamicImage::ImageLuma16(mm) => {
            DepthImage::from_fn(mm.width(), mm.height(), |x, y| {
                Luma([f32::from(mm.get_pixel(x, y).0[0]) / 1000.0])
            })
        }
        other => {
            let levels = other.to_luma8();
            DepthImage::from_fn(levels.width(), levels.height(), |x, y| {
                Luma([f32::from(levels.get_pixel(x, y).0[0]) / DEPTH_LEVELS_PER_METRE])
            })
        }
    }
}

/// Boundary derived from the edges of a depth image.
///
/// An entry `base` reads `base_depth.png` and, if present, `base_rgb.png`
/// as the preview background.
pub struct DepthBoundary {
    detector: Box<dyn EdgeDetector>,
    depth: Option<DepthImage>,
    rgb: Option<RgbImage>,
}

impl DepthBoundary {
    /// Create a source using `detector`.
    pub fn new(detector: Box<dyn EdgeDetector>) -> Self {
        Self {
            detector,
            depth: None,
            rgb: None,
        }
    }

    /// Current detector thresholds.
    pub fn thresholds(&self) -> (f32, f32) {
        self.detector.thresholds()
    }
}

impl Default for DepthBoundary {
    fn default() -> Self {
        Self::new(Box::new(CannyDepthEdges::default()))
    }
}

impl BoundarySource for DepthBoundary {
    fn id(&self) -> &'static str {
        "depth"
    }

    fn load_entry(&mut self, entry: &Path) -> Result<()> {
        self.depth = None;
        self.rgb = None;

        let depth_path = depth_image_path(entry);
        let depth = depth_to_metres(image::open(&depth_path)?);
        log::debug!(
            "Loaded depth {:?} ({}x{})",
            depth_path,
            depth.width(),
            depth.height()
        );
        self.depth = Some(depth);

        let rgb_path = rgb_image_path(entry);
        match image::open(&rgb_path) {
            Ok(rgb) => self.rgb = Some(rgb.to_rgb8()),
            Err(e) => log::debug!("No RGB image for {:?}: {}", entry, e),
        }
        Ok(())
    }

    fn compute_boundary(&self, _threshold: u8) -> Result<BoundaryMask> {
        let depth = self
            .depth
            .as_ref()
            .ok_or(AnnotatorError::NoEntryLoaded { source_id: "depth" })?;
        let (low, high) = self.detector.thresholds();
        log::debug!("Computing depth edges with thresholds ({}, {})", low, high);
        Ok(BoundaryMask::from_edges(&self.detector.detect(depth)))
    }

    fn background(&self) -> Option<&RgbImage> {
        self.rgb.as_ref()
    }

    fn set_thresholds(&mut self, low: f32, high: f32) -> bool {
        self.detector.set_thresholds(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Near plane on the left, far plane on the right.
    fn step_depth() -> DepthImage {
        DepthImage::from_fn(20, 10, |x, _| Luma([if x < 10 { 1.0 } else { 4.0 }]))
    }

    #[test]
    fn test_canny_finds_depth_step() {
        let edges = CannyDepthEdges::default().detect(&step_depth());
        assert!(!edges.is_clear());
        assert!(edges.iter_set().all(|(x, _)| (8..=11).contains(&x)));
    }

    #[test]
    fn test_flat_depth_has_no_edges() {
        let flat = DepthImage::from_pixel(12, 12, Luma([2.0]));
        assert!(CannyDepthEdges::default().detect(&flat).is_clear());
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let mut detector = CannyDepthEdges::default();
        assert!(!detector.set_thresholds(3.0, 1.0));
        assert!(!detector.set_thresholds(f32::NAN, 1.0));
        assert_eq!(detector.thresholds(), (DEFAULT_CANNY_LOW, DEFAULT_CANNY_HIGH));
        assert!(detector.set_thresholds(0.5, 1.5));
        assert_eq!(detector.thresholds(), (0.5, 1.5));
    }

    #[test]
    fn test_depth_to_metres_reads_millimetres() {
        let mm = ImageBuffer::<Luma<u16>, Vec<u16>>::from_pixel(2, 2, Luma([1500]));
        let metres = depth_to_metres(DynamicImage::ImageLuma16(mm));
        assert!((metres.get_pixel(0, 0).0[0] - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_compute_without_entry_fails() {
        assert!(StaticBoundary::new().compute_boundary(128).is_err());
        assert!(DepthBoundary::default().compute_boundary(128).is_err());
    }
}
