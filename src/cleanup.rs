//! Offline cleanup of painted user images.
//!
//! Each palette color is extracted as an exact-match mask, opened with a
//! square element to drop specks and thin strokes, and stamped back in
//! palette order, later colors over earlier ones. Opening never grows a
//! mask, so the per-color results stay disjoint and cleaning an already
//! cleaned image changes nothing.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbImage};

use crate::constants::DEFAULT_CLEANUP_KERNEL_SIZE;
use crate::error::Result;
use crate::model::Palette;
use crate::paths::cleaned_path;
use crate::raster::UserImage;
use crate::raster::morphology::{StructuringElement, open};

/// Per-color morphological cleanup of user images.
#[derive(Debug, Clone)]
pub struct MaskCleanup {
    palette: Palette,
    element: StructuringElement,
}

/// Outcome of [`MaskCleanup::run_batch`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Written outputs
    pub cleaned: Vec<PathBuf>,
    /// Inputs that could not be read or written
    pub skipped: Vec<PathBuf>,
}

impl MaskCleanup {
    /// Create a pipeline opening with a `kernel_size` square.
    pub fn new(palette: Palette, kernel_size: u32) -> Self {
        Self {
            palette,
            element: StructuringElement::square(kernel_size),
        }
    }

    /// The structuring element in use.
    pub fn element(&self) -> StructuringElement {
        self.element
    }

    /// Clean a painted raster.
    pub fn clean(&self, painted: &RgbImage) -> RgbImage {
        let input = UserImage::from_rgb(painted.clone());
        let (width, height) = input.dimensions();
        let mut output = UserImage::blank(width, height, self.palette.unset());

        for color in self.palette.iter() {
            let mask = input.color_mask(color.rgb());
            if mask.is_clear() {
                continue;
            }
            let cleaned = open(&mask, self.element);
            let kept = output.fill_mask(&cleaned, color.rgb());
            log::trace!(
                "{}: {} painted, {} kept",
                color.name,
                mask.count(),
                kept
            );
        }

        output.into_rgb()
    }

    /// Clean the user image at `path` and write `<base>_cleaned.png`.
    pub fn clean_file(&self, path: &Path) -> Result<PathBuf> {
        let painted = image::open(path)?.to_rgb8();
        let cleaned = self.clean(&painted);

        let output = cleaned_path(path);
        let writer = BufWriter::new(File::create(&output)?);
        let encoder =
            PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive);
        encoder.write_image(
            cleaned.as_raw(),
            cleaned.width(),
            cleaned.height(),
            ExtendedColorType::Rgb8,
        )?;
        Ok(output)
    }

    /// Clean every file in `paths`, skipping the ones that fail.
    pub fn run_batch<P: AsRef<Path>>(&self, paths: &[P]) -> BatchReport {
        let mut report = BatchReport::default();
        for path in paths {
            let path = path.as_ref();
            match self.clean_file(path) {
                Ok(output) => {
                    log::info!("Cleaned {:?} -> {:?}", path, output);
                    report.cleaned.push(output);
                }
                Err(e) => {
                    log::warn!("Skipping {:?}: {}", path, e);
                    report.skipped.push(path.to_path_buf());
                }
            }
        }
        report
    }
}

impl Default for MaskCleanup {
    fn default() -> Self {
        Self::new(Palette::default(), DEFAULT_CLEANUP_KERNEL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;
    use crate::model::default_palette;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);

    fn cleanup(size: u32) -> MaskCleanup {
        MaskCleanup::new(default_palette(), size)
    }

    #[test]
    fn test_isolated_speck_removed() {
        let mut painted = RgbImage::from_pixel(9, 9, BLACK);
        painted.put_pixel(4, 4, RED);
        let cleaned = cleanup(3).clean(&painted);
        assert_eq!(cleaned, RgbImage::from_pixel(9, 9, BLACK));
    }

    #[test]
    fn test_large_region_survives() {
        let painted = RgbImage::from_fn(20, 20, |x, _| if x < 12 { RED } else { BLACK });
        let cleaned = cleanup(5).clean(&painted);
        assert_eq!(cleaned, painted);
    }

    #[test]
    fn test_unknown_colors_become_unset() {
        let painted = RgbImage::from_pixel(6, 6, Rgb([12, 34, 56]));
        let cleaned = cleanup(3).clean(&painted);
        assert!(cleaned.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_clean_is_deterministic() {
        let painted = RgbImage::from_fn(16, 16, |x, y| match (x * 7 + y * 3) % 5 {
            0 => RED,
            1 => GREEN,
            _ => BLACK,
        });
        let cleanup = cleanup(3);
        assert_eq!(cleanup.clean(&painted), cleanup.clean(&painted));
    }

    #[test]
    fn test_adjacent_regions_keep_their_pixels() {
        // Even element: erosion and dilation windows are asymmetric.
        let painted = RgbImage::from_fn(16, 16, |x, _| if x < 8 { RED } else { GREEN });
        let cleaned = cleanup(4).clean(&painted);
        for x in 0..16 {
            let expected = if x < 8 { RED } else { GREEN };
            assert_eq!(*cleaned.get_pixel(x, 8), expected, "column {x}");
        }
    }

    #[test]
    fn test_batch_skips_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a_ground_truth_user.png");
        let bad = dir.path().join("b_ground_truth_user.png");
        let mut painted = RgbImage::from_pixel(12, 12, RED);
        painted.put_pixel(0, 0, GREEN);
        painted.save(&good).unwrap();
        std::fs::write(&bad, b"not a png").unwrap();

        let report = cleanup(3).run_batch(&[good.clone(), bad.clone()]);
        let expected = dir.path().join("a_ground_truth_user_cleaned.png");
        assert_eq!(report.cleaned, vec![expected.clone()]);
        assert_eq!(report.skipped, vec![bad]);

        // The green speck is dropped and the notch it leaves in red stays unset.
        let written = image::open(&expected).unwrap().to_rgb8();
        assert_eq!(*written.get_pixel(0, 0), BLACK);
        assert_eq!(written.pixels().filter(|p| **p == RED).count(), 12 * 12 - 1);
    }
}
