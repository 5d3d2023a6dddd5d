//! Annotate, save, then clean the saved user image.

use image::{GrayImage, Luma, Rgb};

use crate::cleanup::MaskCleanup;
use crate::model::default_palette;
use crate::raster::Point;
use crate::session::{AnnotationSession, SessionSettings};

#[test]
fn test_clean_saved_annotation() {
    let dir = tempfile::tempdir().unwrap();
    let entry = dir.path().join("frame.png");
    // Left 12 columns and right 7 columns separated by an edge at x = 12.
    GrayImage::from_fn(20, 12, |x, _| Luma([if x == 12 { 0 } else { 255 }]))
        .save(&entry)
        .unwrap();

    let mut session =
        AnnotationSession::with_static_boundary(default_palette(), SessionSettings::default());
    assert!(session.load_entry(&entry));
    assert!(session.fill(Point::new(2, 2)));
    assert!(session.select(2));
    assert!(session.fill(Point::new(15, 2)));
    assert!(session.save());

    let saved = dir.path().join("frame_ground_truth_user.png");
    let cleaned_path = MaskCleanup::new(default_palette(), 3)
        .clean_file(&saved)
        .unwrap();
    assert_eq!(cleaned_path, dir.path().join("frame_ground_truth_user_cleaned.png"));

    let cleaned = image::open(&cleaned_path).unwrap().to_rgb8();
    assert_eq!(*cleaned.get_pixel(5, 5), Rgb([255, 0, 0]));
    assert_eq!(*cleaned.get_pixel(16, 5), Rgb([0, 255, 0]));
    // No color claims the unset boundary column.
    assert_eq!(*cleaned.get_pixel(12, 5), Rgb([0, 0, 0]));
}
