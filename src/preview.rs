//! Composite view of a session for display or export.

use image::{Rgb, RgbImage};

use crate::constants::PREVIEW_EDGE_GRAY;
use crate::session::AnnotationSession;

/// Render the user image over the entry background with boundaries drawn gray.
///
/// Unset pixels show the background when one is loaded and has matching
/// dimensions; otherwise they keep the unset color.
pub fn render_preview(session: &AnnotationSession) -> RgbImage {
    let user = session.user_image().as_rgb();
    let boundary = session.boundary();
    let unset = session.palette().unset();
    let background = session
        .background()
        .filter(|bg| bg.dimensions() == user.dimensions());

    RgbImage::from_fn(user.width(), user.height(), |x, y| {
        if boundary.is_edge(x, y) {
            return Rgb([PREVIEW_EDGE_GRAY; 3]);
        }
        let painted = *user.get_pixel(x, y);
        match background {
            Some(bg) if painted == unset => *bg.get_pixel(x, y),
            _ => painted,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_palette;
    use crate::raster::{BoundaryMask, Point};
    use crate::session::SessionSettings;

    #[test]
    fn test_preview_draws_edges_and_paint() {
        let mut session =
            AnnotationSession::with_static_boundary(default_palette(), SessionSettings::default());
        let mut boundary = BoundaryMask::open(6, 4);
        for y in 0..4 {
            boundary.set_edge(3, y);
        }
        session.install(boundary, None);
        session.fill(Point::new(0, 0));

        let preview = render_preview(&session);
        assert_eq!(*preview.get_pixel(3, 2), Rgb([PREVIEW_EDGE_GRAY; 3]));
        assert_eq!(*preview.get_pixel(1, 1), Rgb([255, 0, 0]));
        assert_eq!(*preview.get_pixel(5, 1), Rgb([0, 0, 0]));
    }
}
