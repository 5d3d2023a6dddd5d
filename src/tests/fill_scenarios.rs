//! Fill and paint scenarios on hand-built boundaries.

use image::Rgb;

use crate::model::default_palette;
use crate::raster::{BoundaryMask, Point};
use crate::session::{AnnotationSession, SessionSettings};
use crate::tools::Connectivity;

const UNSET: Rgb<u8> = Rgb([0, 0, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

fn session_with(boundary: BoundaryMask, connectivity: Connectivity) -> AnnotationSession {
    let settings = SessionSettings {
        connectivity,
        brush_radius: 0,
        ..SessionSettings::default()
    };
    let mut session = AnnotationSession::with_static_boundary(default_palette(), settings);
    session.install(boundary, None);
    session
}

/// 10x10 open grid split by the edge line x == y.
fn diagonal_boundary() -> BoundaryMask {
    let mut boundary = BoundaryMask::open(10, 10);
    for i in 0..10 {
        boundary.set_edge(i, i);
    }
    boundary
}

#[test]
fn test_diagonal_split_two_colors() {
    let mut session = session_with(diagonal_boundary(), Connectivity::Four);

    assert!(session.select(1));
    assert!(session.fill(Point::new(7, 2)));
    assert!(session.select(3));
    assert!(session.fill(Point::new(2, 7)));

    let user = session.user_image();
    for y in 0..10 {
        for x in 0..10 {
            let expected = match x.cmp(&y) {
                std::cmp::Ordering::Greater => RED,
                std::cmp::Ordering::Less => BLUE,
                std::cmp::Ordering::Equal => UNSET,
            };
            assert_eq!(user.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
    assert_eq!(user.count_color(RED), 45);
    assert_eq!(user.count_color(BLUE), 45);
}

#[test]
fn test_diagonal_line_leaks_with_eight_connectivity() {
    let mut session = session_with(diagonal_boundary(), Connectivity::Eight);
    assert!(session.fill(Point::new(7, 2)));
    assert_eq!(session.user_image().count_color(RED), 90);
}

#[test]
fn test_seeds_in_one_region_agree() {
    let mut a = session_with(diagonal_boundary(), Connectivity::Four);
    let mut b = session_with(diagonal_boundary(), Connectivity::Four);
    a.fill(Point::new(1, 0));
    b.fill(Point::new(9, 8));
    assert_eq!(a.user_image(), b.user_image());
}

#[test]
fn test_erase_hole_inside_red_square() {
    // Outline enclosing the 5x5 square [3, 7] x [3, 7].
    let mut boundary = BoundaryMask::open(11, 11);
    for i in 2..=8 {
        boundary.set_edge(i, 2);
        boundary.set_edge(i, 8);
        boundary.set_edge(2, i);
        boundary.set_edge(8, i);
    }
    let mut session = session_with(boundary, Connectivity::Four);

    assert_eq!(session.selected_index(), 1);
    assert!(session.fill(Point::new(5, 5)));
    assert_eq!(session.user_image().count_color(RED), 25);

    // Brush a ring around the 2x2 sub-square [4, 5] x [4, 5].
    for i in 3..=6 {
        for (x, y) in [(i, 3), (i, 6), (3, i), (6, i)] {
            session.paint_boundary(Point::new(x, y));
        }
    }
    assert!(session.erase(Point::new(4, 4)));

    let user = session.user_image();
    for y in 3..=7u32 {
        for x in 3..=7u32 {
            let in_hole = (4..=5).contains(&x) && (4..=5).contains(&y);
            let expected = if in_hole { UNSET } else { RED };
            assert_eq!(user.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
    assert_eq!(user.count_color(RED), 21);
}

#[test]
fn test_fill_on_edge_changes_nothing() {
    let mut session = session_with(diagonal_boundary(), Connectivity::Four);
    let before = session.user_image().clone();
    assert!(!session.fill(Point::new(4, 4)));
    assert!(!session.fill(Point::new(-1, 3)));
    assert_eq!(session.user_image(), &before);
}

#[test]
fn test_brush_only_grows_edges() {
    let mut session = session_with(diagonal_boundary(), Connectivity::Four);
    let before = session.boundary().edges();
    assert!(session.paint_boundary(Point::new(0, 5)));
    assert!(!session.paint_boundary(Point::new(5, 5)));
    assert!(!session.paint_boundary(Point::new(20, 5)));

    let after = session.boundary().edges();
    assert!(before.iter_set().all(|(x, y)| after.get(x, y)));
    assert_eq!(after.count(), before.count() + 1);
}
