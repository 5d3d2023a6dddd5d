//! Free-hand boundary brush.

use image::Luma;
use imageproc::drawing::draw_filled_circle_mut;

use crate::constants::EDGE;
use crate::raster::{BoundaryMask, Point};

/// Result of a brush stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// A disk was stamped
    Painted {
        /// Pixels that turned from open to edge
        added: usize,
    },
    /// The point lies outside the raster
    OutOfBounds,
    /// The point already lies on a boundary pixel
    OnEdge,
}

impl PaintOutcome {
    /// True if the boundary was modified.
    pub fn is_painted(&self) -> bool {
        matches!(self, PaintOutcome::Painted { .. })
    }
}

/// Brush that stamps filled disks of edge pixels into a boundary.
///
/// The brush only adds edges. Strokes are undone by reloading the boundary.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryBrush {
    radius: u32,
}

impl BoundaryBrush {
    /// Create a brush with the given disk radius.
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    /// Stamp a disk centred on `point`, unless `point` is outside or already an edge.
    pub fn paint(&self, boundary: &mut BoundaryMask, point: Point) -> PaintOutcome {
        let (width, height) = boundary.dimensions();
        let Some((x, y)) = point.to_pixel(width, height) else {
            log::warn!("Brush point ({}, {}) is out of bounds, ignoring", point.x, point.y);
            return PaintOutcome::OutOfBounds;
        };
        if !boundary.is_open(x, y) {
            log::warn!("Brush point ({}, {}) is already an edge, ignoring", x, y);
            return PaintOutcome::OnEdge;
        }

        let before = boundary.edge_count();
        if self.radius == 0 {
            boundary.set_edge(x, y);
        } else {
            // a disk of radius width + height already covers the raster
            let cap = u64::from(width) + u64::from(height);
            let radius = i32::try_from(u64::from(self.radius).min(cap)).unwrap_or(i32::MAX);
            draw_filled_circle_mut(boundary.gray_mut(), (point.x, point.y), radius, Luma([EDGE]));
        }
        let added = boundary.edge_count() - before;

        log::debug!("Brush at ({}, {}) added {} edge pixels", x, y, added);
        PaintOutcome::Painted { added }
    }
}

impl Default for BoundaryBrush {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_BRUSH_RADIUS)
    }
}
