//! Edge-constrained flood fill.

use std::collections::VecDeque;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::raster::{BinaryMask, BoundaryMask, Point, UserImage};

/// Neighbourhood used when growing a region.
///
/// With [`Connectivity::Four`] a boundary line one pixel wide is leak-proof
/// even when it runs diagonally. [`Connectivity::Eight`] slips through the
/// corners of such lines and needs boundaries drawn 4-connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Horizontal and vertical neighbours
    #[default]
    Four,
    /// Horizontal, vertical and diagonal neighbours
    Eight,
}

impl Connectivity {
    /// Neighbour offsets for this connectivity.
    fn offsets(self) -> &'static [(i64, i64)] {
        const FOUR: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(i64, i64); 8] = [
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
            (-1, -1),
            (1, -1),
            (-1, 1),
            (1, 1),
        ];
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

/// Result of a fill request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The region was colored
    Filled {
        /// Number of pixels in the region
        pixels: usize,
    },
    /// The seed lies outside the raster
    OutOfBounds,
    /// The seed lies on a boundary pixel
    OnEdge,
}

impl FillOutcome {
    /// True if pixels were written.
    pub fn is_filled(&self) -> bool {
        matches!(self, FillOutcome::Filled { .. })
    }
}

/// The open region containing `seed`, or `None` if the seed is out of bounds or on an edge.
///
/// Breadth-first growth over open pixels; the visited mask is the result, so
/// the region does not depend on traversal order.
pub fn region(
    boundary: &BoundaryMask,
    seed: Point,
    connectivity: Connectivity,
) -> Option<BinaryMask> {
    let (width, height) = boundary.dimensions();
    let (sx, sy) = seed.to_pixel(width, height)?;
    if !boundary.is_open(sx, sy) {
        return None;
    }

    let mut visited = BinaryMask::new(width, height);
    let mut queue = VecDeque::new();
    visited.set(sx, sy, true);
    queue.push_back((sx, sy));

    while let Some((x, y)) = queue.pop_front() {
        for &(dx, dy) in connectivity.offsets() {
            let nx = i64::from(x) + dx;
            let ny = i64::from(y) + dy;
            if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if !visited.get(nx, ny) && boundary.is_open(nx, ny) {
                visited.set(nx, ny, true);
                queue.push_back((nx, ny));
            }
        }
    }

    Some(visited)
}

/// Flood fill engine bound to a connectivity.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloodFill {
    connectivity: Connectivity,
}

impl FloodFill {
    /// Create an engine using `connectivity`.
    pub fn new(connectivity: Connectivity) -> Self {
        Self { connectivity }
    }

    /// Connectivity used by this engine.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Color the open region of `boundary` containing `seed` with `color`.
    ///
    /// Seeds outside the raster or on an edge are rejected without touching
    /// `image`. Pixels outside the region are never written.
    pub fn fill(
        &self,
        boundary: &BoundaryMask,
        image: &mut UserImage,
        seed: Point,
        color: Rgb<u8>,
    ) -> FillOutcome {
        let (width, height) = boundary.dimensions();
        let Some((x, y)) = seed.to_pixel(width, height) else {
            log::warn!("Fill seed ({}, {}) is out of bounds, ignoring", seed.x, seed.y);
            return FillOutcome::OutOfBounds;
        };
        let Some(region) = region(boundary, seed, self.connectivity) else {
            log::warn!("Fill seed ({}, {}) is on an edge, ignoring", x, y);
            return FillOutcome::OnEdge;
        };

        let pixels = image.fill_mask(&region, color);
        log::debug!("Filled {} pixels from ({}, {}) with {:?}", pixels, x, y, color.0);
        FillOutcome::Filled { pixels }
    }
}
