//! Editing tools that act on a (boundary, user image) pair.

mod boundary_paint;
mod flood_fill;

pub use boundary_paint::{BoundaryBrush, PaintOutcome};
pub use flood_fill::{Connectivity, FillOutcome, FloodFill, region};
