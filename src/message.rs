//! Action types for the annotator.
//!
//! Every key press, pointer event and text command is turned into an
//! [`Action`] before it reaches the session.

use std::path::PathBuf;

use crate::raster::Point;

/// Actions that can be sent to update annotator state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Editing
    /// Flood fill the region under a point with the selected color
    Fill(Point),
    /// Flood fill the region under a point with the eraser
    Erase(Point),
    /// Stamp the boundary brush at a point
    PaintBoundary(Point),
    /// Select a palette color by index
    SelectColor(usize),
    /// Reset the current entry to its pristine state
    Clear,
    /// Update depth edge detection thresholds
    SetEdgeThresholds {
        /// Lower threshold in metres
        low: f32,
        /// Upper threshold in metres
        high: f32,
    },

    // Navigation
    /// Navigate to next entry
    Next,
    /// Navigate to previous entry
    Prev,
    /// Navigate to the first entry
    First,
    /// Navigate to the last entry
    Last,
    /// Navigate to an entry by index
    Goto(usize),

    // Output
    /// Persist the user image
    Save,
    /// Write the current preview to a file
    ExportPreview(PathBuf),
    /// Save and end the session
    Quit,
}
