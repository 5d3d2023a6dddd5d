//! Annotation session: the working rasters of one playlist entry.
//!
//! The session owns the (boundary, user image, selected color) triple and
//! is the only place they are mutated. Every operation absorbs its own
//! failures: it logs what went wrong and returns `false`, so an interactive
//! loop never has to handle an error from a click.

mod source;

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

pub use source::{
    BoundarySource, CannyDepthEdges, DepthBoundary, DepthImage, EdgeDetector, StaticBoundary,
    depth_to_metres,
};

use crate::constants::{
    DEFAULT_BOUNDARY_THRESHOLD, DEFAULT_BRUSH_RADIUS, DEFAULT_RASTER_HEIGHT,
    DEFAULT_RASTER_WIDTH, DEFAULT_USER_IMAGE_SUFFIX,
};
use crate::error::{AnnotatorError, Result};
use crate::model::{ERASER_INDEX, Palette};
use crate::paths::user_image_path;
use crate::raster::{BoundaryMask, Point, UserImage};
use crate::tools::{BoundaryBrush, Connectivity, FloodFill};

/// Tunables fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Suffix of the persisted user image name
    pub user_image_suffix: String,
    /// Gray level above which a loaded boundary pixel is open
    pub boundary_threshold: u8,
    /// Radius of the boundary brush
    pub brush_radius: u32,
    /// Neighbourhood used by flood fill
    pub connectivity: Connectivity,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            user_image_suffix: DEFAULT_USER_IMAGE_SUFFIX.to_string(),
            boundary_threshold: DEFAULT_BOUNDARY_THRESHOLD,
            brush_radius: DEFAULT_BRUSH_RADIUS,
            connectivity: Connectivity::default(),
        }
    }
}

/// Working state for one image being annotated.
pub struct AnnotationSession {
    palette: Palette,
    settings: SessionSettings,
    source: Box<dyn BoundarySource>,
    engine: FloodFill,
    brush: BoundaryBrush,
    boundary: BoundaryMask,
    user_image: UserImage,
    selected: usize,
    entry: Option<PathBuf>,
}

impl AnnotationSession {
    /// Create a session with blank default-sized rasters and no entry.
    pub fn new(
        palette: Palette,
        settings: SessionSettings,
        source: Box<dyn BoundarySource>,
    ) -> Self {
        let boundary = BoundaryMask::open(DEFAULT_RASTER_WIDTH, DEFAULT_RASTER_HEIGHT);
        let user_image = UserImage::blank(
            DEFAULT_RASTER_WIDTH,
            DEFAULT_RASTER_HEIGHT,
            palette.unset(),
        );
        Self {
            selected: palette.default_selection(),
            engine: FloodFill::new(settings.connectivity),
            brush: BoundaryBrush::new(settings.brush_radius),
            palette,
            settings,
            source,
            boundary,
            user_image,
            entry: None,
        }
    }

    /// Session whose boundaries are read from grayscale image files.
    pub fn with_static_boundary(palette: Palette, settings: SessionSettings) -> Self {
        Self::new(palette, settings, Box::new(StaticBoundary::new()))
    }

    /// Session whose boundaries are detected in depth images.
    pub fn with_depth_boundary(
        palette: Palette,
        settings: SessionSettings,
        detector: Box<dyn EdgeDetector>,
    ) -> Self {
        Self::new(palette, settings, Box::new(DepthBoundary::new(detector)))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The palette painted with.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Session settings.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Identifier of the boundary source in use.
    pub fn source_id(&self) -> &'static str {
        self.source.id()
    }

    /// Current boundary raster.
    pub fn boundary(&self) -> &BoundaryMask {
        &self.boundary
    }

    /// Current user image.
    pub fn user_image(&self) -> &UserImage {
        &self.user_image
    }

    /// RGB background of the current entry, if any.
    pub fn background(&self) -> Option<&RgbImage> {
        self.source.background()
    }

    /// Currently selected palette index.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Color used by [`AnnotationSession::fill`].
    pub fn selected_color(&self) -> Rgb<u8> {
        self.palette.color(self.selected).unwrap_or_else(|| self.palette.unset())
    }

    /// The loaded playlist entry, if any.
    pub fn entry(&self) -> Option<&Path> {
        self.entry.as_deref()
    }

    /// Where the user image of the current entry is persisted.
    pub fn user_image_path(&self) -> Option<PathBuf> {
        self.entry
            .as_deref()
            .map(|entry| user_image_path(entry, &self.settings.user_image_suffix))
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Select the palette color used by subsequent fills.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.palette.len() {
            log::debug!("Palette index {} out of range, ignoring", index);
            return false;
        }
        self.selected = index;
        log::debug!(
            "Selected color {} ({})",
            index,
            self.palette.get(index).map_or("?", |c| c.name.as_str())
        );
        true
    }

    /// Flood fill the region under `point` with the selected color.
    pub fn fill(&mut self, point: Point) -> bool {
        let color = self.selected_color();
        self.engine
            .fill(&self.boundary, &mut self.user_image, point, color)
            .is_filled()
    }

    /// Flood fill the region under `point` with the eraser.
    pub fn erase(&mut self, point: Point) -> bool {
        let color = self.palette.color(ERASER_INDEX).unwrap_or_else(|| self.palette.unset());
        self.engine
            .fill(&self.boundary, &mut self.user_image, point, color)
            .is_filled()
    }

    /// Stamp the boundary brush at `point`.
    pub fn paint_boundary(&mut self, point: Point) -> bool {
        self.brush.paint(&mut self.boundary, point).is_painted()
    }

    /// Reset to the pristine state of the current entry.
    ///
    /// The user image is cleared and the boundary is reloaded from its source,
    /// discarding every brush stroke.
    pub fn clear(&mut self) -> bool {
        log::info!("Clearing annotation of {:?}", self.entry);
        let reloaded = match self.reload_boundary() {
            Ok(boundary) => Some(boundary),
            Err(e) => {
                log::warn!("Could not reload boundary for {:?}: {}", self.entry, e);
                None
            }
        };
        let ok = reloaded.is_some();
        let boundary = reloaded
            .unwrap_or_else(|| BoundaryMask::open(self.boundary.width(), self.boundary.height()));
        self.install(boundary, None);
        ok
    }

    /// Update edge detection thresholds and recompute the boundary.
    ///
    /// Only depth-derived sources accept thresholds. The user image is kept,
    /// brush strokes are replaced by the freshly detected edges.
    pub fn set_edge_thresholds(&mut self, low: f32, high: f32) -> bool {
        if !self.source.set_thresholds(low, high) {
            log::warn!(
                "Boundary source '{}' did not accept thresholds ({}, {})",
                self.source.id(),
                low,
                high
            );
            return false;
        }
        match self.source.compute_boundary(self.settings.boundary_threshold) {
            Ok(boundary) => {
                let user_image = self.user_image.clone();
                self.install(boundary, Some(user_image));
                true
            }
            Err(e) => {
                log::warn!("Could not recompute boundary: {}", e);
                false
            }
        }
    }

    // =========================================================================
    // Loading and saving
    // =========================================================================

    /// Install a new working pair.
    ///
    /// A user image of different dimensions is resized to the boundary with
    /// nearest-neighbour sampling; a missing one starts blank.
    pub fn install(&mut self, boundary: BoundaryMask, user_image: Option<UserImage>) {
        let (width, height) = boundary.dimensions();
        let user_image = match user_image {
            Some(image) if image.dimensions() != (width, height) => {
                log::info!(
                    "Resizing user image from {:?} to {:?}",
                    image.dimensions(),
                    (width, height)
                );
                image.resized(width, height)
            }
            Some(image) => image,
            None => UserImage::blank(width, height, self.palette.unset()),
        };
        log::debug!("Installed rasters ({}x{})", width, height);
        self.boundary = boundary;
        self.user_image = user_image;
    }

    /// Load `entry`: its boundary from the source and any prior annotation.
    ///
    /// If the boundary cannot be loaded the session falls back to an open
    /// boundary and returns false; editing continues either way.
    pub fn load_entry(&mut self, entry: &Path) -> bool {
        log::info!("Loading entry {:?}", entry);
        self.entry = Some(entry.to_path_buf());

        let prior = self.load_prior_annotation();
        match self.reload_boundary() {
            Ok(boundary) => {
                self.install(boundary, prior);
                true
            }
            Err(e) => {
                log::warn!("Could not load boundary for {:?}: {}", entry, e);
                let (width, height) = prior
                    .as_ref()
                    .map(UserImage::dimensions)
                    .unwrap_or((DEFAULT_RASTER_WIDTH, DEFAULT_RASTER_HEIGHT));
                self.install(BoundaryMask::open(width, height), prior);
                false
            }
        }
    }

    /// Persist the user image next to the entry.
    pub fn save(&self) -> bool {
        match self.try_save() {
            Ok(path) => {
                log::info!("Saved user image {:?}", path);
                true
            }
            Err(e) => {
                log::warn!("Could not save user image for {:?}: {}", self.entry, e);
                false
            }
        }
    }

    fn try_save(&self) -> Result<PathBuf> {
        let path = self
            .user_image_path()
            .ok_or(AnnotatorError::NoEntryLoaded {
                source_id: self.source.id(),
            })?;
        self.user_image.as_rgb().save(&path)?;
        Ok(path)
    }

    fn reload_boundary(&mut self) -> Result<BoundaryMask> {
        let entry = self
            .entry
            .clone()
            .ok_or(AnnotatorError::NoEntryLoaded {
                source_id: self.source.id(),
            })?;
        self.source.load_entry(&entry)?;
        self.source.compute_boundary(self.settings.boundary_threshold)
    }

    fn load_prior_annotation(&self) -> Option<UserImage> {
        let path = self.user_image_path()?;
        if !path.exists() {
            log::debug!("No prior annotation at {:?}", path);
            return None;
        }
        match image::open(&path) {
            Ok(image) => {
                log::debug!("Loaded prior annotation {:?}", path);
                Some(UserImage::from_rgb(image.to_rgb8()))
            }
            Err(e) => {
                log::warn!("Could not load prior annotation {:?}: {}", path, e);
                None
            }
        }
    }
}
