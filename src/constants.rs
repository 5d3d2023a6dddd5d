//! Global constants for the annotator

/// Boundary pixel value for an impassable edge
pub const EDGE: u8 = 0;

/// Boundary pixel value for a paintable pixel
pub const OPEN: u8 = 255;

/// Gray level above which a loaded boundary pixel counts as open
pub const DEFAULT_BOUNDARY_THRESHOLD: u8 = 128;

/// Suffix appended to the entry name for the persisted user image
pub const DEFAULT_USER_IMAGE_SUFFIX: &str = "_ground_truth_user";

/// Suffix appended to a user image name by the cleanup pipeline
pub const CLEANED_SUFFIX: &str = "_cleaned";

/// Extension of every raster the annotator writes
pub const OUTPUT_EXTENSION: &str = "png";

/// Radius of the disk stamped by the boundary brush
pub const DEFAULT_BRUSH_RADIUS: u32 = 3;

/// Side of the square structuring element used by the cleanup opening
pub const DEFAULT_CLEANUP_KERNEL_SIZE: u32 = 10;

/// Width of the blank raster used when no boundary can be loaded
pub const DEFAULT_RASTER_WIDTH: u32 = 640;

/// Height of the blank raster used when no boundary can be loaded
pub const DEFAULT_RASTER_HEIGHT: u32 = 480;

/// Gray used to draw boundary pixels in the preview
pub const PREVIEW_EDGE_GRAY: u8 = 100;

/// Suffix of the depth image belonging to an entry in depth mode
pub const DEPTH_SUFFIX: &str = "_depth.png";

/// Suffix of the RGB image belonging to an entry in depth mode
pub const RGB_SUFFIX: &str = "_rgb.png";

/// Depth quantization used before edge detection (levels per metre)
pub const DEPTH_LEVELS_PER_METRE: f32 = 25.0;

/// Default lower Canny threshold for depth edges, in metres
pub const DEFAULT_CANNY_LOW: f32 = 1.0;

/// Default upper Canny threshold for depth edges, in metres
pub const DEFAULT_CANNY_HIGH: f32 = 2.0;
