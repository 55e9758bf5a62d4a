//! Compile-time configuration of the rendering pipeline.

use crate::tables::CameraId;

/// Camera identifiers in left-to-right mosaic order.
pub const CAMERA_IDS: [CameraId; 5] = [1, 2, 3, 4, 5];

/// BEV extent along x (forward/back), meters.
pub const X_MIN: f64 = -60.0;
pub const X_MAX: f64 = 60.0;
/// BEV extent along y (left/right), meters.
pub const Y_MIN: f64 = -40.0;
pub const Y_MAX: f64 = 40.0;

/// Raster scale of the BEV plot area.
pub const PIXELS_PER_METER: f64 = 5.0;
/// Upper bound accepted for the BEV raster scale.
pub const MAX_PIXELS_PER_METER: f64 = 50.0;
/// Upper bound on either side of the BEV plot area, pixels.
pub const MAX_BEV_SIDE: u32 = 8192;
/// Blank border around the BEV plot area, pixels.
pub const BEV_MARGIN: u32 = 24;
/// Spacing of the dashed BEV grid, meters.
pub const GRID_STEP_M: f64 = 10.0;
/// Radius of the ego marker, pixels.
pub const EGO_MARKER_RADIUS: i32 = 3;

/// Playback rate of the output animation.
pub const DEFAULT_FPS: u32 = 10;

/// Progress is logged every this many index positions.
pub const FRAME_REPORT_INTERVAL: usize = 20;
