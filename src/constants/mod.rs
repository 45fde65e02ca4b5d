//! Constants shared by the globe, clock and persistence layers

use std::f64::consts::PI;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Globe conventions
/// Offset added to every longitude before projection.
///
/// Aligns the catalog's prime meridian with the renderer's reference meridian.
/// Continent outlines, grid lines and city markers must all go through the same
/// offset or they will not line up.
pub const LONGITUDE_OFFSET_DEG: f64 = 180.0;
/// Radius of the rendered globe in scene units
pub const DEFAULT_GLOBE_RADIUS: f64 = 2.5;
/// Earth's axial tilt in degrees, used for the cosmetic terminator
pub const AXIAL_TILT_DEG: f64 = 23.44;

// Rotation
/// Fraction of the remaining angular distance covered per frame while tracking
pub const SMOOTHING_FACTOR: f64 = 0.15;
/// Yaw advance per frame while idle (radians)
pub const IDLE_YAW_STEP: f64 = 0.001;
/// Per-frame multiplier applied to pitch while idle
pub const PITCH_DAMPING: f64 = 0.95;

// Time
/// Interval between clock ticks in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1_000;

// Persistence
/// Key holding the JSON array of tracked city ids
pub const TRACKED_CITIES_KEY: &str = "tracked-city-ids";
/// Key holding the JSON boolean 12-hour preference
pub const TIME_FORMAT_KEY: &str = "time-format-preference";
/// Cities tracked on first run or after the stored list is lost
pub const DEFAULT_TRACKED_CITIES: [&str; 3] = ["new-york", "london", "tokyo"];
/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "CHRONOSPHERE_DATA_DIR";
