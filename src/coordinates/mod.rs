//! Geographic coordinates and their projection onto the globe
//!
//! Every lat/lng to scene conversion in the crate goes through [`project`], so
//! the longitude offset convention (see [`LONGITUDE_OFFSET_DEG`]) is applied in
//! exactly one place. [`facing_orientation`] is its angular inverse: the globe
//! orientation that brings a coordinate onto the forward reference axis.

pub mod angle;
pub mod cartesian;

pub use cartesian::Cartesian3;

use crate::constants::{DEG2RAD, LONGITUDE_OFFSET_DEG};
use thiserror::Error;

/// Error raised for coordinates outside the geographic domain
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Coordinate out of range: lat={lat}, lng={lng} (expected lat in [-90, 90], lng in [-180, 180])")]
    OutOfRange { lat: f64, lng: f64 },
}

/// A validated geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoord {
    lat: f64,
    lng: f64,
}

impl GeoCoord {
    /// Create a coordinate, rejecting NaN and out-of-range values
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Ok(Self { lat, lng })
        } else {
            Err(CoordinateError::OutOfRange { lat, lng })
        }
    }

    /// Latitude in degrees
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Point on a sphere of the given radius
    pub fn to_cartesian(&self, radius: f64) -> Cartesian3 {
        project(self.lat, self.lng, radius)
    }
}

/// Globe orientation as a yaw/pitch pair in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Rotation about the vertical axis
    pub yaw: f64,
    /// Rotation about the horizontal X axis
    pub pitch: f64,
}

impl Orientation {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Apply this orientation to a scene point
    pub fn apply(&self, point: &Cartesian3) -> Cartesian3 {
        point.oriented(self.yaw, self.pitch)
    }
}

/// Project a latitude/longitude in degrees onto a sphere of `radius`
///
/// The polar axis is +Y. Longitude is shifted by [`LONGITUDE_OFFSET_DEG`]
/// before conversion:
///
/// - `phi = (90 - lat)` (polar angle)
/// - `theta = (lng + 180)`
/// - `x = -r sin(phi) cos(theta)`
/// - `y = r cos(phi)`
/// - `z = r sin(phi) sin(theta)`
///
/// Poles are ordinary inputs; nothing here divides.
///
/// # Examples
///
/// ```rust
/// use chronosphere::coordinates::project;
///
/// let p = project(0.0, 0.0, 1.0);
/// // The prime meridian on the equator sits on +X
/// assert!((p.x - 1.0).abs() < 1e-12);
/// assert!(p.y.abs() < 1e-12 && p.z.abs() < 1e-12);
/// ```
pub fn project(lat: f64, lng: f64, radius: f64) -> Cartesian3 {
    let phi = (90.0 - lat) * DEG2RAD;
    let theta = (lng + LONGITUDE_OFFSET_DEG) * DEG2RAD;

    Cartesian3::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Orientation that places `coord` on the forward reference axis
///
/// Solves the yaw that zeroes the point's horizontal offset and the pitch
/// that centers its latitude. Yaw is wrapped into (-π, π].
pub fn facing_orientation(coord: &GeoCoord) -> Orientation {
    let theta = (coord.lng() + LONGITUDE_OFFSET_DEG) * DEG2RAD;
    Orientation {
        yaw: angle::wrap_pi(std::f64::consts::FRAC_PI_2 - theta),
        pitch: coord.lat() * DEG2RAD,
    }
}
