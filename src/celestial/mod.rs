//! Cosmetic sun position for the day/night shading
//!
//! Good enough to put the terminator roughly where it belongs; not an
//! ephemeris. The subsolar latitude follows a sine of the day of year scaled
//! by the axial tilt, and the subsolar longitude follows UTC time of day with
//! the sun over the prime meridian at 12:00 UTC.

use crate::constants::{AXIAL_TILT_DEG, DEG2RAD, TAU};
use crate::coordinates::angle::normalize_longitude;
use crate::coordinates::{project, Cartesian3, CoordinateError, GeoCoord};
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Degrees the subsolar point moves west per hour
const DEGREES_PER_HOUR: f64 = 15.0;

/// Day-of-year shift that puts the zero of the declination sine near the March equinox
const DECLINATION_DAY_OFFSET: f64 = 284.0;

/// The point on Earth with the sun directly overhead
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Subsolar latitude in degrees
    pub lat: f64,
    /// Subsolar longitude in degrees, in [-180, 180)
    pub lng: f64,
}

impl SunPosition {
    /// Approximate subsolar point at an instant
    pub fn at(instant: &DateTime<Utc>) -> Self {
        let day_of_year = instant.ordinal() as f64;
        let lat = AXIAL_TILT_DEG * (TAU * (DECLINATION_DAY_OFFSET + day_of_year) / 365.0).sin();

        let utc_hours = instant.hour() as f64
            + instant.minute() as f64 / 60.0
            + instant.second() as f64 / 3600.0;
        let lng = normalize_longitude(-(utc_hours - 12.0) * DEGREES_PER_HOUR);

        Self { lat, lng }
    }

    /// The subsolar point as a validated coordinate
    pub fn subsolar(&self) -> Result<GeoCoord, CoordinateError> {
        GeoCoord::new(self.lat, self.lng)
    }

    /// Position of the light source on a sphere of `radius`, in scene space
    pub fn direction(&self, radius: f64) -> Cartesian3 {
        project(self.lat, self.lng, radius)
    }

    /// Whether the sun is above the horizon at `coord`
    pub fn illuminates(&self, coord: &GeoCoord) -> bool {
        self.direction(1.0).dot(&coord.to_cartesian(1.0)) > 0.0
    }

    /// Angle between the subsolar point and `coord`, in radians
    pub fn angular_distance(&self, coord: &GeoCoord) -> f64 {
        self.direction(1.0).angular_distance(&coord.to_cartesian(1.0))
    }

    /// Solar elevation above the horizon at `coord`, in degrees
    pub fn elevation(&self, coord: &GeoCoord) -> f64 {
        90.0 - self.angular_distance(coord) / DEG2RAD
    }
}
