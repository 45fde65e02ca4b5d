//! # Angle wrapping helpers
//!
//! The globe's yaw accumulates without bound while idling, and targets are
//! computed in a different branch of the circle than the current yaw. These
//! helpers keep angles in a canonical range and measure the short way round.
//!
//! ```rust
//! use chronosphere::coordinates::angle::{shortest_delta, wrap_pi};
//! use std::f64::consts::PI;
//!
//! assert!((wrap_pi(3.0 * PI) - PI).abs() < 1e-12);
//! assert!((shortest_delta(0.9 * PI, -0.9 * PI) - 0.2 * PI).abs() < 1e-12);
//! ```

use crate::constants::TAU;
use std::f64::consts::PI;

/// Wraps an angle in radians into (-π, π]
pub fn wrap_pi(radians: f64) -> f64 {
    let mut wrapped = radians.rem_euclid(TAU);
    if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// Signed angle that moves `from` onto `to` the short way round, in (-π, π]
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    wrap_pi(to - from)
}

/// Wraps a longitude in degrees into [-180, 180)
pub fn normalize_longitude(lng_deg: f64) -> f64 {
    (lng_deg + 180.0).rem_euclid(360.0) - 180.0
}
