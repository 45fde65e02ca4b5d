//! # Cartesian Coordinate Module
//!
//! This module provides the 3D point type handed to the renderer for city
//! markers, grid lines and the light direction.
//!
//! ## Coordinate System Convention
//!
//! The scene uses a right-handed system with the polar axis vertical:
//! - **Y-axis**: Points toward the north pole (lat = +90°)
//! - **Z-axis**: Points toward the viewer; this is the forward reference
//!   direction a tracked city is rotated onto
//! - **X-axis**: Completes the right-handed frame
//!
//! ## Globe Orientation
//!
//! The globe is oriented by a `(yaw, pitch)` pair. Yaw is a rotation about the
//! vertical Y axis and is applied first; pitch is a rotation about the X axis
//! and is applied second. [`Cartesian3::oriented`] applies both, which is what
//! the renderer does to every point on the sphere each frame.
//!
//! ## Examples
//!
//! ```rust
//! use chronosphere::coordinates::cartesian::Cartesian3;
//!
//! let north_pole = Cartesian3::new(0.0, 1.0, 0.0);
//! let forward = Cartesian3::forward();
//!
//! // Perpendicular directions
//! assert_eq!(north_pole.dot(&forward), 0.0);
//! ```

use nalgebra::{Rotation3, Vector3};

/// Three-dimensional point or direction in scene space
///
/// Components are stored exactly as given, with no normalization, so the
/// same type carries marker positions (length = globe radius) and unit
/// directions (length = 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian3 {
    /// X-component
    pub x: f64,
    /// Y-component (toward the north pole)
    pub y: f64,
    /// Z-component (toward the viewer)
    pub z: f64,
}

impl Cartesian3 {
    /// Creates a new Cartesian coordinate
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chronosphere::coordinates::cartesian::Cartesian3;
    ///
    /// let coord = Cartesian3::new(1.0, 2.0, 3.0);
    /// assert_eq!(coord.x, 1.0);
    /// assert_eq!(coord.y, 2.0);
    /// assert_eq!(coord.z, 3.0);
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Unit vector along the forward reference axis (+Z, toward the viewer)
    pub fn forward() -> Self {
        Cartesian3::new(0.0, 0.0, 1.0)
    }

    /// Calculates the magnitude (length) of the vector
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chronosphere::coordinates::cartesian::Cartesian3;
    ///
    /// let coord = Cartesian3::new(3.0, 4.0, 0.0);
    /// assert_eq!(coord.magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Angle between two vectors in radians, in [0, π]
    ///
    /// The cosine is clamped before `acos` so rounding on nearly parallel
    /// vectors cannot produce NaN. Returns 0 when either vector is zero.
    pub fn angular_distance(&self, other: &Cartesian3) -> f64 {
        let mags = self.magnitude() * other.magnitude();
        if mags == 0.0 {
            return 0.0;
        }
        (self.dot(other) / mags).clamp(-1.0, 1.0).acos()
    }

    /// Applies the globe orientation to this point
    ///
    /// Rotates by `yaw` about the vertical axis, then by `pitch` about the
    /// X axis. Both angles are in radians.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chronosphere::coordinates::cartesian::Cartesian3;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// // A quarter turn of yaw brings +X onto -Z
    /// let turned = Cartesian3::new(1.0, 0.0, 0.0).oriented(FRAC_PI_2, 0.0);
    /// assert!(turned.x.abs() < 1e-12);
    /// assert!((turned.z + 1.0).abs() < 1e-12);
    /// ```
    pub fn oriented(&self, yaw: f64, pitch: f64) -> Cartesian3 {
        let yaw_rot = Rotation3::from_axis_angle(&Vector3::y_axis(), yaw);
        let pitch_rot = Rotation3::from_axis_angle(&Vector3::x_axis(), pitch);
        Cartesian3::from_vector3(pitch_rot * (yaw_rot * self.to_vector3()))
    }

    /// Converts to nalgebra Vector3
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3::new(vec.x, vec.y, vec.z)
    }
}
