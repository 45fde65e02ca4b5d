//! Globe re-orientation toward a selected city
//!
//! The controller is a two-state machine. While [`RotationTarget::Idle`] the
//! globe spins slowly about its polar axis and any leftover tilt relaxes
//! toward zero. While [`RotationTarget::Tracking`] yaw and pitch close a fixed
//! fraction of the remaining distance every frame, which converges without
//! overshoot and never quite lands.
//!
//! Selecting another city replaces the target outright; the next frame starts
//! converging toward it from wherever the globe is. There is no cancellation
//! beyond that.
//!
//! [`RotationController::step`] runs once per rendered frame and is unrelated
//! to the 1 Hz clock tick.

use crate::catalogs::{CityDirectory, CityRecord};
use crate::constants::{IDLE_YAW_STEP, PITCH_DAMPING, SMOOTHING_FACTOR};
use crate::coordinates::angle::{shortest_delta, wrap_pi};
use crate::coordinates::{facing_orientation, CoordinateError};
use log::debug;

pub use crate::coordinates::Orientation;

/// Where the globe is heading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RotationTarget {
    /// No selection: auto-rotate and let pitch decay
    #[default]
    Idle,
    /// Converge on these angles (radians)
    Tracking { yaw: f64, pitch: f64 },
}

impl RotationTarget {
    pub fn is_tracking(&self) -> bool {
        matches!(self, RotationTarget::Tracking { .. })
    }
}

/// Per-frame tuning for the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSettings {
    /// Fraction of the remaining distance covered per frame while tracking, in (0, 1]
    pub smoothing: f64,
    /// Yaw added per frame while idle (radians)
    pub idle_yaw_step: f64,
    /// Multiplier applied to pitch per frame while idle, in [0, 1)
    pub pitch_damping: f64,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            smoothing: SMOOTHING_FACTOR,
            idle_yaw_step: IDLE_YAW_STEP,
            pitch_damping: PITCH_DAMPING,
        }
    }
}

/// Drives the globe orientation one frame at a time
#[derive(Debug, Clone, Default)]
pub struct RotationController {
    settings: RotationSettings,
    orientation: Orientation,
    target: RotationTarget,
    selected: Option<String>,
}

impl RotationController {
    pub fn new(settings: RotationSettings) -> Self {
        Self {
            settings,
            orientation: Orientation::default(),
            target: RotationTarget::Idle,
            selected: None,
        }
    }

    /// Start from a given orientation instead of the rest position
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Orientation::new(wrap_pi(orientation.yaw), orientation.pitch);
        self
    }

    /// Select a city by id, or clear the selection with `None`
    ///
    /// The id is resolved through `directory` before any angles are computed.
    /// An id that does not resolve is a no-op returning false; the current
    /// target, idle or not, stays in place.
    pub fn select(&mut self, id: Option<&str>, directory: &CityDirectory) -> bool {
        let Some(id) = id else {
            self.clear();
            return true;
        };

        match directory.by_id(id) {
            Some(city) => match self.track(city) {
                Ok(()) => true,
                Err(e) => {
                    debug!("Cannot track {}: {}", id, e);
                    false
                }
            },
            None => {
                debug!("Ignoring selection of unknown city id {:?}", id);
                false
            }
        }
    }

    /// Point the globe at a city record
    pub fn track(&mut self, city: &CityRecord) -> Result<(), CoordinateError> {
        let facing = facing_orientation(&city.coord()?);
        debug!(
            "Tracking {} (yaw {:.4}, pitch {:.4})",
            city.id, facing.yaw, facing.pitch
        );
        self.target = RotationTarget::Tracking {
            yaw: facing.yaw,
            pitch: facing.pitch,
        };
        self.selected = Some(city.id.clone());
        Ok(())
    }

    /// Replace the target wholesale
    ///
    /// The selected city is forgotten; use [`Self::select`] or [`Self::track`]
    /// to target a catalog city.
    pub fn retarget(&mut self, target: RotationTarget) {
        self.target = match target {
            RotationTarget::Tracking { yaw, pitch } => RotationTarget::Tracking {
                yaw: wrap_pi(yaw),
                pitch,
            },
            RotationTarget::Idle => RotationTarget::Idle,
        };
        self.selected = None;
    }

    /// Drop the target and fall back to idle rotation
    pub fn clear(&mut self) {
        if self.target.is_tracking() {
            debug!("Rotation target cleared, idling");
        }
        self.target = RotationTarget::Idle;
        self.selected = None;
    }

    /// Advance one frame and return the new orientation
    pub fn step(&mut self) -> Orientation {
        let s = &self.settings;
        let current = self.orientation;

        self.orientation = match self.target {
            RotationTarget::Tracking { yaw, pitch } => Orientation::new(
                wrap_pi(current.yaw + s.smoothing * shortest_delta(current.yaw, yaw)),
                current.pitch + s.smoothing * (pitch - current.pitch),
            ),
            RotationTarget::Idle => Orientation::new(
                wrap_pi(current.yaw + s.idle_yaw_step),
                current.pitch * s.pitch_damping,
            ),
        };
        self.orientation
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn target(&self) -> RotationTarget {
        self.target
    }

    pub fn settings(&self) -> &RotationSettings {
        &self.settings
    }

    /// Id of the city being tracked, if the target came from the catalog
    pub fn selected_city(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_tracking(&self) -> bool {
        self.target.is_tracking()
    }

    /// Remaining angular distance to the target, `None` while idle
    ///
    /// Yaw is measured the short way round.
    pub fn distance_to_target(&self) -> Option<f64> {
        match self.target {
            RotationTarget::Tracking { yaw, pitch } => Some(
                shortest_delta(self.orientation.yaw, yaw).hypot(pitch - self.orientation.pitch),
            ),
            RotationTarget::Idle => None,
        }
    }
}
