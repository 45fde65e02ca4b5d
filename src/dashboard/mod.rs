//! Dashboard composition
//!
//! [`Dashboard`] owns one of each component and is the only place they meet.
//! Each piece of state still has a single owner: the directory is read-only,
//! the favorites store owns the tracked ids, the time engine owns the instant
//! and the hour cycle, and the rotation controller owns the globe orientation.
//! Hosts drive two loops against it: [`Dashboard::frame`] once per rendered
//! frame and [`Dashboard::tick`] once per second.

use crate::catalogs::{CityDirectory, CityRecord};
use crate::celestial::SunPosition;
use crate::constants::DEFAULT_GLOBE_RADIUS;
use crate::coordinates::Cartesian3;
use crate::favorites::FavoritesStore;
use crate::rotation::{Orientation, RotationController, RotationSettings};
use crate::storage::SharedStore;
use crate::time::{Clock, HourCycle, TimeEngine};
use crate::Result;
use chrono::{DateTime, Utc};
use log::debug;

/// What a clock card shows for one tracked city at the current instant
#[derive(Debug, Clone, PartialEq)]
pub struct ClockCard {
    pub id: String,
    pub name: String,
    pub country: String,
    pub timezone: String,
    /// Local time honoring the hour cycle
    pub time: String,
    /// Local weekday, month, day and year
    pub date: String,
    /// Whether the city is on the day side
    pub daylight: bool,
    /// Marker position on the globe, before orientation
    pub position: Cartesian3,
    /// Whether the marker faces the viewer under the current orientation
    pub visible: bool,
}

/// The navigation engine behind the world-clock screen
#[derive(Debug)]
pub struct Dashboard {
    directory: CityDirectory,
    favorites: FavoritesStore,
    time: TimeEngine,
    rotation: RotationController,
    radius: f64,
}

impl Dashboard {
    /// Wire the components over one catalog, one store and one clock
    pub fn new(
        directory: CityDirectory,
        store: SharedStore,
        clock: Box<dyn Clock>,
        settings: RotationSettings,
    ) -> Self {
        let favorites = FavoritesStore::new(store.clone());
        let time = TimeEngine::new(clock, store);
        Self {
            directory,
            favorites,
            time,
            rotation: RotationController::new(settings),
            radius: DEFAULT_GLOBE_RADIUS,
        }
    }

    /// Use a different globe radius for marker positions
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn directory(&self) -> &CityDirectory {
        &self.directory
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    pub fn time(&self) -> &TimeEngine {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut TimeEngine {
        &mut self.time
    }

    pub fn rotation(&self) -> &RotationController {
        &self.rotation
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Tracked cities that still exist in the catalog, in insertion order
    pub fn tracked_cities(&self) -> Vec<&CityRecord> {
        self.favorites.list(&self.directory)
    }

    pub fn search(&self, query: &str) -> Vec<&CityRecord> {
        self.directory.search(query)
    }

    /// Select a city to orient toward, or `None` to return to idle
    pub fn select_city(&mut self, id: Option<&str>) -> bool {
        self.rotation.select(id, &self.directory)
    }

    /// Track a catalog city. Unknown ids are ignored and return false.
    pub fn track_city(&mut self, id: &str) -> bool {
        if !self.directory.contains(id) {
            debug!("Not tracking unknown city id {:?}", id);
            return false;
        }
        self.favorites.add(id)
    }

    /// Stop tracking a city, stale ids included
    pub fn untrack_city(&mut self, id: &str) -> bool {
        self.favorites.remove(id)
    }

    /// Flip a catalog city's tracked state
    ///
    /// Returns whether the city is tracked afterwards, or `None` when the id
    /// is not in the catalog.
    pub fn toggle_tracked(&mut self, id: &str) -> Option<bool> {
        if !self.directory.contains(id) {
            debug!("Not toggling unknown city id {:?}", id);
            return None;
        }
        Some(self.favorites.toggle(id))
    }

    pub fn reset_tracked(&mut self) {
        self.favorites.reset();
    }

    pub fn toggle_format(&mut self) -> HourCycle {
        self.time.toggle_format()
    }

    /// Advance the globe by one rendered frame
    pub fn frame(&mut self) -> Orientation {
        self.rotation.step()
    }

    /// Advance the shared clock; call at 1 Hz
    pub fn tick(&mut self) -> DateTime<Utc> {
        self.time.tick()
    }

    /// Where the sun is at the shared instant
    pub fn sun(&self) -> SunPosition {
        SunPosition::at(&self.time.utc())
    }

    /// Clock card for one city at the shared instant
    pub fn card(&self, city: &CityRecord) -> Result<ClockCard> {
        let coord = city.coord()?;
        let position = coord.to_cartesian(self.radius);
        let facing = self.rotation.orientation().apply(&position);

        Ok(ClockCard {
            id: city.id.clone(),
            name: city.name.clone(),
            country: city.country.clone(),
            timezone: city.timezone.clone(),
            time: self.time.formatted_time(&city.timezone)?,
            date: self.time.formatted_date(&city.timezone)?,
            daylight: self.sun().illuminates(&coord),
            position,
            visible: facing.dot(&Cartesian3::forward()) > 0.0,
        })
    }

    /// Clock cards for every tracked city
    ///
    /// A bad timezone in the catalog fails the whole call rather than
    /// rendering a wrong clock.
    pub fn clock_cards(&self) -> Result<Vec<ClockCard>> {
        self.tracked_cities()
            .into_iter()
            .map(|city| self.card(city))
            .collect()
    }
}
