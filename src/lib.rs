//! Chronosphere: the navigation engine behind a 3D world-clock globe
//!
//! This crate maps cities onto a sphere, turns the globe smoothly toward a
//! selected city, keeps every displayed clock on one shared instant, searches
//! a static city catalog and remembers which cities the user tracks.
//! Rendering is left to the host: it receives scene points and a yaw/pitch
//! pair per frame.

use std::env;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

pub mod catalogs;
pub mod celestial;
pub mod constants;
pub mod coordinates;
pub mod dashboard;
pub mod favorites;
pub mod observer;
pub mod rotation;
pub mod storage;
pub mod time;

// Re-export commonly used types
pub use catalogs::{CityDirectory, CityRecord, Continent};
pub use coordinates::{facing_orientation, project, Cartesian3, GeoCoord, Orientation};
pub use dashboard::{ClockCard, Dashboard};
pub use favorites::FavoritesStore;
pub use rotation::{RotationController, RotationSettings, RotationTarget};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SharedStore};
pub use time::{Clock, HourCycle, ManualClock, SystemClock, TimeEngine};

use crate::constants::DATA_DIR_ENV;

/// Main error type for the chronosphere library
#[derive(Debug, Error)]
pub enum ChronosphereError {
    #[error("Time error: {0}")]
    TimeError(#[from] time::TimeError),

    #[error("Catalog error: {0}")]
    CatalogError(#[from] catalogs::CatalogError),

    #[error("Coordinate error: {0}")]
    CoordinateError(#[from] coordinates::CoordinateError),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for chronosphere operations
pub type Result<T> = std::result::Result<T, ChronosphereError>;

/// Default location for persisted preferences
///
/// `$CHRONOSPHERE_DATA_DIR` if set, else `$HOME/.config/chronosphere`, else
/// `./.chronosphere`.
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    match env::var_os("HOME").filter(|home| !home.is_empty()) {
        Some(home) => PathBuf::from(home).join(".config").join("chronosphere"),
        None => PathBuf::from(".chronosphere"),
    }
}

/// Entry point for loading the catalog and wiring a dashboard
#[derive(Debug, Clone, Default)]
pub struct Loader {
    data_dir: Option<PathBuf>,
    catalog: Option<PathBuf>,
    rotation: RotationSettings,
}

impl Loader {
    /// Create a new loader with the default data directory and built-in catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom data directory
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load cities from a JSON catalog file instead of the built-in catalog
    pub fn with_catalog<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.catalog = Some(path.as_ref().to_path_buf());
        self
    }

    /// Override rotation tuning
    pub fn with_rotation(mut self, settings: RotationSettings) -> Self {
        self.rotation = settings;
        self
    }

    /// The directory preferences are persisted under
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Load the configured catalog
    pub fn load_directory(&self) -> Result<CityDirectory> {
        match &self.catalog {
            Some(path) => Ok(CityDirectory::from_json_file(path)?),
            None => Ok(CityDirectory::world().clone()),
        }
    }

    /// Open the file store under the data directory, creating it if needed
    pub fn open_store(&self) -> Result<FileStore> {
        Ok(FileStore::open(self.data_dir())?)
    }

    /// A dashboard on the system clock, persisting under the data directory
    pub fn dashboard(&self) -> Result<Dashboard> {
        let store = self.open_store()?;
        self.dashboard_with(Rc::new(store), Box::new(SystemClock))
    }

    /// A dashboard on a caller-provided store and clock
    pub fn dashboard_with(&self, store: SharedStore, clock: Box<dyn Clock>) -> Result<Dashboard> {
        let directory = self.load_directory()?;
        Ok(Dashboard::new(directory, store, clock, self.rotation))
    }
}
