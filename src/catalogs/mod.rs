//! City catalogs module
//!
//! This module provides the static city catalog the dashboard is built on:
//! the [`CityRecord`] value type, the [`CityDirectory`] lookup and search
//! index, and the built-in world catalog. Catalogs are loaded once and never
//! mutated afterwards; every other component refers to cities by id.

pub mod directory;
pub mod record;
pub mod world;

pub use directory::CityDirectory;
pub use record::{CityRecord, Continent};
pub use world::world_cities;

use crate::coordinates::CoordinateError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for catalog loading and validation
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate city id in catalog: {0}")]
    DuplicateId(String),

    #[error("Invalid city id {0:?}: expected lowercase kebab-case")]
    InvalidId(String),

    #[error("City {id} has invalid coordinates: {source}")]
    Coordinate {
        id: String,
        #[source]
        source: CoordinateError,
    },

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
