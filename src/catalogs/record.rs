//! City records and continent grouping

use crate::coordinates::{CoordinateError, GeoCoord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Continent a city is grouped under
///
/// Catalog files may name regions beyond the common seven; those are kept
/// verbatim in [`Continent::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Continent {
    NorthAmerica,
    SouthAmerica,
    Europe,
    Asia,
    Africa,
    Oceania,
    Antarctica,
    Other(String),
}

impl Continent {
    /// Display name, as matched by search
    pub fn name(&self) -> &str {
        match self {
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Europe => "Europe",
            Continent::Asia => "Asia",
            Continent::Africa => "Africa",
            Continent::Oceania => "Oceania",
            Continent::Antarctica => "Antarctica",
            Continent::Other(name) => name,
        }
    }
}

impl From<String> for Continent {
    fn from(name: String) -> Self {
        match name.as_str() {
            "North America" => Continent::NorthAmerica,
            "South America" => Continent::SouthAmerica,
            "Europe" => Continent::Europe,
            "Asia" => Continent::Asia,
            "Africa" => Continent::Africa,
            "Oceania" => Continent::Oceania,
            "Antarctica" => Continent::Antarctica,
            _ => Continent::Other(name),
        }
    }
}

impl From<&str> for Continent {
    fn from(name: &str) -> Self {
        Continent::from(name.to_string())
    }
}

impl From<Continent> for String {
    fn from(continent: Continent) -> Self {
        match continent {
            Continent::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One city in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    /// Stable unique key, lowercase kebab-case
    pub id: String,
    /// City name
    pub name: String,
    /// Country name
    pub country: String,
    /// Continent grouping
    pub continent: Continent,
    /// IANA timezone identifier, e.g. "Asia/Tokyo"
    pub timezone: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Population, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

impl CityRecord {
    /// Create a new city record
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        name: &str,
        country: &str,
        continent: Continent,
        timezone: &str,
        lat: f64,
        lng: f64,
        population: Option<u64>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            country: country.to_string(),
            continent,
            timezone: timezone.to_string(),
            lat,
            lng,
            population,
        }
    }

    /// Validated geographic position of the city
    pub fn coord(&self) -> Result<GeoCoord, CoordinateError> {
        GeoCoord::new(self.lat, self.lng)
    }
}
