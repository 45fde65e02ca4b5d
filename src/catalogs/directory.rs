//! City directory: id lookup and ranked search over an immutable catalog

use super::record::{CityRecord, Continent};
use super::world::world_cities;
use super::CatalogError;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

lazy_static! {
    static ref CITY_ID_PATTERN: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid city id pattern");
    static ref WORLD: CityDirectory = CityDirectory::from_trusted(world_cities());
}

/// Search ranking tiers, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchRank {
    /// Name or country equals the query
    Exact,
    /// Name starts with the query
    NamePrefix,
    /// Any other substring match
    Partial,
}

/// Immutable, ordered city catalog with id lookup and search
#[derive(Debug, Clone)]
pub struct CityDirectory {
    cities: Vec<CityRecord>,
    index: HashMap<String, usize>,
}

impl CityDirectory {
    /// Build a directory from catalog records, validating every entry
    ///
    /// Ids must be unique lowercase kebab-case slugs and coordinates must lie
    /// in the geographic domain. Catalog order is preserved.
    pub fn from_records(cities: Vec<CityRecord>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(cities.len());

        for (position, city) in cities.iter().enumerate() {
            if !CITY_ID_PATTERN.is_match(&city.id) {
                return Err(CatalogError::InvalidId(city.id.clone()));
            }
            city.coord().map_err(|source| CatalogError::Coordinate {
                id: city.id.clone(),
                source,
            })?;
            if index.insert(city.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(city.id.clone()));
            }
        }

        Ok(Self { cities, index })
    }

    /// Build from records known to be valid (the built-in catalog)
    fn from_trusted(cities: Vec<CityRecord>) -> Self {
        let mut index = HashMap::with_capacity(cities.len());
        for (position, city) in cities.iter().enumerate() {
            index.entry(city.id.clone()).or_insert(position);
        }
        Self { cities, index }
    }

    /// The built-in world catalog
    pub fn world() -> &'static CityDirectory {
        &WORLD
    }

    /// Parse a JSON array of city records
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let cities: Vec<CityRecord> = serde_json::from_str(json)?;
        Self::from_records(cities)
    }

    /// Load a JSON catalog file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| CatalogError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let directory = Self::from_json_str(&contents)?;
        info!(
            "Loaded {} cities from {}",
            directory.len(),
            path.as_ref().display()
        );
        Ok(directory)
    }

    /// Look up a city by id
    pub fn by_id(&self, id: &str) -> Option<&CityRecord> {
        self.index.get(id).map(|&position| &self.cities[position])
    }

    /// Whether a city with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Case-insensitive ranked search
    ///
    /// Matches the trimmed query as a substring of name, country, continent
    /// or timezone. A blank query returns nothing. Results are ordered in
    /// three tiers: exact name/country matches, then names starting with the
    /// query, then everything else. Within a tier catalog order is kept.
    pub fn search(&self, query: &str) -> Vec<&CityRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(MatchRank, &CityRecord)> = self
            .cities
            .iter()
            .filter_map(|city| rank_match(city, &needle).map(|rank| (rank, city)))
            .collect();

        // sort_by_key is stable, so ties keep catalog order
        matches.sort_by_key(|(rank, _)| *rank);
        matches.into_iter().map(|(_, city)| city).collect()
    }

    /// All cities in catalog order
    pub fn all(&self) -> &[CityRecord] {
        &self.cities
    }

    /// Cities on one continent, in catalog order
    pub fn by_continent(&self, continent: &Continent) -> Vec<&CityRecord> {
        self.cities
            .iter()
            .filter(|city| &city.continent == continent)
            .collect()
    }

    /// Continents present, in order of first appearance
    pub fn continents(&self) -> Vec<Continent> {
        let mut continents = Vec::new();
        for city in &self.cities {
            if !continents.contains(&city.continent) {
                continents.push(city.continent.clone());
            }
        }
        continents
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

fn rank_match(city: &CityRecord, needle: &str) -> Option<MatchRank> {
    let name = city.name.to_lowercase();
    let country = city.country.to_lowercase();

    let matched = name.contains(needle)
        || country.contains(needle)
        || city.continent.name().to_lowercase().contains(needle)
        || city.timezone.to_lowercase().contains(needle);

    if !matched {
        None
    } else if name == needle || country == needle {
        Some(MatchRank::Exact)
    } else if name.starts_with(needle) {
        Some(MatchRank::NamePrefix)
    } else {
        Some(MatchRank::Partial)
    }
}
