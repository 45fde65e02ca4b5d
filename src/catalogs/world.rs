//! Built-in world city catalog
//!
//! Cities are grouped by continent and the groups are concatenated in a fixed
//! order. That order is meaningful: search keeps it for equally ranked
//! matches, so results stay grouped by continent.

use super::record::{CityRecord, Continent};

/// All built-in cities in catalog order
pub fn world_cities() -> Vec<CityRecord> {
    let mut cities = Vec::new();
    cities.extend(create_north_america_cities());
    cities.extend(create_europe_cities());
    cities.extend(create_asia_cities());
    cities.extend(create_south_america_cities());
    cities.extend(create_africa_cities());
    cities.extend(create_oceania_cities());
    cities
}

/// North America cities
fn create_north_america_cities() -> Vec<CityRecord> {
    vec![
        CityRecord::new(
            "new-york",
            "New York",
            "United States",
            Continent::NorthAmerica,
            "America/New_York",
            40.7128,
            -74.0060,
            Some(8_336_817),
        ),
        CityRecord::new(
            "los-angeles",
            "Los Angeles",
            "United States",
            Continent::NorthAmerica,
            "America/Los_Angeles",
            34.0522,
            -118.2437,
            Some(3_979_576),
        ),
        CityRecord::new(
            "chicago",
            "Chicago",
            "United States",
            Continent::NorthAmerica,
            "America/Chicago",
            41.8781,
            -87.6298,
            Some(2_693_976),
        ),
        CityRecord::new(
            "toronto",
            "Toronto",
            "Canada",
            Continent::NorthAmerica,
            "America/Toronto",
            43.6532,
            -79.3832,
            Some(2_731_571),
        ),
        CityRecord::new(
            "mexico-city",
            "Mexico City",
            "Mexico",
            Continent::NorthAmerica,
            "America/Mexico_City",
            19.4326,
            -99.1332,
            Some(8_918_653),
        ),
        CityRecord::new(
            "vancouver",
            "Vancouver",
            "Canada",
            Continent::NorthAmerica,
            "America/Vancouver",
            49.2827,
            -123.1207,
            Some(631_486),
        ),
        CityRecord::new(
            "miami",
            "Miami",
            "United States",
            Continent::NorthAmerica,
            "America/New_York",
            25.7617,
            -80.1918,
            Some(467_963),
        ),
    ]
}

/// Europe cities
fn create_europe_cities() -> Vec<CityRecord> {
    vec![
        CityRecord::new(
            "london",
            "London",
            "United Kingdom",
            Continent::Europe,
            "Europe/London",
            51.5074,
            -0.1278,
            Some(8_982_000),
        ),
        CityRecord::new(
            "paris",
            "Paris",
            "France",
            Continent::Europe,
            "Europe/Paris",
            48.8566,
            2.3522,
            Some(2_161_000),
        ),
        CityRecord::new(
            "berlin",
            "Berlin",
            "Germany",
            Continent::Europe,
            "Europe/Berlin",
            52.5200,
            13.4050,
            Some(3_645_000),
        ),
        CityRecord::new(
            "madrid",
            "Madrid",
            "Spain",
            Continent::Europe,
            "Europe/Madrid",
            40.4168,
            -3.7038,
            Some(3_223_000),
        ),
        CityRecord::new(
            "rome",
            "Rome",
            "Italy",
            Continent::Europe,
            "Europe/Rome",
            41.9028,
            12.4964,
            Some(2_873_000),
        ),
        CityRecord::new(
            "amsterdam",
            "Amsterdam",
            "Netherlands",
            Continent::Europe,
            "Europe/Amsterdam",
            52.3676,
            4.9041,
            Some(821_752),
        ),
        CityRecord::new(
            "moscow",
            "Moscow",
            "Russia",
            Continent::Europe,
            "Europe/Moscow",
            55.7558,
            37.6173,
            Some(11_920_000),
        ),
        CityRecord::new(
            "istanbul",
            "Istanbul",
            "Turkey",
            Continent::Europe,
            "Europe/Istanbul",
            41.0082,
            28.9784,
            Some(15_460_000),
        ),
    ]
}

/// Asia cities
fn create_asia_cities() -> Vec<CityRecord> {
    vec![
        CityRecord::new(
            "tokyo",
            "Tokyo",
            "Japan",
            Continent::Asia,
            "Asia/Tokyo",
            35.6762,
            139.6503,
            Some(13_960_000),
        ),
        CityRecord::new(
            "beijing",
            "Beijing",
            "China",
            Continent::Asia,
            "Asia/Shanghai",
            39.9042,
            116.4074,
            Some(21_540_000),
        ),
        CityRecord::new(
            "shanghai",
            "Shanghai",
            "China",
            Continent::Asia,
            "Asia/Shanghai",
            31.2304,
            121.4737,
            Some(24_280_000),
        ),
        CityRecord::new(
            "hong-kong",
            "Hong Kong",
            "China",
            Continent::Asia,
            "Asia/Hong_Kong",
            22.3193,
            114.1694,
            Some(7_482_000),
        ),
        CityRecord::new(
            "singapore",
            "Singapore",
            "Singapore",
            Continent::Asia,
            "Asia/Singapore",
            1.3521,
            103.8198,
            Some(5_686_000),
        ),
        CityRecord::new(
            "dubai",
            "Dubai",
            "UAE",
            Continent::Asia,
            "Asia/Dubai",
            25.2048,
            55.2708,
            Some(3_331_000),
        ),
        CityRecord::new(
            "mumbai",
            "Mumbai",
            "India",
            Continent::Asia,
            "Asia/Kolkata",
            19.0760,
            72.8777,
            Some(20_411_000),
        ),
        CityRecord::new(
            "delhi",
            "Delhi",
            "India",
            Continent::Asia,
            "Asia/Kolkata",
            28.7041,
            77.1025,
            Some(16_753_000),
        ),
        CityRecord::new(
            "bangkok",
            "Bangkok",
            "Thailand",
            Continent::Asia,
            "Asia/Bangkok",
            13.7563,
            100.5018,
            Some(10_539_000),
        ),
        CityRecord::new(
            "seoul",
            "Seoul",
            "South Korea",
            Continent::Asia,
            "Asia/Seoul",
            37.5665,
            126.9780,
            Some(9_776_000),
        ),
    ]
}

/// South America cities
fn create_south_america_cities() -> Vec<CityRecord> {
    vec![
        CityRecord::new(
            "sao-paulo",
            "São Paulo",
            "Brazil",
            Continent::SouthAmerica,
            "America/Sao_Paulo",
            -23.5505,
            -46.6333,
            Some(12_325_000),
        ),
        CityRecord::new(
            "rio",
            "Rio de Janeiro",
            "Brazil",
            Continent::SouthAmerica,
            "America/Sao_Paulo",
            -22.9068,
            -43.1729,
            Some(6_748_000),
        ),
        CityRecord::new(
            "buenos-aires",
            "Buenos Aires",
            "Argentina",
            Continent::SouthAmerica,
            "America/Argentina/Buenos_Aires",
            -34.6037,
            -58.3816,
            Some(3_075_000),
        ),
        CityRecord::new(
            "santiago",
            "Santiago",
            "Chile",
            Continent::SouthAmerica,
            "America/Santiago",
            -33.4489,
            -70.6693,
            Some(6_310_000),
        ),
    ]
}

/// Africa cities
fn create_africa_cities() -> Vec<CityRecord> {
    vec![
        CityRecord::new(
            "cairo",
            "Cairo",
            "Egypt",
            Continent::Africa,
            "Africa/Cairo",
            30.0444,
            31.2357,
            Some(20_076_000),
        ),
        CityRecord::new(
            "lagos",
            "Lagos",
            "Nigeria",
            Continent::Africa,
            "Africa/Lagos",
            6.5244,
            3.3792,
            Some(14_368_000),
        ),
        CityRecord::new(
            "johannesburg",
            "Johannesburg",
            "South Africa",
            Continent::Africa,
            "Africa/Johannesburg",
            -26.2041,
            28.0473,
            Some(5_635_000),
        ),
        CityRecord::new(
            "nairobi",
            "Nairobi",
            "Kenya",
            Continent::Africa,
            "Africa/Nairobi",
            -1.2864,
            36.8172,
            Some(4_397_000),
        ),
    ]
}

/// Oceania cities
fn create_oceania_cities() -> Vec<CityRecord> {
    vec![
        CityRecord::new(
            "sydney",
            "Sydney",
            "Australia",
            Continent::Oceania,
            "Australia/Sydney",
            -33.8688,
            151.2093,
            Some(5_312_000),
        ),
        CityRecord::new(
            "melbourne",
            "Melbourne",
            "Australia",
            Continent::Oceania,
            "Australia/Melbourne",
            -37.8136,
            144.9631,
            Some(5_078_000),
        ),
        CityRecord::new(
            "auckland",
            "Auckland",
            "New Zealand",
            Continent::Oceania,
            "Pacific/Auckland",
            -36.8485,
            174.7633,
            Some(1_657_000),
        ),
    ]
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_world_catalog_ids_unique() {
        let cities = world_cities();
        let ids: HashSet<&str> = cities.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), cities.len());
    }

    #[test]
    fn test_world_catalog_grouped_by_continent() {
        let cities = world_cities();
        assert_eq!(cities.first().map(|c| &c.continent), Some(&Continent::NorthAmerica));
        assert_eq!(cities.last().map(|c| &c.continent), Some(&Continent::Oceania));

        // Each continent forms one contiguous run
        let mut seen = Vec::new();
        for city in &cities {
            if seen.last() != Some(&city.continent) {
                assert!(!seen.contains(&city.continent), "{} split", city.continent);
                seen.push(city.continent.clone());
            }
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_default_tracked_cities_present() {
        let cities = world_cities();
        for id in crate::constants::DEFAULT_TRACKED_CITIES {
            assert!(cities.iter().any(|c| c.id == id), "{} missing", id);
        }
    }
}
