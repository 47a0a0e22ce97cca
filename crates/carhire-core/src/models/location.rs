//! Locations and coordinates

use serde::{Deserialize, Serialize};

/// Mean earth radius in metres
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `"lat,long"`, the form the API expects in query parameters
    pub fn comma_separated(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Great-circle distance in metres
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

/// A place that can be used as a pickup or return location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Short name, e.g. "Sydney Airport"
    pub title: String,
    /// Longer description including state and country
    pub subtitle: String,
    /// Country name or code
    pub country: String,
    pub coordinate: Coordinate,
    pub is_airport: bool,
    /// IATA code when this location is an airport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Location {
    /// Create a location, flagging it as an airport when either name mentions one
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        country: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        let title = title.into();
        let subtitle = subtitle.into();
        let is_airport = title.to_lowercase().contains("airport")
            || subtitle.to_lowercase().contains("airport");
        Self {
            title,
            subtitle,
            country: country.into(),
            coordinate,
            is_airport,
            airport_code: None,
            state: None,
        }
    }

    /// A location for the device's own position
    pub fn current(coordinate: Coordinate) -> Self {
        Self::new("Current Location", "", "", coordinate)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.title, self.subtitle)
    }
}

/// The API's list of popular pickup locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopLocations {
    pub all: Vec<Location>,
}

impl TopLocations {
    pub fn new(all: Vec<Location>) -> Self {
        Self { all }
    }

    /// First location whose airport code contains `code`, ignoring case
    pub fn find_airport(&self, code: &str) -> Option<&Location> {
        let needle = code.to_lowercase();
        self.all.iter().find(|location| {
            location
                .airport_code
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
        })
    }

    /// Locations whose full name or airport code starts with `prefix`, ignoring case
    pub fn search(&self, prefix: &str) -> Vec<&Location> {
        let needle = prefix.to_lowercase();
        self.all
            .iter()
            .filter(|location| {
                location.full_name().to_lowercase().starts_with(&needle)
                    || location
                        .airport_code
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().starts_with(&needle))
            })
            .collect()
    }

    /// Order the list nearest first
    pub fn sort_by_distance_from(&mut self, origin: &Coordinate) {
        self.all.sort_by(|a, b| {
            origin
                .distance_to(&a.coordinate)
                .total_cmp(&origin.distance_to(&b.coordinate))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(title: &str, code: &str, lat: f64, long: f64) -> Location {
        let mut location = Location::new(title, "NSW, Australia", "Australia", Coordinate::new(lat, long));
        location.airport_code = Some(code.to_string());
        location
    }

    fn locations() -> TopLocations {
        TopLocations::new(vec![
            airport("Sydney Airport", "SYD", -33.9399, 151.1753),
            airport("Brisbane Airport", "BNE", -27.3842, 153.1175),
            Location::new("Byron Bay", "NSW, Australia", "Australia", Coordinate::new(-28.6474, 153.6020)),
        ])
    }

    #[test]
    fn test_airport_flag_from_name() {
        let location = Location::new("Melbourne Airport", "", "Australia", Coordinate::new(0.0, 0.0));
        assert!(location.is_airport);
        let location = Location::new("Melbourne", "VIC", "Australia", Coordinate::new(0.0, 0.0));
        assert!(!location.is_airport);
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(
            Coordinate::new(-27.12457, 154.2337).comma_separated(),
            "-27.12457,154.2337"
        );
    }

    #[test]
    fn test_find_airport_ignores_case() {
        let top = locations();
        assert_eq!(top.find_airport("bne").unwrap().title, "Brisbane Airport");
        assert!(top.find_airport("MEL").is_none());
    }

    #[test]
    fn test_search_by_name_or_code() {
        let top = locations();
        let titles: Vec<_> = top.search("b").iter().map(|l| l.title.clone()).collect();
        assert_eq!(titles, vec!["Brisbane Airport", "Byron Bay"]);

        let titles: Vec<_> = top.search("sy").iter().map(|l| l.title.clone()).collect();
        assert_eq!(titles, vec!["Sydney Airport"]);
    }

    #[test]
    fn test_sort_by_distance() {
        let mut top = locations();
        // Ballina: Byron Bay, then Brisbane, then Sydney
        top.sort_by_distance_from(&Coordinate::new(-28.8667, 153.5667));
        let titles: Vec<_> = top.all.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Byron Bay", "Brisbane Airport", "Sydney Airport"]);
    }

    #[test]
    fn test_distance_is_roughly_right() {
        let sydney = Coordinate::new(-33.8688, 151.2093);
        let brisbane = Coordinate::new(-27.4698, 153.0251);
        let km = sydney.distance_to(&brisbane) / 1000.0;
        assert!((700.0..760.0).contains(&km), "got {km}");
    }
}
