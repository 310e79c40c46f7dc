use geo::{Distance, Haversine};
use serde::{Deserialize, Serialize};

/// Named geographic point. Coordinates are WGS84 degrees, distances are
/// kilometres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Location {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    fn point(&self) -> geo::Point {
        geo::Point::new(self.longitude, self.latitude)
    }

    /// Great-circle distance in kilometres.
    pub fn distance_to(&self, to: &Location) -> f64 {
        let haversine = Haversine;

        haversine.distance(self.point(), to.point()) / 1_000.0
    }
}
