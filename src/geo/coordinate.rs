use serde::{Deserialize, Serialize};
use std::fmt;

use super::normalize::{clamp_latitude, normalize_longitude};

/// A normalized WGS84 position in degrees
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180).
/// The only way to build one is through [`Coordinate::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from arbitrary latitude/longitude degrees
    pub fn normalized(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: clamp_latitude(latitude),
            longitude: normalize_longitude(longitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// GeoJSON point geometry (longitude first)
    pub fn to_geometry(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::Point(vec![self.longitude, self.latitude]))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Raw click position as delivered by the map widget, before normalization
///
/// Clicks carry no identity, so two clicks are "the same" when both values
/// compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub lat: f64,
    pub lng: f64,
}

impl ClickEvent {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn to_coordinate(&self) -> Coordinate {
        Coordinate::normalized(self.lat, self.lng)
    }
}
