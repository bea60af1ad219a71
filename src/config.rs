//! Runtime configuration
//!
//! Loaded from a RON file. Every field has a default, so a partial file (or
//! no file at all) yields a working setup against the public Earth Search
//! catalog.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::geo::Coordinate;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// STAC API root, without the trailing `/search`
    pub catalog_url: String,
    /// The one collection we search
    pub collection: String,
    /// Items must have a cloud cover strictly below this percentage
    pub max_cloud_cover: f64,
    /// Page size requested from the catalog
    pub page_limit: u32,
    pub request_timeout_secs: u64,
    /// Minimum time between two click-triggered searches
    pub cooldown_secs: u64,
    /// Initial map position of a new session
    pub default_location: DefaultLocation,
    pub default_location_name: String,
    /// Length of the initial date range, ending today
    pub default_search_days: u64,
    /// Listen address of the web server
    pub server_addr: String,
    /// Open web sessions kept before the least recently used one is dropped
    pub max_sessions: usize,
}

/// Initial map position, normalized when read
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: "https://earth-search.aws.element84.com/v1".to_string(),
            collection: "sentinel-2-l2a".to_string(),
            max_cloud_cover: 15.0,
            page_limit: 100,
            request_timeout_secs: 30,
            cooldown_secs: 5,
            default_location: DefaultLocation { latitude: 37.8199, longitude: -122.4783 },
            default_location_name: "Golden Gate Bridge".to_string(),
            default_search_days: 30,
            server_addr: "0.0.0.0:3000".to_string(),
            max_sessions: 1000,
        }
    }
}

impl Config {
    /// Loads a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_ron(&text)
    }

    /// Loads `path` if given, falls back to defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn default_coordinate(&self) -> Coordinate {
        Coordinate::normalized(self.default_location.latitude, self.default_location.longitude)
    }

    /// The STAC item search endpoint
    pub fn search_url(&self) -> String {
        format!("{}/search", self.catalog_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.collection, "sentinel-2-l2a");
        assert_eq!(config.max_cloud_cover, 15.0);
        assert_eq!(config.cooldown(), Duration::from_secs(5));
        assert_eq!(config.search_url(), "https://earth-search.aws.element84.com/v1/search");
    }

    #[test]
    fn test_partial_ron() {
        let config = Config::from_ron("(cooldown_secs: 10, catalog_url: \"http://localhost:8080/\")").unwrap();
        assert_eq!(config.cooldown_secs, 10);
        assert_eq!(config.search_url(), "http://localhost:8080/search");
        assert_eq!(config.collection, "sentinel-2-l2a");
    }

    #[test]
    fn test_default_coordinate_is_normalized() {
        let config = Config::from_ron("(default_location: (latitude: 95.0, longitude: 190.0))").unwrap();
        assert_eq!(config.default_coordinate(), Coordinate::normalized(90.0, -170.0));
    }

    #[test]
    fn test_malformed_ron() {
        let err = Config::from_ron("(cooldown_secs: \"soon\")").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(max_cloud_cover: 20.0, default_search_days: 7)").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.max_cloud_cover, 20.0);
        assert_eq!(config.default_search_days, 7);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/scenefinder.ron").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = Config::from_ron(include_str!("../config/scenefinder.ron")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default() {
        let config = Config::load_or_default(None::<&str>).unwrap();
        assert_eq!(config, Config::default());
    }
}
