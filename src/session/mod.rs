//! Per-session state
//!
//! Each UI session owns exactly one [`SessionState`]. Nothing in here is
//! shared between sessions.

pub mod click;

use chrono::NaiveDate;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::Result;
use crate::geo::{ClickEvent, Coordinate};
use crate::stac::SceneQuery;
use crate::types::{DateRange, SceneResult};

pub use click::ClickOutcome;

/// Mutable state of one UI session
#[derive(Debug, Clone)]
pub struct SessionState {
    coordinate: Coordinate,
    dates: DateRange,
    location_name: String,
    last_click: Option<ClickEvent>,
    last_search: Option<Instant>,
    cooldown: Duration,
    last_scene: Option<SceneResult>,
}

impl SessionState {
    /// Creates the state of a new session from the configured defaults
    pub fn new(config: &Config, today: NaiveDate) -> Self {
        Self {
            coordinate: config.default_coordinate(),
            dates: DateRange::ending_at(today, config.default_search_days),
            location_name: config.default_location_name.clone(),
            last_click: None,
            last_search: None,
            cooldown: config.cooldown(),
            last_scene: None,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn dates(&self) -> DateRange {
        self.dates
    }

    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    pub fn last_click(&self) -> Option<ClickEvent> {
        self.last_click
    }

    pub fn last_search(&self) -> Option<Instant> {
        self.last_search
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn last_scene(&self) -> Option<&SceneResult> {
        self.last_scene.as_ref()
    }

    /// Manual coordinate entry, normalized like a click
    pub fn set_coordinate(&mut self, latitude: f64, longitude: f64) -> Coordinate {
        self.coordinate = Coordinate::normalized(latitude, longitude);
        self.coordinate
    }

    /// Replaces the date range; the old range is kept if the new one is invalid
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) -> Result<DateRange> {
        self.dates = DateRange::new(start, end)?;
        Ok(self.dates)
    }

    pub fn set_location_name(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.location_name = name.to_string();
        }
    }

    pub fn set_last_scene(&mut self, scene: Option<SceneResult>) {
        self.last_scene = scene;
    }

    /// The query a search started now would run
    pub fn query(&self) -> SceneQuery {
        SceneQuery { coordinate: self.coordinate, dates: self.dates }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            coordinate: self.coordinate,
            dates: self.dates,
            location_name: self.location_name.clone(),
            last_click: self.last_click,
            cooldown_secs: self.cooldown.as_secs_f64(),
            last_scene: self.last_scene.clone(),
        }
    }
}

/// Serializable view of a session for the UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub coordinate: Coordinate,
    pub dates: DateRange,
    pub location_name: String,
    pub last_click: Option<ClickEvent>,
    pub cooldown_secs: f64,
    pub last_scene: Option<SceneResult>,
}
