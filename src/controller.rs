//! UI event dispatch
//!
//! Every UI interaction arrives as a [`UiEvent`]. The [`Controller`] applies
//! it to the session state, pushes display commands and runs at most one
//! catalog search, fully completing before the next event is accepted.

use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::display::{status, DisplayCommand, DisplaySurface, StatusLevel};
use crate::error::{Error, Result};
use crate::geo::ClickEvent;
use crate::session::{ClickOutcome, SessionState};
use crate::stac::{find_best_scene, Catalog};
use crate::types::SceneResult;

/// Events the UI can deliver
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Initial render
    PageLoad,
    /// The map widget's most recent click, if any, for this render cycle
    MapClick { click: Option<ClickEvent> },
    /// Manual edit of the coordinate fields
    CoordinatesEdited { latitude: f64, longitude: f64 },
    DatesEdited { start: NaiveDate, end: NaiveDate },
    LocationRenamed { name: String },
    /// The "run search" button; not subject to the click cooldown
    RunSearch,
}

/// Owns one session and the catalog it searches
pub struct Controller {
    state: SessionState,
    catalog: Arc<dyn Catalog>,
}

impl Controller {
    pub fn new(state: SessionState, catalog: Arc<dyn Catalog>) -> Self {
        Self { state, catalog }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Handles one event received at `now`
    pub async fn dispatch(&mut self, event: UiEvent, now: Instant, display: &mut dyn DisplaySurface) {
        match event {
            UiEvent::PageLoad => self.on_page_load(display),
            UiEvent::MapClick { click } => self.on_map_click(click, now, display).await,
            UiEvent::CoordinatesEdited { latitude, longitude } => {
                self.on_coordinates_edited(latitude, longitude, display)
            }
            UiEvent::DatesEdited { start, end } => self.on_dates_edited(start, end, display),
            UiEvent::LocationRenamed { name } => self.state.set_location_name(&name),
            UiEvent::RunSearch => {
                let _ = self.run_search(display).await;
            }
        }
    }

    fn on_page_load(&mut self, display: &mut dyn DisplaySurface) {
        self.show_map(display);
        status(
            display,
            StatusLevel::Info,
            "Satellite images appear below once the selected location and dates match available Sentinel-2 acquisitions.",
        );
    }

    async fn on_map_click(&mut self, click: Option<ClickEvent>, now: Instant, display: &mut dyn DisplaySurface) {
        let Some(click) = click else { return };

        let outcome = self.state.handle_click(click, now);
        let Some(coordinate) = outcome.coordinate() else { return };

        self.show_map(display);
        status(display, StatusLevel::Success, format!("Selected coordinates: {}", coordinate));

        if let ClickOutcome::TriggerSearch(_) = outcome {
            let _ = self.run_search(display).await;
        }
    }

    fn on_coordinates_edited(&mut self, latitude: f64, longitude: f64, display: &mut dyn DisplaySurface) {
        self.state.set_coordinate(latitude, longitude);
        self.show_map(display);
    }

    fn on_dates_edited(&mut self, start: NaiveDate, end: NaiveDate, display: &mut dyn DisplaySurface) {
        if let Err(e) = self.state.set_dates(start, end) {
            status(display, StatusLevel::Warning, e.to_string());
        }
    }

    fn show_map(&self, display: &mut dyn DisplaySurface) {
        let coordinate = self.state.coordinate();
        display.show(DisplayCommand::MapView { center: coordinate, marker: coordinate });
    }

    /// Runs one search for the current coordinate and date range
    ///
    /// Failures end up on the display and are also returned; the session
    /// stays usable either way.
    pub async fn run_search(&mut self, display: &mut dyn DisplaySurface) -> Result<SceneResult> {
        let query = self.state.query();
        info!(coordinate = %query.coordinate, dates = %query.dates, "running scene search");

        status(display, StatusLevel::Info, format!("Searching imagery for {}", self.state.location_name()));
        status(display, StatusLevel::Info, format!("Coordinates: {}", query.coordinate));
        status(display, StatusLevel::Info, format!("Date range: {}", query.dates));

        let scene = match find_best_scene(self.catalog.as_ref(), &query).await {
            Ok(found) => {
                let best = found.best;
                status(display, StatusLevel::Info, format!("Found {} matching scenes", found.matched));
                status(display, StatusLevel::Success, "Best available image");
                status(display, StatusLevel::Info, format!("Scene ID: {}", best.id));
                status(display, StatusLevel::Info, format!("Acquisition time: {}", best.acquisition_time_label()));
                status(display, StatusLevel::Info, format!("Cloud cover: {}", best.cloud_cover_label()));
                if let Some(url) = &best.thumbnail_url {
                    display.show(DisplayCommand::Image {
                        url: url.clone(),
                        caption: "Sentinel-2 thumbnail".to_string(),
                    });
                }
                Ok(best)
            }
            Err(Error::EmptyResultSet) => {
                status(display, StatusLevel::Info, "Found 0 matching scenes");
                status(display, StatusLevel::Warning, "No images found for the selected parameters.");
                Err(Error::EmptyResultSet)
            }
            Err(e) => {
                warn!("scene search failed: {}", e);
                status(display, StatusLevel::Error, format!("Search failed: {}", e));
                Err(e)
            }
        };

        self.state.set_last_scene(scene.as_ref().ok().cloned());
        scene
    }
}
