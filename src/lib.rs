//! scenefinder - least-cloudy Sentinel-2 scene lookup
//!
//! scenefinder turns map clicks and date ranges into STAC item searches and
//! picks the scene with the lowest cloud cover.
//!
//! # Examples
//!
//! ## One-off search
//!
//! ```no_run
//! use skyforest_scenefinder::{Config, DateRange, StacClient, SceneQuery, find_best_scene};
//! use skyforest_scenefinder::geo::Coordinate;
//!
//! # async fn run() -> skyforest_scenefinder::Result<()> {
//! let config = Config::default();
//! let client = StacClient::new(&config)?;
//! let query = SceneQuery {
//!     coordinate: Coordinate::normalized(37.8199, -122.4783),
//!     dates: DateRange::parse("2024-06-01", "2024-06-30")?,
//! };
//!
//! let found = find_best_scene(&client, &query).await?;
//! println!("{} ({})", found.best.id, found.best.cloud_cover_label());
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving a session
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Instant;
//! use skyforest_scenefinder::{Config, Controller, SessionState, StacClient, UiEvent};
//! use skyforest_scenefinder::display::DisplayCommand;
//! use skyforest_scenefinder::geo::ClickEvent;
//!
//! # async fn run() -> skyforest_scenefinder::Result<()> {
//! let config = Config::default();
//! let state = SessionState::new(&config, chrono::Local::now().date_naive());
//! let mut controller = Controller::new(state, Arc::new(StacClient::new(&config)?));
//!
//! let mut commands: Vec<DisplayCommand> = Vec::new();
//! let click = UiEvent::MapClick { click: Some(ClickEvent::new(46.2, 6.15)) };
//! controller.dispatch(click, Instant::now(), &mut commands).await;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;
pub mod geo;
pub mod config;
pub mod session;
pub mod stac;
pub mod display;
pub mod controller;
pub mod api;

pub use error::{Error, Result};
pub use types::{DateRange, SceneResult};
pub use config::Config;
pub use session::{ClickOutcome, SessionState};
pub use stac::{find_best_scene, Catalog, SceneQuery, StacClient};
pub use controller::{Controller, UiEvent};

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber, level taken from `RUST_LOG`
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // only the first call in a process can succeed
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
