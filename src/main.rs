use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use skyforest_scenefinder::display::TerminalDisplay;
use skyforest_scenefinder::{init_logging, Config, Controller, Error, Result, SessionState, StacClient};

/// Finds the least cloudy Sentinel-2 scene over a point
///
/// Exits with 1 when the search fails and 2 when nothing matched.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// RON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Latitude in degrees (clamped to [-90, 90])
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude in degrees (wrapped into [-180, 180))
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// First day of the search, YYYY-MM-DD
    #[arg(long)]
    start: Option<chrono::NaiveDate>,

    /// Last day of the search, YYYY-MM-DD
    #[arg(long)]
    end: Option<chrono::NaiveDate>,

    /// Label used in the output
    #[arg(short, long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_logging();
    let args = Args::parse();

    let config = Config::load_or_default(args.config.as_ref())?;
    let client = StacClient::new(&config)?;
    let mut state = SessionState::new(&config, chrono::Local::now().date_naive());

    if args.lat.is_some() || args.lon.is_some() {
        let current = state.coordinate();
        state.set_coordinate(
            args.lat.unwrap_or(current.latitude()),
            args.lon.unwrap_or(current.longitude()),
        );
    }
    if args.start.is_some() || args.end.is_some() {
        let current = state.dates();
        state.set_dates(args.start.unwrap_or(current.start()), args.end.unwrap_or(current.end()))?;
    }
    if let Some(name) = &args.name {
        state.set_location_name(name);
    }

    println!("Sentinel-2 Satellite Imagery Finder\n");

    let mut controller = Controller::new(state, Arc::new(client));
    let mut display = TerminalDisplay;
    let code = match controller.run_search(&mut display).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(Error::EmptyResultSet) => ExitCode::from(2),
        Err(_) => ExitCode::FAILURE,
    };

    Ok(code)
}
