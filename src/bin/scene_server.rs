use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use skyforest_scenefinder::api::{create_router, AppState};
use skyforest_scenefinder::{init_logging, Config, Result, StacClient};

/// Map based Sentinel-2 scene finder web server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// RON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config
    #[arg(short, long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_ref())?;
    if let Some(addr) = args.addr {
        config.server_addr = addr;
    }

    let catalog = Arc::new(StacClient::new(&config)?);
    info!(catalog = catalog.search_url(), collection = %config.collection, "using STAC catalog");

    let addr = config.server_addr.clone();
    let app = create_router(Arc::new(AppState::new(config, catalog)));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("Sentinel-2 Scene Finder");
    println!("Listening on http://{}", addr);
    println!();
    println!("Endpoints:");
    println!("  GET    /                          map UI");
    println!("  POST   /api/sessions              start a session");
    println!("  GET    /api/sessions/:id          session state");
    println!("  POST   /api/sessions/:id/events   deliver a UI event");
    println!("  DELETE /api/sessions/:id          end a session");
    println!();

    axum::serve(listener, app).await?;
    Ok(())
}
