//! streetchain CLI entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use geo::Point;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "streetchain", version)]
#[command(about = "Summarize a road route and encode it as street-chain facts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Route inputs shared by all commands
#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Road graph in node-link JSON format
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Path as a JSON array of node ids
    #[arg(short, long)]
    pub path: PathBuf,

    /// Start point as 'lat,lon'
    #[arg(short, long, value_parser = parse_lat_lon)]
    pub start: Option<Point<f64>>,

    /// End point as 'lat,lon'
    #[arg(short, long, value_parser = parse_lat_lon)]
    pub end: Option<Point<f64>>,

    /// Start address, skips geocoding of the start point
    #[arg(long)]
    pub start_address: Option<String>,

    /// End address, skips geocoding of the end point
    #[arg(long)]
    pub end_address: Option<String>,

    /// JSON address book used for reverse geocoding
    #[arg(long)]
    pub address_book: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route summary
    Summary {
        #[command(flatten)]
        route: RouteArgs,

        /// Print the JSON document instead of the text summary
        #[arg(long)]
        json: bool,

        /// Save the JSON document to a file
        #[arg(short = 'S', long)]
        save: Option<PathBuf>,
    },
    /// Encode the route into street-chain facts and print them
    Encode {
        #[command(flatten)]
        route: RouteArgs,
    },
}

fn parse_lat_lon(value: &str) -> Result<Point<f64>, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected 'lat,lon', got '{value}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude '{lon}': {e}"))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("coordinates out of range: {lat},{lon}"));
    }
    Ok(streetchain_core::geo_point(lat, lon))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary { route, json, save } => {
            commands::summary(&route, &config, json, save.as_deref())
        }
        Commands::Encode { route } => commands::encode(&route, &config),
    }
}
