//! # co2-estimator CLI
//!
//! Command-line interface for the co2-estimator library.
//! Estimates trip emissions, compares transport modes and prices carbon credits.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use co2_estimator::{render, EmissionConfig, Estimator, RouteCatalog, TripRequest};
use log::{debug, error};

mod cli;

/// Command-line interface for co2-estimator
#[derive(Parser)]
#[command(name = "co2-estimator")]
#[command(about = "Estimate trip CO2 emissions and the carbon credits to offset them")]
#[command(long_about = "Estimates the CO2 emitted by a trip between two cities:
  co2-estimator estimate \"São Paulo, SP\" \"Rio de Janeiro, RJ\"            # Car trip, catalog distance
  co2-estimator estimate \"São Paulo, SP\" \"Campinas, SP\" -m bus           # Bus trip
  co2-estimator estimate \"Casa\" \"Trabalho\" -d 12.5 -m bicycle            # Manual distance
  co2-estimator estimate \"Recife, PE\" \"Olinda, PE\" --json                # JSON report
  co2-estimator distance \"Curitiba, PR\" \"Florianópolis, SC\"              # Catalog distance only
  co2-estimator cities                                                    # Known cities

Custom data:
  --config factors.json             # Emission factors and credit economics
  --routes routes.json              # Route catalog")]
#[command(version = env!("CO2_ESTIMATOR_VERSION"))]
struct Cli {
    /// JSON file with emission factors and carbon-credit settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON file with the route catalog
    #[arg(long, global = true)]
    routes: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate emissions, mode comparison and carbon credits for a trip
    Estimate {
        /// Origin city, e.g. "São Paulo, SP"
        origin: String,

        /// Destination city, e.g. "Rio de Janeiro, RJ"
        destination: String,

        /// Transport mode id
        #[arg(short, long, default_value = "car")]
        mode: String,

        /// Distance in km, skips the catalog lookup
        #[arg(short, long)]
        distance: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Show a spinner for this many milliseconds before the result
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },

    /// Print the catalog distance between two cities
    Distance {
        origin: String,
        destination: String,
    },

    /// List every city of the route catalog
    Cities,

    /// List the configured transport modes and their emission factors
    Modes,
}

fn main() {
    if let Err(e) = run() {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    debug!("co2-estimator v{} starting...", env!("CO2_ESTIMATOR_VERSION"));

    let estimator = load_estimator(cli.config.as_ref(), cli.routes.as_ref())?;

    match cli.command {
        Command::Estimate {
            origin,
            destination,
            mode,
            distance,
            json,
            delay_ms,
        } => {
            let mut request = TripRequest::new(&origin, &destination, &mode);
            request.distance_km = distance;

            cli::CalculationSpinner::new("Calculando...").run_for(Duration::from_millis(delay_ms));

            let report = estimator.estimate(&request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::render_report(&report, estimator.config()));
            }
        }
        Command::Distance {
            origin,
            destination,
        } => {
            let distance = estimator.resolve_distance(&origin, &destination, None)?;
            println!("{} km", render::format_number(distance, 0));
        }
        Command::Cities => {
            for city in estimator.catalog().list_cities() {
                println!("{city}");
            }
        }
        Command::Modes => {
            print!("{}", format_modes(estimator.config()));
        }
    }

    Ok(())
}

/// Build the estimator from optional config and route files
fn load_estimator(config: Option<&PathBuf>, routes: Option<&PathBuf>) -> Result<Estimator> {
    let config = match config {
        Some(path) => EmissionConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EmissionConfig::default(),
    };

    let catalog = match routes {
        Some(path) => RouteCatalog::from_json_file(path)
            .with_context(|| format!("failed to load routes {}", path.display()))?,
        None => RouteCatalog::default(),
    };

    if catalog.routes().is_empty() {
        bail!("route catalog is empty");
    }

    debug!(
        "Loaded {} transport modes and {} routes",
        config.emission_factors.len(),
        catalog.routes().len()
    );
    Ok(Estimator::with_config(config, catalog))
}

/// One line per configured mode: icon, id, label and factor
fn format_modes(config: &EmissionConfig) -> String {
    config
        .emission_factors
        .iter()
        .map(|(mode, factor)| {
            let display = config.display(mode);
            format!(
                "{} {:<10} {:<12} {} kg CO₂/km\n",
                display.icon,
                mode,
                display.label,
                render::format_number(factor, 3)
            )
        })
        .collect()
}
