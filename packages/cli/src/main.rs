#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front door for the health-risk engine.
//!
//! ```text
//! health_risk_cli --snapshot data.json assess "Woodlands"
//! health_risk_cli --snapshot data.json forecast "Tampines" --days 7 [--seed 42]
//! health_risk_cli --snapshot data.json ask "is it safe to visit Bedok tomorrow?"
//! ```
//!
//! Running with no subcommand enters interactive mode. Set
//! `HEALTH_RISK_CONFIG` (or pass `--config`) to override the embedded
//! engine configuration, and `RUST_LOG` to see how places were resolved
//! and scored.

mod interactive;
mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use health_risk_engine::{Engine, EngineConfig, HealthRiskService};
use health_risk_forecast::{SeasonalWeather, SeededWeather, WeatherModel};
use health_risk_intent::Intent;
use health_risk_intent::explain::explain;
use health_risk_provider::SnapshotFileSource;

/// Environment variable naming an engine config override.
const CONFIG_ENV: &str = "HEALTH_RISK_CONFIG";

#[derive(Parser)]
#[command(
    name = "health_risk_cli",
    about = "Assess and forecast hyperlocal health risks"
)]
struct Cli {
    /// JSON hazard snapshot to read provider data from
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// GeoJSON file of dengue cluster polygons (overrides the snapshot's clusters)
    #[arg(long, global = true)]
    dengue_geojson: Option<PathBuf>,

    /// Engine config file (defaults to $HEALTH_RISK_CONFIG, then built-in)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of a readable report
    #[arg(long, global = true)]
    json: bool,

    /// Date forecasts start from (defaults to today)
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    /// Seed for reproducible weather variation (defaults to seasonal midpoints)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess current conditions at a place
    Assess {
        /// Place name (omit for a region-wide analysis)
        place: Option<String>,
    },
    /// Forecast a place some days ahead
    Forecast {
        /// Place name (omit for a region-wide forecast)
        place: Option<String>,
        /// Days ahead
        #[arg(long, default_value = "3", allow_negative_numbers = true)]
        days: i64,
    },
    /// Answer a free-text question
    Ask {
        /// The question
        message: String,
    },
}

/// A configured service plus output preferences.
struct App {
    service: HealthRiskService,
    json: bool,
    as_of: NaiveDate,
    weather: Box<dyn WeatherModel>,
}

impl App {
    /// Assesses `place` and prints the result.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    async fn assess(&self, place: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
        let analysis = self.service.assess_location(place).await;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        } else {
            print!("{}", report::format_analysis(&analysis));
        }
        Ok(())
    }

    /// Forecasts `place` and prints the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the horizon is invalid or JSON serialization
    /// fails.
    async fn forecast(
        &self,
        place: Option<&str>,
        days: i64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let prediction = self
            .service
            .forecast(place, days, self.as_of, self.weather.as_ref())
            .await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        } else {
            print!("{}", report::format_prediction(&prediction));
        }
        Ok(())
    }

    /// Classifies `message` and answers it.
    ///
    /// # Errors
    ///
    /// Returns an error if the routed assessment or forecast fails.
    async fn ask(&self, message: &str) -> Result<(), Box<dyn std::error::Error>> {
        match health_risk_intent::classify(message) {
            Intent::LocationQuery { location } | Intent::TravelAdvice { location } => {
                self.assess(Some(&location)).await
            }
            Intent::Prediction {
                location,
                horizon_days,
            } => self.forecast(Some(&location), i64::from(horizon_days)).await,
            Intent::Explanation { topic } => {
                println!("{}", explain(topic));
                Ok(())
            }
            Intent::GeneralChat => {
                println!(
                    "I can assess dengue, air quality, and hospital load for a place in \
                     Singapore, or forecast them a few days ahead. Try \"dengue risk in \
                     Woodlands\" or \"should I visit Bedok next week?\"."
                );
                Ok(())
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(EngineConfig::load(path)?);
    }
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Ok(EngineConfig::load(Path::new(&path))?),
        None => Ok(EngineConfig::embedded()),
    }
}

/// The snapshot path, which every subcommand needs.
///
/// # Errors
///
/// Returns a clap usage error if `--snapshot` was not given.
fn require_snapshot(cli: &Cli) -> Result<PathBuf, clap::Error> {
    cli.snapshot.clone().ok_or_else(|| {
        Cli::command().error(
            ErrorKind::MissingRequiredArgument,
            "--snapshot <SNAPSHOT> is required with a subcommand",
        )
    })
}

/// Builds the service over a snapshot file.
///
/// # Errors
///
/// Returns an error if the engine configuration cannot be loaded.
fn build_app(cli: &Cli, snapshot: PathBuf) -> Result<App, Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref())?;
    let provider = config.provider;
    let engine = Engine::new(config)?;

    log::info!("Reading hazard data from {}", snapshot.display());
    let mut source = SnapshotFileSource::new(snapshot);
    if let Some(geojson) = &cli.dengue_geojson {
        source = source.with_dengue_geojson(geojson);
    }

    let weather: Box<dyn WeatherModel> = match cli.seed {
        Some(seed) => Box::new(SeededWeather::new(seed)),
        None => Box::new(SeasonalWeather),
    };

    Ok(App {
        service: HealthRiskService::new(engine, Arc::new(source), provider),
        json: cli.json,
        as_of: cli
            .as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        weather,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        return interactive::run(&cli).await;
    };

    let snapshot = require_snapshot(&cli).unwrap_or_else(|e| e.exit());
    let app = build_app(&cli, snapshot)?;

    match command {
        Commands::Assess { place } => app.assess(place.as_deref()).await?,
        Commands::Forecast { place, days } => app.forecast(place.as_deref(), *days).await?,
        Commands::Ask { message } => app.ask(message).await?,
    }

    Ok(())
}
