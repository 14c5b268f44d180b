//! # Bikeshare Explorer
//!
//! Interactive exploration of US bikeshare trip data. Loads a city's CSV
//! dataset, narrows it by month and day of week, and prints descriptive
//! statistics about travel times, stations, trip durations and riders.
//!
//! ## Features
//!
//! - Strict city validation with lenient month/day fallback to "all"
//! - Month, weekday and hour derived from each trip's start time
//! - Time, station, duration and user reports, each timed
//! - Paged display of the raw trip rows
//! - Headless `report` mode for scripting
//!
//! ## Example
//!
//! ```no_run
//! use bikeshare_explorer::{config::CityRegistry, core::{City, FilterSelection, TripLoader}};
//!
//! let registry = CityRegistry::in_dir("data");
//! let table = TripLoader::new(&registry).load(&FilterSelection::all(City::Chicago))?;
//! println!("Loaded {} trips", table.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity.
///
/// Logs go to stderr so they never interleave with the console session.
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
