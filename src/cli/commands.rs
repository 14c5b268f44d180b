//! Command implementations for the CLI

use crate::{
    cli::Command,
    config::Config,
    core::{
        filters::{self, FilterSelection},
        loader::TripLoader,
        session::{self, Session},
    },
    error::BikeshareError,
    utils::console::Console,
};
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::{info, instrument};

/// Execute the appropriate command based on CLI arguments
#[instrument(skip(config))]
pub fn execute_command(config: &Config, command: &Command) -> anyhow::Result<()> {
    let mut console = Console::stdio();
    match command {
        Command::Explore => execute_explore_command(config, &mut console),
        Command::Report { city, month, day } => {
            execute_report_command(config, &mut console, city, month, day)
        }
    }
}

/// Execute the interactive session
fn execute_explore_command<R: BufRead, W: Write>(
    config: &Config,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    Session::new(config)
        .run(console)
        .context("Bikeshare session aborted")
}

/// Execute a single non-interactive report
fn execute_report_command<R: BufRead, W: Write>(
    config: &Config,
    console: &mut Console<R, W>,
    city: &str,
    month: &str,
    day: &str,
) -> anyhow::Result<()> {
    let selection = FilterSelection {
        city: filters::parse_city(city).ok_or_else(|| {
            BikeshareError::validation(format!(
                "Unknown city '{city}'. Choose from Washington, Chicago or New York City."
            ))
        })?,
        month: filters::parse_month(month),
        day: filters::parse_day(day),
    };
    info!("Reporting {}", selection);

    let table = TripLoader::new(&config.cities)
        .load(&selection)
        .with_context(|| format!("Failed to load trips for {}", selection.city))?;

    session::write_reports(console, &table).context("Failed to write report")?;
    Ok(())
}
