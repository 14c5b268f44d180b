//! Command-line argument parsing and validation

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bikeshare Explorer - Descriptive statistics over US bikeshare trips
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "bikeshare")]
pub struct Args {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long = "data-dir", global = true, default_value = ".")]
    pub data_dir: PathBuf,

    /// Subcommand to execute (defaults to `explore`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactively choose filters, view statistics and browse trips
    Explore,

    /// Print the statistics for one filter selection and exit
    Report {
        /// City to analyze (chicago, new york city, washington)
        #[arg(long)]
        city: String,

        /// Month name from January to June, or "all"
        #[arg(long, default_value = "all")]
        month: String,

        /// Day of the week, or "all"
        #[arg(long, default_value = "all")]
        day: String,
    },
}

impl Args {
    /// The command to run, falling back to the interactive session
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Explore)
    }
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
