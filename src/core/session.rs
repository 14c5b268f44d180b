//! Interactive exploration session
//!
//! Drives the prompt → load → report → page → restart loop over a
//! [`Console`], so the same code serves stdin/stdout and scripted tests.

use crate::{
    config::Config,
    core::{
        filters::{self, FilterSelection},
        loader::TripLoader,
        pager::Pager,
        reports::{self, DurationStats, SEPARATOR_WIDTH, StationStats, TimeStats, UserStats},
        table::TripTable,
    },
    error::Result,
    utils::console::Console,
};
use std::io::{BufRead, Write};
use tracing::{info, instrument};

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const CITY_PROMPT: &str =
    "Which city would you like to analyze? (Washington, Chicago, New York City): ";
const CITY_ERROR: &str =
    "Sorry, that's not a valid city. Please choose from Washington, Chicago or New York City.";
const MONTH_PROMPT: &str = "Which month? January, February, March, April, May, June, or 'all': ";
const DAY_PROMPT: &str =
    "Which day? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday, or 'all': ";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Prompt for city, month and day.
///
/// The city is asked again until it is valid; month and day are asked once
/// and fall back to "all" when unrecognised.
pub fn collect_filters<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<FilterSelection> {
    console.say(GREETING)?;

    let city = loop {
        let answer = console.ask(CITY_PROMPT)?;
        if let Some(city) = filters::parse_city(&answer) {
            break city;
        }
        console.say(CITY_ERROR)?;
    };

    let month = filters::parse_month(&console.ask(MONTH_PROMPT)?);
    let day = filters::parse_day(&console.ask(DAY_PROMPT)?);

    console.say("-".repeat(SEPARATOR_WIDTH))?;
    Ok(FilterSelection { city, month, day })
}

/// Print the four reports in their fixed order
pub fn write_reports<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    table: &TripTable,
) -> Result<()> {
    console.write(reports::run::<TimeStats>(table))?;
    console.write(reports::run::<StationStats>(table))?;
    console.write(reports::run::<DurationStats>(table))?;
    console.write(reports::run::<UserStats>(table))
}

/// The interactive loop over a configuration
#[derive(Debug)]
pub struct Session<'a> {
    config: &'a Config,
}

impl<'a> Session<'a> {
    #[must_use]
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Run iterations until the user declines to restart
    #[instrument(skip_all)]
    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let loader = TripLoader::new(&self.config.cities);

        loop {
            let selection = collect_filters(console)?;
            info!("Exploring {}", selection);

            let table = loader.load(&selection)?;
            write_reports(console, &table)?;
            Pager::new(self.config.page_size).browse(console, &table)?;

            if !console.confirm(RESTART_PROMPT)? {
                info!("Session finished");
                return Ok(());
            }
        }
    }
}
