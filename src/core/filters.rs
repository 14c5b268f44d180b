//! Filter selection for a session
//!
//! Pure validation of raw answers into a [`FilterSelection`]. Cities are
//! validated strictly, while unknown months and days fall back to "all".

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Month names accepted by the month filter, in calendar order
pub const MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Weekday names accepted by the day filter, Monday first
pub const DAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Cities with a bikeshare dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Chicago,
    #[serde(rename = "new york city")]
    NewYorkCity,
    Washington,
}

impl City {
    /// All known cities
    pub const ALL: [Self; 3] = [Self::Chicago, Self::NewYorkCity, Self::Washington];

    /// Lowercase key the user types to pick this city
    pub const fn key(self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYorkCity => "new york city",
            Self::Washington => "washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Month restriction, stored as the 1-based month number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(u32),
}

impl MonthFilter {
    /// Whether a derived month number passes this filter
    pub const fn matches(self, month: u32) -> bool {
        match self {
            Self::All => true,
            Self::Month(m) => m == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Month(m) => f.write_str(MONTHS[(*m - 1) as usize]),
        }
    }
}

/// Day-of-week restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

impl DayFilter {
    /// Whether a derived weekday passes this filter
    pub fn matches(self, day: Weekday) -> bool {
        match self {
            Self::All => true,
            Self::Day(d) => d == day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Day(d) => f.write_str(weekday_name(*d)),
        }
    }
}

/// The (city, month, day) triple chosen for one session iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    /// Selection covering every trip of a city
    pub const fn all(city: City) -> Self {
        Self {
            city,
            month: MonthFilter::All,
            day: DayFilter::All,
        }
    }

    /// Conjunctive match of both time filters against a start timestamp
    pub fn matches(&self, start: &NaiveDateTime) -> bool {
        self.month.matches(start.month()) && self.day.matches(start.weekday())
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city={}, month={}, day={}", self.city, self.month, self.day)
    }
}

/// Validate a city answer, case-insensitively. `None` means re-prompt.
pub fn parse_city(input: &str) -> Option<City> {
    let input = input.to_lowercase();
    City::ALL.into_iter().find(|city| city.key() == input)
}

/// Validate a month answer; anything unrecognised silently becomes "all"
pub fn parse_month(input: &str) -> MonthFilter {
    let input = input.to_lowercase();
    MONTHS
        .iter()
        .position(|name| *name == input)
        .map_or(MonthFilter::All, |idx| MonthFilter::Month(idx as u32 + 1))
}

/// Validate a day answer; anything unrecognised silently becomes "all"
pub fn parse_day(input: &str) -> DayFilter {
    let input = input.to_lowercase();
    DAYS.iter()
        .position(|name| *name == input)
        .map_or(DayFilter::All, |idx| DayFilter::Day(WEEKDAYS[idx]))
}

/// Lowercase English name of a weekday
pub fn weekday_name(day: Weekday) -> &'static str {
    DAYS[day.num_days_from_monday() as usize]
}
