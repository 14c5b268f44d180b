//! Statistics reporters
//!
//! Four independent reports computed over a filtered [`TripTable`]. Each one
//! is timed by [`run`] and rendered through its `Display` impl.

use crate::core::{
    filters::weekday_name,
    stats::{ValueCounts, sum_and_mean},
    table::{OptionalField, TripTable},
};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Width of the separator line printed after each report
pub const SEPARATOR_WIDTH: usize = 40;

/// A statistic block computed from a trip table
pub trait Report: fmt::Display + Sized {
    /// Line announcing the computation
    const HEADING: &'static str;

    fn compute(table: &TripTable) -> Self;
}

/// A report together with how long it took to compute
#[derive(Debug, Clone)]
pub struct Timed<R> {
    pub report: R,
    pub elapsed: Duration,
}

/// Compute a report, measuring wall-clock time
#[instrument(skip(table), fields(report = R::HEADING, rows = table.len()))]
pub fn run<R: Report>(table: &TripTable) -> Timed<R> {
    let started = Instant::now();
    let report = R::compute(table);
    let elapsed = started.elapsed();
    debug!("Report computed in {:?}", elapsed);
    Timed { report, elapsed }
}

impl<R: Report> fmt::Display for Timed<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}\n", R::HEADING)?;
        write!(f, "{}", self.report)?;
        writeln!(f, "\nThis took {} seconds.", self.elapsed.as_secs_f64())?;
        writeln!(f, "{}", "-".repeat(SEPARATOR_WIDTH))
    }
}

/// Renders a missing aggregate as `n/a`
struct OrNa<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrNa<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("n/a"),
        }
    }
}

fn write_counts(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    counts: &[(String, usize)],
) -> fmt::Result {
    writeln!(f, "{title}:")?;
    for (value, count) in counts {
        writeln!(f, "  {value}: {count}")?;
    }
    Ok(())
}

fn owned(counts: ValueCounts<&str>) -> Vec<(String, usize)> {
    counts
        .descending()
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

/// Most frequent times of travel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// Month number, 1-based
    pub month: Option<u32>,
    /// Lowercase weekday name
    pub day_of_week: Option<&'static str>,
    /// Hour of day, 0-23
    pub hour: Option<u32>,
}

impl Report for TimeStats {
    const HEADING: &'static str = "Calculating The Most Frequent Times of Travel...";

    fn compute(table: &TripTable) -> Self {
        let rows = table.rows();
        let months: ValueCounts<u32> = rows.iter().map(|r| r.month()).collect();
        let days: ValueCounts<&'static str> =
            rows.iter().map(|r| weekday_name(r.day_of_week())).collect();
        let hours: ValueCounts<u32> = rows.iter().map(|r| r.hour()).collect();

        Self {
            month: months.mode().copied(),
            day_of_week: days.mode().copied(),
            hour: hours.mode().copied(),
        }
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most common month: {}", OrNa(&self.month))?;
        writeln!(f, "Most common day of week: {}", OrNa(&self.day_of_week))?;
        writeln!(f, "Most common start hour: {}", OrNa(&self.hour))
    }
}

/// Most popular stations and trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// "start to end" pair
    pub trip: Option<String>,
}

impl Report for StationStats {
    const HEADING: &'static str = "Calculating The Most Popular Stations and Trip...";

    fn compute(table: &TripTable) -> Self {
        let rows = table.rows();
        let starts: ValueCounts<&str> = rows
            .iter()
            .filter_map(|r| r.start_station.as_deref())
            .collect();
        let ends: ValueCounts<&str> = rows
            .iter()
            .filter_map(|r| r.end_station.as_deref())
            .collect();
        let trips: ValueCounts<String> = rows.iter().filter_map(|r| r.route()).collect();

        Self {
            start_station: starts.mode().map(|s| (*s).to_string()),
            end_station: ends.mode().map(|s| (*s).to_string()),
            trip: trips.mode().cloned(),
        }
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most commonly used start station: {}", OrNa(&self.start_station))?;
        writeln!(f, "Most commonly used end station: {}", OrNa(&self.end_station))?;
        writeln!(f, "Most frequent trip: {}", OrNa(&self.trip))
    }
}

/// Total and mean trip duration, in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    pub mean: Option<f64>,
}

impl Report for DurationStats {
    const HEADING: &'static str = "Calculating Trip Duration...";

    fn compute(table: &TripTable) -> Self {
        let (total, mean) = sum_and_mean(table.rows().iter().filter_map(|r| r.trip_duration));
        Self { total, mean }
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total travel time: {}", self.total)?;
        writeln!(f, "Mean travel time: {}", OrNa(&self.mean))
    }
}

/// Earliest, latest and most common birth year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub most_recent: Option<i32>,
    pub most_common: Option<i32>,
}

/// User demographics. Sections for columns the dataset lacks are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYearStats>,
}

impl Report for UserStats {
    const HEADING: &'static str = "Calculating User Stats...";

    fn compute(table: &TripTable) -> Self {
        let rows = table.rows();
        let user_types = owned(rows.iter().filter_map(|r| r.user_type.as_deref()).collect());

        let genders = table
            .has(OptionalField::Gender)
            .then(|| owned(rows.iter().filter_map(|r| r.gender.as_deref()).collect()));

        let birth_years = table.has(OptionalField::BirthYear).then(|| {
            let years: Vec<i32> = rows.iter().filter_map(|r| r.birth_year).collect();
            let counts: ValueCounts<i32> = years.iter().copied().collect();
            BirthYearStats {
                earliest: years.iter().min().copied(),
                most_recent: years.iter().max().copied(),
                most_common: counts.mode().copied(),
            }
        });

        Self {
            user_types,
            genders,
            birth_years,
        }
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_counts(f, "User Types", &self.user_types)?;

        if let Some(genders) = &self.genders {
            write_counts(f, "Gender Counts", genders)?;
        }

        if let Some(years) = &self.birth_years {
            writeln!(f, "Earliest birth year: {}", OrNa(&years.earliest))?;
            writeln!(f, "Most recent birth year: {}", OrNa(&years.most_recent))?;
            writeln!(f, "Most common birth year: {}", OrNa(&years.most_common))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::tests::{record, table};
    use std::collections::BTreeSet;

    fn with_users(types: &[&str]) -> TripTable {
        table(
            types
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let mut row = record(i, 2017, 1, 2, 0);
                    row.user_type = Some((*t).to_string());
                    row
                })
                .collect(),
        )
    }

    #[test]
    fn test_time_stats() {
        let table = table(vec![
            record(0, 2017, 1, 2, 8),   // january, monday
            record(1, 2017, 3, 7, 17),  // march, tuesday
            record(2, 2017, 3, 14, 17), // march, tuesday
        ]);
        let stats = TimeStats::compute(&table);
        assert_eq!(stats.month, Some(3));
        assert_eq!(stats.day_of_week, Some("tuesday"));
        assert_eq!(stats.hour, Some(17));
    }

    #[test]
    fn test_time_stats_ties_go_to_first_seen() {
        let table = table(vec![record(0, 2017, 5, 1, 9), record(1, 2017, 2, 1, 6)]);
        let stats = TimeStats::compute(&table);
        assert_eq!(stats.month, Some(5));
        assert_eq!(stats.hour, Some(9));
    }

    #[test]
    fn test_station_stats() {
        let mut rows = vec![
            record(0, 2017, 1, 2, 0),
            record(1, 2017, 1, 2, 0),
            record(2, 2017, 1, 2, 0),
        ];
        rows[0].start_station = Some("Canal St".to_string());
        rows[1].end_station = Some("Clark St".to_string());
        rows[2].end_station = Some("Clark St".to_string());

        let stats = StationStats::compute(&table(rows));
        assert_eq!(stats.start_station.as_deref(), Some("A"));
        assert_eq!(stats.end_station.as_deref(), Some("Clark St"));
        assert_eq!(stats.trip.as_deref(), Some("A to Clark St"));
    }

    #[test]
    fn test_duration_stats_skips_missing() {
        let mut rows = vec![
            record(0, 2017, 1, 2, 0),
            record(1, 2017, 1, 2, 0),
            record(2, 2017, 1, 2, 0),
        ];
        rows[0].trip_duration = Some(100.0);
        rows[1].trip_duration = None;
        rows[2].trip_duration = Some(300.0);

        let stats = DurationStats::compute(&table(rows));
        assert_eq!(stats.total, 400.0);
        assert_eq!(stats.mean, Some(200.0));
    }

    #[test]
    fn test_user_type_counts() {
        let stats = UserStats::compute(&with_users(&["Subscriber", "Subscriber", "Customer"]));
        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
        );
        let text = stats.to_string();
        let subscriber = text.find("Subscriber: 2").unwrap();
        let customer = text.find("Customer: 1").unwrap();
        assert!(subscriber < customer);
    }

    #[test]
    fn test_user_stats_without_gender_column() {
        let stats = UserStats::compute(&with_users(&["Customer"]));
        assert_eq!(stats.genders, None);
        assert_eq!(stats.birth_years, None);
        let text = stats.to_string();
        assert!(!text.contains("Gender"));
        assert!(!text.contains("birth year"));
    }

    #[test]
    fn test_user_stats_with_demographics() {
        let mut rows: Vec<_> = (0..4).map(|i| record(i, 2017, 1, 2, 0)).collect();
        rows[0].gender = Some("Male".to_string());
        rows[1].gender = Some("Female".to_string());
        rows[2].gender = Some("Female".to_string());
        rows[0].birth_year = Some(1989);
        rows[1].birth_year = Some(1960);
        rows[2].birth_year = Some(1989);
        rows[3].birth_year = Some(1999);

        let table = TripTable::new(
            Vec::new(),
            BTreeSet::from([OptionalField::Gender, OptionalField::BirthYear]),
            rows,
        );
        let stats = UserStats::compute(&table);

        assert_eq!(
            stats.genders,
            Some(vec![("Female".to_string(), 2), ("Male".to_string(), 1)])
        );
        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: Some(1960),
                most_recent: Some(1999),
                most_common: Some(1989),
            })
        );
        assert!(stats.to_string().contains("Most common birth year: 1989"));
    }

    #[test]
    fn test_empty_table_reports_na() {
        let empty = table(Vec::new());
        assert_eq!(
            TimeStats::compute(&empty).to_string(),
            "Most common month: n/a\nMost common day of week: n/a\nMost common start hour: n/a\n"
        );
        let duration = DurationStats::compute(&empty);
        assert_eq!(duration.total, 0.0);
        assert_eq!(duration.mean, None);
    }

    #[test]
    fn test_timed_layout() {
        let timed = run::<DurationStats>(&table(vec![record(0, 2017, 1, 2, 0)]));
        let text = timed.to_string();
        assert!(text.starts_with("\nCalculating Trip Duration...\n\nTotal travel time: 60\n"));
        assert!(text.contains("\nThis took "));
        assert!(text.ends_with(&format!("{}\n", "-".repeat(SEPARATOR_WIDTH))));
    }
}
