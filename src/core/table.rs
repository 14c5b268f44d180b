//! In-memory trip table
//!
//! Holds the typed trip records of one city together with the raw cell text
//! used for paging, and answers which optional columns the dataset carries.

use crate::core::filters::FilterSelection;
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use std::collections::BTreeSet;
use std::fmt;

/// Optional columns that only some cities provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionalField {
    Gender,
    BirthYear,
}

impl OptionalField {
    /// All optional fields
    pub const ALL: [Self; 2] = [Self::Gender, Self::BirthYear];

    /// Column header carrying this field
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Gender => "Gender",
            Self::BirthYear => "Birth Year",
        }
    }
}

impl fmt::Display for OptionalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One trip, typed for statistics and kept raw for display
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Zero-based position of the row in the source file
    pub index: usize,
    pub start_time: NaiveDateTime,
    /// Duration in seconds
    pub trip_duration: Option<f64>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// Raw cell text in header order
    pub cells: Vec<String>,
}

impl TripRecord {
    /// Calendar month of the start time (1-12)
    pub fn month(&self) -> u32 {
        self.start_time.month()
    }

    /// Weekday of the start time
    pub fn day_of_week(&self) -> Weekday {
        self.start_time.weekday()
    }

    /// Hour of day of the start time (0-23)
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// "start to end" label, present only when both stations are known
    pub fn route(&self) -> Option<String> {
        match (&self.start_station, &self.end_station) {
            (Some(start), Some(end)) => Some(format!("{start} to {end}")),
            _ => None,
        }
    }
}

/// Ordered collection of trips for one city
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripTable {
    columns: Vec<String>,
    optional: BTreeSet<OptionalField>,
    rows: Vec<TripRecord>,
}

impl TripTable {
    /// Build a table from its header, available optional fields and rows
    pub fn new(
        columns: Vec<String>,
        optional: BTreeSet<OptionalField>,
        rows: Vec<TripRecord>,
    ) -> Self {
        Self {
            columns,
            optional,
            rows,
        }
    }

    /// Original column names in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Optional fields present in this dataset
    pub const fn optional_fields(&self) -> &BTreeSet<OptionalField> {
        &self.optional
    }

    /// Whether the dataset carries an optional field
    pub fn has(&self, field: OptionalField) -> bool {
        self.optional.contains(&field)
    }

    pub fn rows(&self) -> &[TripRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only the rows matching the selection, preserving order
    #[must_use]
    pub fn filter(mut self, selection: &FilterSelection) -> Self {
        self.rows.retain(|row| selection.matches(&row.start_time));
        self
    }

    /// Rows in `[offset, offset + len)`, clamped to the table
    pub fn slice(&self, offset: usize, len: usize) -> &[TripRecord] {
        let start = offset.min(self.rows.len());
        let end = offset.saturating_add(len).min(self.rows.len());
        &self.rows[start..end]
    }
}
