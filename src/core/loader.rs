//! Trip data loading
//!
//! Reads a city's CSV dataset into a [`TripTable`] and applies the session's
//! month and day filters.

use crate::{
    config::CityRegistry,
    core::{
        filters::FilterSelection,
        table::{OptionalField, TripRecord, TripTable},
    },
    error::{BikeshareError, Result},
};
use chrono::NaiveDateTime;
use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, info, instrument};

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Loads city datasets resolved through a [`CityRegistry`]
#[derive(Debug)]
pub struct TripLoader<'a> {
    registry: &'a CityRegistry,
}

impl<'a> TripLoader<'a> {
    /// Create a loader over the given registry
    #[must_use]
    pub const fn new(registry: &'a CityRegistry) -> Self {
        Self { registry }
    }

    /// Load the selected city and keep only rows matching the filters
    #[instrument(skip_all, fields(selection = %selection))]
    pub fn load(&self, selection: &FilterSelection) -> Result<TripTable> {
        let path = self.registry.path_for(selection.city)?;
        debug!("Opening dataset: {}", path.display());

        let file =
            File::open(&path).map_err(|e| BikeshareError::file_system("open", &path, e))?;
        let table = read_table(BufReader::new(file), &path)?;
        let total = table.len();

        let table = table.filter(selection);
        info!("Loaded {} of {} trips for {}", table.len(), total, selection);
        Ok(table)
    }
}

/// Header positions of the columns the table needs
struct ColumnMap {
    start_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &[String], path: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require =
            |name: &str| find(name).ok_or_else(|| BikeshareError::missing_column(name, path));

        let start_time = require(START_TIME)?;
        // End Time feeds no statistic and is only carried as raw text
        require(END_TIME)?;

        Ok(Self {
            start_time,
            trip_duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(OptionalField::Gender.column_name()),
            birth_year: find(OptionalField::BirthYear.column_name()),
        })
    }

    fn optional_fields(&self) -> BTreeSet<OptionalField> {
        OptionalField::ALL
            .into_iter()
            .filter(|field| match field {
                OptionalField::Gender => self.gender.is_some(),
                OptionalField::BirthYear => self.birth_year.is_some(),
            })
            .collect()
    }
}

/// Parse CSV trip data from any reader. `path` is only used in errors.
pub fn read_table<R: Read>(reader: R, path: &Path) -> Result<TripTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| BikeshareError::csv(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    debug!("Dataset columns: {:?}", headers);

    let columns = ColumnMap::resolve(&headers, path)?;
    let optional = columns.optional_fields();
    debug!("Optional fields present: {:?}", optional);

    let mut rows = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| BikeshareError::csv(path, e))?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        rows.push(parse_row(index, cells, &columns, path)?);
    }

    Ok(TripTable::new(headers, optional, rows))
}

fn parse_row(
    index: usize,
    cells: Vec<String>,
    columns: &ColumnMap,
    path: &Path,
) -> Result<TripRecord> {
    let row = index + 1;
    let cell = |idx: usize| cells.get(idx).map_or("", |c| c.trim());
    let text = |idx: usize| Some(cell(idx)).filter(|c| !c.is_empty()).map(str::to_string);

    let raw_start = cell(columns.start_time);
    let start_time = parse_timestamp(raw_start)
        .ok_or_else(|| BikeshareError::invalid_value(START_TIME, row, raw_start, path))?;

    let trip_duration = parse_number(cell(columns.trip_duration))
        .map_err(|value| BikeshareError::invalid_value(TRIP_DURATION, row, value, path))?;

    let birth_year = match columns.birth_year {
        Some(idx) => parse_year(cell(idx)).map_err(|value| {
            BikeshareError::invalid_value(OptionalField::BirthYear.column_name(), row, value, path)
        })?,
        None => None,
    };

    Ok(TripRecord {
        index,
        start_time,
        trip_duration,
        start_station: text(columns.start_station),
        end_station: text(columns.end_station),
        user_type: text(columns.user_type),
        gender: columns.gender.and_then(text),
        birth_year,
        cells,
    })
}

/// Parse a start timestamp in any of the accepted layouts
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Empty cells are missing values; anything else must be numeric
fn parse_number(value: &str) -> std::result::Result<Option<f64>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<f64>().map(Some).map_err(|_| value.to_string())
}

/// Birth years arrive as floats ("1989.0") and must be whole
fn parse_year(value: &str) -> std::result::Result<Option<i32>, String> {
    match parse_number(value)? {
        Some(year) if year.fract() == 0.0 && year.abs() < f64::from(i32::MAX) => {
            Ok(Some(year as i32))
        }
        Some(_) => Err(value.to_string()),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filters::{City, DayFilter, MonthFilter};
    use chrono::Weekday;
    use std::fs;
    use tempfile::TempDir;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Subscriber,Male,1981.0
304487,2017-03-06 13:49:38,2017-03-06 13:55:28,350,Christiana Ave & Lawrence Ave,St. Louis Ave & Balmoral Ave,Subscriber,,
45207,2017-01-17 14:53:07,2017-01-17 15:02:01,534,Clark St & Randolph St,Desplaines St & Jackson Blvd,Customer,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
";

    fn write_registry(temp_dir: &TempDir) -> CityRegistry {
        fs::write(temp_dir.path().join("chicago.csv"), CHICAGO).unwrap();
        fs::write(temp_dir.path().join("washington.csv"), WASHINGTON).unwrap();
        CityRegistry::in_dir(temp_dir.path())
    }

    #[test]
    fn test_read_table_with_optional_columns() {
        let table = read_table(CHICAGO.as_bytes(), Path::new("chicago.csv")).unwrap();

        assert_eq!(table.len(), 5);
        assert!(table.has(OptionalField::Gender));
        assert!(table.has(OptionalField::BirthYear));
        assert_eq!(table.columns()[1], "Start Time");

        let first = &table.rows()[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.month(), 6);
        assert_eq!(first.day_of_week(), Weekday::Fri);
        assert_eq!(first.trip_duration, Some(321.0));
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        assert_eq!(first.cells[0], "1423854");

        let fourth = &table.rows()[3];
        assert_eq!(fourth.gender, None);
        assert_eq!(fourth.birth_year, None);
    }

    #[test]
    fn test_read_table_without_optional_columns() {
        let table = read_table(WASHINGTON.as_bytes(), Path::new("washington.csv")).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.optional_fields().is_empty());
        assert_eq!(table.rows()[0].trip_duration, Some(489.066));
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "Start Time,Trip Duration\n2017-01-01 00:00:00,10\n";
        let err = read_table(csv.as_bytes(), Path::new("broken.csv")).unwrap_err();
        assert!(matches!(
            err,
            BikeshareError::MissingColumn { ref column, .. } if column == END_TIME
        ));
    }

    #[test]
    fn test_invalid_timestamp() {
        let csv = "Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
                   yesterday,x,10,A,B,Subscriber\n";
        let err = read_table(csv.as_bytes(), Path::new("broken.csv")).unwrap_err();
        assert!(matches!(
            err,
            BikeshareError::InvalidValue { ref column, row: 1, .. } if column == START_TIME
        ));
    }

    #[test]
    fn test_invalid_duration() {
        let csv = "Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
                   2017-01-01 00:00:00,x,long,A,B,Subscriber\n";
        let err = read_table(csv.as_bytes(), Path::new("broken.csv")).unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidValue { .. }));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let csv = "Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
                   2017-01-01 00:00:00,x\n";
        let err = read_table(csv.as_bytes(), Path::new("broken.csv")).unwrap_err();
        assert!(matches!(err, BikeshareError::Csv { .. }));
    }

    #[test]
    fn test_parse_timestamp_layouts() {
        assert!(parse_timestamp("2017-01-01 09:07:57").is_some());
        assert!(parse_timestamp("2017-01-01 09:07:57.123").is_some());
        assert!(parse_timestamp("2017-01-01T09:07:57").is_some());
        assert!(parse_timestamp("2017-01-01 09:07").is_some());
        assert!(parse_timestamp("01/01/2017").is_none());
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1989.0"), Ok(Some(1989)));
        assert_eq!(parse_year("1989"), Ok(Some(1989)));
        assert_eq!(parse_year(""), Ok(None));
        assert!(parse_year("1989.5").is_err());
    }

    #[test]
    fn test_load_all_returns_full_table() {
        let temp_dir = TempDir::new().unwrap();
        let registry = write_registry(&temp_dir);
        let loader = TripLoader::new(&registry);

        let table = loader.load(&FilterSelection::all(City::Chicago)).unwrap();
        let unfiltered = read_table(CHICAGO.as_bytes(), Path::new("chicago.csv")).unwrap();
        assert_eq!(table, unfiltered);
    }

    #[test]
    fn test_load_filters_by_month() {
        let temp_dir = TempDir::new().unwrap();
        let registry = write_registry(&temp_dir);
        let loader = TripLoader::new(&registry);

        let selection = FilterSelection {
            month: MonthFilter::Month(1),
            ..FilterSelection::all(City::Chicago)
        };
        let table = loader.load(&selection).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.rows().iter().all(|r| r.month() == 1));
        let indices: Vec<usize> = table.rows().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![2, 4]);
    }

    #[test]
    fn test_load_filters_by_day() {
        let temp_dir = TempDir::new().unwrap();
        let registry = write_registry(&temp_dir);
        let loader = TripLoader::new(&registry);

        let selection = FilterSelection {
            day: DayFilter::Day(Weekday::Sat),
            ..FilterSelection::all(City::Washington)
        };
        let table = loader.load(&selection).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].day_of_week(), Weekday::Sat);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let registry = write_registry(&temp_dir);
        let loader = TripLoader::new(&registry);

        let err = loader
            .load(&FilterSelection::all(City::NewYorkCity))
            .unwrap_err();
        assert!(matches!(err, BikeshareError::FileSystem { .. }));
    }
}
