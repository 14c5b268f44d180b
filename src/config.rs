//! Configuration management for the bikeshare explorer
//!
//! Centralizes configuration options and provides validation.

use crate::{cli::Args, core::filters::City, error::BikeshareError};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Number of trip rows shown per page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Where each city's dataset lives
    pub cities: CityRegistry,
    /// Rows per page in the trip pager
    pub page_size: usize,
}

/// Immutable mapping from city to its CSV dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CityRegistry {
    /// Directory holding the CSV files
    pub data_dir: PathBuf,
    /// File name of each city's dataset, relative to `data_dir`
    pub files: BTreeMap<City, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            cities: CityRegistry::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl CityRegistry {
    /// Standard dataset names located in `data_dir`
    pub fn in_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        let files = BTreeMap::from([
            (City::Chicago, "chicago.csv".to_string()),
            (City::NewYorkCity, "new_york_city.csv".to_string()),
            (City::Washington, "washington.csv".to_string()),
        ]);

        Self {
            data_dir: data_dir.into(),
            files,
        }
    }

    /// Full path of a city's dataset
    pub fn path_for(&self, city: City) -> Result<PathBuf, BikeshareError> {
        self.files
            .get(&city)
            .map(|file| self.data_dir.join(file))
            .ok_or_else(|| BikeshareError::config(format!("No dataset registered for {city}")))
    }

    /// Directory holding the datasets
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, BikeshareError> {
        let config = Self {
            debug: args.debug,
            cities: CityRegistry::in_dir(&args.data_dir),
            ..Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), BikeshareError> {
        if !self.cities.data_dir().is_dir() {
            return Err(BikeshareError::validation(format!(
                "Data directory not found: {}",
                self.cities.data_dir().display()
            )));
        }

        if self.page_size == 0 {
            return Err(BikeshareError::validation("Page size must be at least 1"));
        }

        Ok(())
    }
}
