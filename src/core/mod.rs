//! Core functionality for trip exploration
//!
//! Contains filter validation, dataset loading, the statistics reports, the
//! row pager and the interactive session tying them together.

pub mod filters;
pub mod loader;
pub mod pager;
pub mod reports;
pub mod session;
pub mod stats;
pub mod table;

pub use filters::{City, DayFilter, FilterSelection, MonthFilter};
pub use loader::TripLoader;
pub use pager::Pager;
pub use session::Session;
pub use table::{OptionalField, TripRecord, TripTable};
