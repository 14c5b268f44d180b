//! Utility modules for common functionality

pub mod console;

pub use console::Console;
