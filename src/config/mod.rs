//! Configuration module
//!
//! Run settings: account sources, column mapping, exception files, output
//! paths and category tables.

pub mod settings;

pub use settings::{AccountSource, CategorySettings, ColumnNames, Settings};
