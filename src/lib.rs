//! organize-cli - sort bank exports into categorized income and expense files
//!
//! This library provides the pipeline behind the `organize` binary: transaction
//! exports are loaded, noise rows are dropped by exception patterns, the rest is
//! split into income and expense streams, each row is categorized interactively,
//! and the results are bucketed into monthly and mid-month sums.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Run settings (accounts, column names, outputs)
//! - `error`: Custom error types and exit codes
//! - `models`: Core data models (money, transactions, categories, months)
//! - `services`: Pipeline stages (loader, exceptions, splitter, categorizer, aggregation)
//! - `console`: Prompt and UI ports used while categorizing
//! - `export`: CSV output with the append/header contract
//! - `audit`: JSON-lines log of excluded rows
//! - `reports`: Monthly income/expense/net report
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use organize_cli::services::{aggregation::build_series, split_streams, Loader};
//! use organize_cli::config::ColumnNames;
//!
//! let columns = ColumnNames::default();
//! let rows = Loader::new(&columns, "%Y-%m-%d").load(&paths, false)?;
//! let streams = split_streams(rows);
//! let series = build_series(streams.expense.transactions());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{OrganizeError, OrganizeResult};
