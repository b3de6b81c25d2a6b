//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod categories;
pub mod report;
pub mod run;

pub use categories::{handle_categories_command, CategoriesArgs};
pub use report::{handle_report_command, ReportArgs};
pub use run::{handle_run_command, run_pipeline, RunArgs, RunSummary};
