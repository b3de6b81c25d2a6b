//! Reports module
//!
//! Monthly income, expense and net summaries.

pub mod monthly;

pub use monthly::{MonthlyReport, SeriesKind};
