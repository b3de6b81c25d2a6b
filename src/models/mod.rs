//! Core data models
//!
//! This module contains the data structures the pipeline passes along:
//! transactions, the streams they are split into, category tables and the
//! monthly aggregates computed from them.

pub mod category;
pub mod finance;
pub mod money;
pub mod month;
pub mod stream;
pub mod transaction;

pub use category::{CategoryTable, CategoryTables, CategoryValidationError};
pub use finance::FinanceType;
pub use money::Money;
pub use month::{MonthlyBucket, MonthlySeries, YearMonth};
pub use stream::TransactionStream;
pub use transaction::Transaction;
