//! Export module
//!
//! Writes categorized income/expense streams and monthly series as CSV files
//! that can be appended to run after run.

pub mod csv;

pub use self::csv::{
    check_stream_target, stream_header, write_records, write_series_csv, write_stream_csv,
    WriteMode, WriteOutcome,
};
