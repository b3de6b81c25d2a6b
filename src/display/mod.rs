//! Display formatting for terminal output
//!
//! Provides utilities for formatting transactions, category tables and monthly
//! summaries for terminal display.

pub mod report;
pub mod transaction;

pub use report::{format_bar, format_series_table};
pub use transaction::{format_category_table, format_transaction_register, format_transaction_row};

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
