//! Audit entry data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Money, Transaction};

/// A single row removed by an exception pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionEntry {
    /// When the row was removed (UTC)
    pub timestamp: DateTime<Utc>,

    /// The pattern that matched the description
    pub pattern: String,

    /// Date as it appeared in the source
    pub date: String,

    pub amount: Money,

    pub description: String,
}

impl ExclusionEntry {
    pub fn new(pattern: impl Into<String>, transaction: &Transaction) -> Self {
        Self {
            timestamp: Utc::now(),
            pattern: pattern.into(),
            date: transaction.date_display(),
            amount: transaction.amount,
            description: transaction.description.clone(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] '{}' removed {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.pattern,
            self.date,
            self.amount.to_decimal_string(),
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_entry() {
        let txn = Transaction::new(
            NaiveDate::from_ymd_opt(2021, 3, 4).unwrap(),
            Money::from_cents(-2500),
            "ONLINE TRANSFER TO SAVINGS",
        );
        let entry = ExclusionEntry::new("TRANSFER", &txn);

        assert_eq!(entry.pattern, "TRANSFER");
        assert_eq!(entry.date, "2021-03-04");
        assert_eq!(entry.amount, Money::from_cents(-2500));
        assert!(entry
            .format_human_readable()
            .ends_with("'TRANSFER' removed 2021-03-04 -25.00 ONLINE TRANSFER TO SAVINGS"));
    }
}
