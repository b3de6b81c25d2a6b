//! Transaction model
//!
//! A transaction is one row of a bank export. The loader creates it with the date,
//! amount and description; categorization later fills in the category label, the
//! counterparty and an optional note.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::finance::FinanceType;
use super::money::Money;
use super::month::YearMonth;

/// A single imported transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Parsed date; `None` when the source text could not be parsed
    pub date: Option<NaiveDate>,

    /// Date text as it appeared in the source file
    #[serde(default)]
    pub raw_date: String,

    /// Amount (positive for inflow, zero or negative for outflow)
    pub amount: Money,

    /// Bank-supplied description, the target of exception patterns
    #[serde(default)]
    pub description: String,

    /// Category label chosen during categorization
    pub category: Option<String>,

    /// Payee or payer ("To" for expenses, "From" for income)
    pub counterparty: Option<String>,

    /// Free-text note
    pub note: Option<String>,
}

impl Transaction {
    /// Create an uncategorized transaction with a parsed date
    pub fn new(date: NaiveDate, amount: Money, description: impl Into<String>) -> Self {
        Self {
            date: Some(date),
            raw_date: date.format("%Y-%m-%d").to_string(),
            amount,
            description: description.into(),
            category: None,
            counterparty: None,
            note: None,
        }
    }

    /// Create a transaction whose date text could not be parsed
    pub fn with_unparsed_date(
        raw_date: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: None,
            raw_date: raw_date.into(),
            amount,
            description: description.into(),
            category: None,
            counterparty: None,
            note: None,
        }
    }

    pub fn finance_type(&self) -> FinanceType {
        FinanceType::classify(self.amount)
    }

    /// Aggregation key; `None` excludes the row from date-keyed sums
    pub fn year_month(&self) -> Option<YearMonth> {
        self.date.map(YearMonth::from_date)
    }

    /// Date as written to output files
    pub fn date_display(&self) -> String {
        match self.date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => self.raw_date.clone(),
        }
    }

    /// Chronological ordering with unparseable dates after every dated row
    pub fn cmp_by_date(&self, other: &Self) -> Ordering {
        match (self.date, other.date) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date_display(),
            self.amount.to_decimal_string(),
            self.description
        )
    }
}
