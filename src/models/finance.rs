//! Finance type: the two streams every transaction is split into

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OrganizeError;

use super::money::Money;

/// Which stream a transaction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinanceType {
    Income,
    Expense,
}

impl FinanceType {
    /// Classify an amount. Zero is an expense.
    pub fn classify(amount: Money) -> Self {
        if amount.is_positive() {
            Self::Income
        } else {
            Self::Expense
        }
    }

    /// Column label for the amount in output files
    pub fn amount_label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Label for the counterparty field ("From" for income, "To" for expenses)
    pub fn counterparty_label(&self) -> &'static str {
        match self {
            Self::Income => "From",
            Self::Expense => "To",
        }
    }
}

impl fmt::Display for FinanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for FinanceType {
    type Err = OrganizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            _ => Err(OrganizeError::InvalidFinanceType(s.to_string())),
        }
    }
}
