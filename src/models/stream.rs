//! Per-finance-type transaction streams

use serde::{Deserialize, Serialize};

use super::finance::FinanceType;
use super::money::Money;
use super::transaction::Transaction;

/// Transactions of a single finance type, ascending by date, stable on ties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStream {
    finance_type: FinanceType,
    transactions: Vec<Transaction>,
}

impl TransactionStream {
    /// Build a stream, sorting by date while keeping input order among equal dates
    pub fn new(finance_type: FinanceType, mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by(Transaction::cmp_by_date);
        Self {
            finance_type,
            transactions,
        }
    }

    pub fn finance_type(&self) -> FinanceType {
        self.finance_type
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Mutable access for categorization; the sort order is not affected
    pub fn transactions_mut(&mut self) -> &mut [Transaction] {
        &mut self.transactions
    }

    pub fn total(&self) -> Money {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(day: u32, cents: i64, desc: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            Money::from_cents(cents),
            desc,
        )
    }

    #[test]
    fn test_sorted_and_stable() {
        let stream = TransactionStream::new(
            FinanceType::Expense,
            vec![txn(20, -1, "late"), txn(5, -2, "first"), txn(5, -3, "second")],
        );

        let descs: Vec<&str> = stream
            .transactions()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(descs, vec!["first", "second", "late"]);
        assert_eq!(stream.total(), Money::from_cents(-6));
    }
}
