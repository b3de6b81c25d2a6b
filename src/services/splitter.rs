//! Income/expense stream splitting
//!
//! Every row lands in exactly one stream: positive amounts are income, zero and
//! negative amounts are expenses. Each stream is then sorted by date, keeping
//! the original order of rows that share a date.

use tracing::debug;

use crate::models::{FinanceType, Transaction, TransactionStream};

/// The two streams produced by a split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitStreams {
    pub income: TransactionStream,
    pub expense: TransactionStream,
}

impl SplitStreams {
    pub fn get(&self, finance_type: FinanceType) -> &TransactionStream {
        match finance_type {
            FinanceType::Income => &self.income,
            FinanceType::Expense => &self.expense,
        }
    }

    pub fn get_mut(&mut self, finance_type: FinanceType) -> &mut TransactionStream {
        match finance_type {
            FinanceType::Income => &mut self.income,
            FinanceType::Expense => &mut self.expense,
        }
    }
}

/// Partition rows into income and expense streams
pub fn split_streams(transactions: Vec<Transaction>) -> SplitStreams {
    let (income, expense): (Vec<Transaction>, Vec<Transaction>) = transactions
        .into_iter()
        .partition(|t| t.finance_type() == FinanceType::Income);

    debug!(
        income = income.len(),
        expense = expense.len(),
        "split transactions"
    );

    SplitStreams {
        income: TransactionStream::new(FinanceType::Income, income),
        expense: TransactionStream::new(FinanceType::Expense, expense),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn txn(day: u32, cents: i64, desc: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            Money::from_cents(cents),
            desc,
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(20, -500, "groceries"),
            txn(3, 250000, "paycheck"),
            txn(5, 0, "zero fee"),
            txn(5, -1000, "rent"),
            txn(1, 12, "interest"),
            Transaction::with_unparsed_date("??", Money::from_cents(-1), "undated"),
        ]
    }

    #[test]
    fn test_total_disjoint_partition() {
        let input = sample();
        let split = split_streams(input.clone());

        assert_eq!(split.income.len() + split.expense.len(), input.len());
        for txn in &input {
            let in_income = split.income.transactions().contains(txn);
            let in_expense = split.expense.transactions().contains(txn);
            assert!(in_income ^ in_expense, "{} must be in exactly one stream", txn);
        }
    }

    #[test]
    fn test_zero_amount_is_expense() {
        let split = split_streams(sample());
        assert!(split
            .expense
            .transactions()
            .iter()
            .any(|t| t.description == "zero fee"));
        assert!(split.income.transactions().iter().all(|t| t.amount.is_positive()));
    }

    #[test]
    fn test_streams_sorted_with_stable_ties() {
        let split = split_streams(sample());

        let expenses: Vec<&str> = split
            .expense
            .transactions()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(expenses, vec!["zero fee", "rent", "groceries", "undated"]);

        let income: Vec<&str> = split
            .get(FinanceType::Income)
            .transactions()
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(income, vec!["interest", "paycheck"]);
    }

    #[test]
    fn test_empty_input() {
        let split = split_streams(Vec::new());
        assert!(split.income.is_empty());
        assert!(split.expense.is_empty());
    }
}
