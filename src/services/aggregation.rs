//! Monthly aggregation
//!
//! Buckets transactions by calendar month and computes, for each month, the
//! plain month sum and the mid-month sum over the window from the 12th of the
//! previous month through the 12th of the month (both ends inclusive).
//! Rows without a parsed date never contribute.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Money, MonthlyBucket, MonthlySeries, Transaction, YearMonth};

/// Trailing window length used by reports unless configured otherwise
pub const DEFAULT_WINDOW: usize = 15;

/// Sum of amounts per month, for every month with at least one dated row
pub fn monthly_sums(transactions: &[Transaction]) -> BTreeMap<YearMonth, Money> {
    let mut sums = BTreeMap::new();
    let mut undated = 0usize;
    for txn in transactions {
        match txn.year_month() {
            Some(ym) => *sums.entry(ym).or_insert_with(Money::zero) += txn.amount,
            None => undated += 1,
        }
    }
    if undated > 0 {
        debug!(undated, "rows without a date left out of monthly sums");
    }
    sums
}

/// Sum over the mid-month window ending on the 12th of `year_month`
pub fn mid_month_sum(transactions: &[Transaction], year_month: YearMonth) -> Money {
    let Some((start, end)) = year_month.mid_month_window() else {
        return Money::zero();
    };
    transactions
        .iter()
        .filter(|t| t.date.is_some_and(|d| d >= start && d <= end))
        .map(|t| t.amount)
        .sum()
}

/// Build the series for one stream: one bucket per month present in the data
pub fn build_series(transactions: &[Transaction]) -> MonthlySeries {
    let buckets: Vec<MonthlyBucket> = monthly_sums(transactions)
        .into_iter()
        .map(|(ym, sum)| MonthlyBucket::new(ym, sum, mid_month_sum(transactions, ym)))
        .collect();
    MonthlySeries::from_buckets(buckets)
}

/// Combine per-stream series, summing buckets that share a month
pub fn merge_series(series: &[&MonthlySeries]) -> MonthlySeries {
    MonthlySeries::merge(series.iter().copied())
}

/// Trailing `window` buckets in chronological order
pub fn recent_window(series: &MonthlySeries, window: usize) -> &[MonthlyBucket] {
    series.trailing(window)
}
