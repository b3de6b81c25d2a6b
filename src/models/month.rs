//! Calendar months and monthly aggregate series
//!
//! `YearMonth` is the aggregation key. It knows its own length (Gregorian leap
//! years included), its predecessor and the mid-month window that runs from the
//! 12th of the previous month through the 12th of this one.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::money::Money;

/// Day of month anchoring both ends of a mid-month window
pub const MID_MONTH_ANCHOR_DAY: u32 = 12;

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Last day of `month` (1-12) in `year`
///
/// # Examples
/// ```
/// use organize_cli::models::month::last_day_of_month;
/// assert_eq!(last_day_of_month(2, 2020), 29);
/// assert_eq!(last_day_of_month(2, 2021), 28);
/// ```
pub fn last_day_of_month(month: u32, year: i32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Previous month key for a two-digit month and a year, e.g. ("01", "2021") -> "2020-12"
pub fn previous_month_key(month: &str, year: &str) -> Result<String, MonthParseError> {
    let ym = YearMonth::parse(&format!("{}-{}", year.trim(), month.trim()))?;
    Ok(ym.previous().to_string())
}

/// A (year, month) pair identifying a calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a key; `None` unless `month` is in 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// January rolls back to December of the previous year
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Date for a day of this month, `None` past the end of the month
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Inclusive window from the 12th of the previous month to the 12th of this month
    pub fn mid_month_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.previous().day(MID_MONTH_ANCHOR_DAY)?;
        let end = self.day(MID_MONTH_ANCHOR_DAY)?;
        Some((start, end))
    }

    /// Parse a "YYYY-MM" key
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month).ok_or(MonthParseError::InvalidMonth(month))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for month key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

/// Aggregates for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub year_month: YearMonth,
    /// Sum of every transaction dated in the month
    pub sum: Money,
    /// Sum over the mid-month window ending in this month
    pub mid_sum: Money,
}

impl MonthlyBucket {
    pub fn new(year_month: YearMonth, sum: Money, mid_sum: Money) -> Self {
        Self {
            year_month,
            sum,
            mid_sum,
        }
    }
}

/// Chronologically ascending buckets with at most one bucket per month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySeries {
    buckets: Vec<MonthlyBucket>,
}

impl MonthlySeries {
    /// Build a series, summing buckets that share a month and sorting by month
    pub fn from_buckets(buckets: impl IntoIterator<Item = MonthlyBucket>) -> Self {
        let mut by_month: BTreeMap<YearMonth, MonthlyBucket> = BTreeMap::new();
        for bucket in buckets {
            by_month
                .entry(bucket.year_month)
                .and_modify(|existing| {
                    existing.sum += bucket.sum;
                    existing.mid_sum += bucket.mid_sum;
                })
                .or_insert(bucket);
        }
        Self {
            buckets: by_month.into_values().collect(),
        }
    }

    /// Combine several series (e.g. income and expenses) month by month
    pub fn merge<'a>(series: impl IntoIterator<Item = &'a MonthlySeries>) -> Self {
        Self::from_buckets(
            series
                .into_iter()
                .flat_map(|s| s.buckets.iter().copied()),
        )
    }

    /// The most recent `n` buckets, or the whole series when it is shorter
    pub fn trailing(&self, n: usize) -> &[MonthlyBucket] {
        let start = self.buckets.len().saturating_sub(n);
        &self.buckets[start..]
    }

    pub fn buckets(&self) -> &[MonthlyBucket] {
        &self.buckets
    }

    pub fn get(&self, year_month: YearMonth) -> Option<&MonthlyBucket> {
        self.buckets
            .binary_search_by_key(&year_month, |b| b.year_month)
            .ok()
            .map(|idx| &self.buckets[idx])
    }

    pub fn total(&self) -> Money {
        self.buckets.iter().map(|b| b.sum).sum()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn bucket(year: i32, month: u32, cents: i64) -> MonthlyBucket {
        MonthlyBucket::new(ym(year, month), Money::from_cents(cents), Money::zero())
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2, 2020), 29);
        assert_eq!(last_day_of_month(2, 2021), 28);
        assert_eq!(last_day_of_month(2, 1900), 28);
        assert_eq!(last_day_of_month(2, 2000), 29);
        for year in [1999, 2020, 2024] {
            assert_eq!(last_day_of_month(4, year), 30);
            assert_eq!(last_day_of_month(1, year), 31);
        }
        assert_eq!(last_day_of_month(11, 2021), 30);
        assert_eq!(last_day_of_month(12, 2021), 31);
    }

    #[test]
    fn test_last_day_agrees_with_calendar() {
        for year in [1900, 2000, 2021, 2024] {
            for month in 1..=12 {
                let last = ym(year, month)
                    .day(last_day_of_month(month, year))
                    .unwrap();
                assert_eq!(last.succ_opt().unwrap().day(), 1);
            }
        }
    }

    #[test]
    fn test_previous_month_key() {
        assert_eq!(previous_month_key("01", "2021").unwrap(), "2020-12");
        assert_eq!(previous_month_key("06", "2021").unwrap(), "2021-05");
        assert_eq!(previous_month_key("12", "2021").unwrap(), "2021-11");
        assert_eq!(previous_month_key("11", "2021").unwrap(), "2021-10");
        assert!(previous_month_key("13", "2021").is_err());
    }

    #[test]
    fn test_previous() {
        assert_eq!(ym(2025, 1).previous(), ym(2024, 12));
        assert_eq!(ym(2025, 7).previous(), ym(2025, 6));
    }

    #[test]
    fn test_mid_month_window() {
        let (start, end) = ym(2021, 2).mid_month_window().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2021, 1, 12).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2021, 2, 12).unwrap());

        let (start, end) = ym(2021, 1).mid_month_window().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2020, 12, 12).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2021, 1, 12).unwrap());
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(YearMonth::parse("2025-01").unwrap(), ym(2025, 1));
        assert_eq!(ym(2025, 3).to_string(), "2025-03");
        assert_eq!(
            YearMonth::parse("2025-13").unwrap_err(),
            MonthParseError::InvalidMonth(13)
        );
        assert!(YearMonth::parse("January").is_err());
        assert!(YearMonth::new(2025, 0).is_none());
    }

    #[test]
    fn test_from_buckets_merges_duplicates_and_sorts() {
        let series = MonthlySeries::from_buckets(vec![
            bucket(2021, 2, -300),
            bucket(2021, 1, -1500),
            bucket(2021, 2, 1000),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.buckets()[0].year_month, ym(2021, 1));
        assert_eq!(series.get(ym(2021, 2)).unwrap().sum, Money::from_cents(700));
        assert_eq!(series.total(), Money::from_cents(-800));
    }

    #[test]
    fn test_merge_income_and_expense() {
        let income = MonthlySeries::from_buckets(vec![bucket(2021, 1, 50000), bucket(2021, 3, 100)]);
        let expense = MonthlySeries::from_buckets(vec![bucket(2021, 1, -20000), bucket(2021, 2, -10)]);

        let net = MonthlySeries::merge([&income, &expense]);
        let months: Vec<String> = net.buckets().iter().map(|b| b.year_month.to_string()).collect();
        assert_eq!(months, vec!["2021-01", "2021-02", "2021-03"]);
        assert_eq!(net.get(ym(2021, 1)).unwrap().sum, Money::from_cents(30000));
    }

    #[test]
    fn test_trailing_window() {
        let buckets = (0..20).map(|i: i64| {
            let month = ym(2020 + (i / 12) as i32, (i % 12) as u32 + 1);
            MonthlyBucket::new(month, Money::from_cents(i), Money::zero())
        });
        let series = MonthlySeries::from_buckets(buckets);

        let window = series.trailing(15);
        assert_eq!(window.len(), 15);
        // Buckets 6 through 20 (1-based) in order
        let sums: Vec<i64> = window.iter().map(|b| b.sum.cents()).collect();
        assert_eq!(sums, (5..20).collect::<Vec<_>>());
        assert_eq!(window[0].year_month, ym(2020, 6));
    }

    #[test]
    fn test_trailing_window_short_series() {
        let series = MonthlySeries::from_buckets(vec![bucket(2021, 1, 1), bucket(2021, 2, 2)]);
        assert_eq!(series.trailing(15).len(), 2);
        assert!(MonthlySeries::default().trailing(15).is_empty());
    }
}
