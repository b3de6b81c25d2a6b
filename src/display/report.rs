//! Report formatting utilities for terminal output

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Money, MonthlyBucket};

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Sum")]
    sum: String,
    #[tabled(rename = "Mid-month")]
    mid_sum: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Render buckets as a table with a magnitude bar per month
pub fn format_series_table(buckets: &[MonthlyBucket]) -> String {
    if buckets.is_empty() {
        return "No monthly data.\n".to_string();
    }

    let max = buckets
        .iter()
        .map(|b| b.sum.cents().abs())
        .max()
        .unwrap_or(0) as f64;

    let rows: Vec<SeriesRow> = buckets
        .iter()
        .map(|b| SeriesRow {
            month: b.year_month.to_string(),
            sum: b.sum.to_decimal_string(),
            mid_sum: b.mid_sum.to_decimal_string(),
            bar: format_bar(b.sum.cents().abs() as f64, max, 20),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()));

    let total: Money = buckets.iter().map(|b| b.sum).sum();
    format!("{}\nTotal: {}\n", table, total.to_decimal_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearMonth;

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_series_table() {
        let buckets = vec![
            MonthlyBucket::new(
                YearMonth::new(2021, 1).unwrap(),
                Money::from_cents(-1500),
                Money::from_cents(-1000),
            ),
            MonthlyBucket::new(
                YearMonth::new(2021, 2).unwrap(),
                Money::from_cents(-300),
                Money::from_cents(-800),
            ),
        ];

        let table = format_series_table(&buckets);
        assert!(table.contains("2021-01"));
        assert!(table.contains("-15.00"));
        assert!(table.contains("-8.00"));
        assert!(table.contains("Total: -18.00"));
        assert_eq!(format_series_table(&[]), "No monthly data.\n");
    }
}
