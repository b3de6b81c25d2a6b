//! Monthly Report
//!
//! Income, expense and net monthly series built from categorized output files,
//! viewed through a trailing window.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::warn;

use crate::config::ColumnNames;
use crate::display::format_series_table;
use crate::error::{OrganizeError, OrganizeResult};
use crate::export::{write_series_csv, WriteMode, WriteOutcome};
use crate::models::{FinanceType, MonthlyBucket, MonthlySeries, Transaction};
use crate::services::aggregation::{build_series, merge_series, recent_window};
use crate::services::loader::{FileLoad, Loader};

/// Which series a report shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesKind {
    Income,
    Expense,
    /// Income and expenses merged month by month
    #[default]
    Net,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Net => write!(f, "net"),
        }
    }
}

impl FromStr for SeriesKind {
    type Err = OrganizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("net") {
            return Ok(Self::Net);
        }
        Ok(match s.parse::<FinanceType>()? {
            FinanceType::Income => Self::Income,
            FinanceType::Expense => Self::Expense,
        })
    }
}

/// Monthly Report
#[derive(Debug, Clone, Default)]
pub struct MonthlyReport {
    pub income: MonthlySeries,
    pub expense: MonthlySeries,
    pub net: MonthlySeries,
}

impl MonthlyReport {
    /// Build the report from income and expense rows
    pub fn generate(income: &[Transaction], expense: &[Transaction]) -> Self {
        let income = build_series(income);
        let expense = build_series(expense);
        let net = merge_series(&[&income, &expense]);
        Self {
            income,
            expense,
            net,
        }
    }

    /// Build the report from previously written income and expense files.
    ///
    /// A missing or unreadable file contributes no rows.
    pub fn from_files(
        income_file: &Path,
        expenses_file: &Path,
        date_format: &str,
    ) -> OrganizeResult<Self> {
        let income = read_stream_file(income_file, FinanceType::Income, date_format);
        let expense = read_stream_file(expenses_file, FinanceType::Expense, date_format);
        Ok(Self::generate(&income, &expense))
    }

    pub fn series(&self, kind: SeriesKind) -> &MonthlySeries {
        match kind {
            SeriesKind::Income => &self.income,
            SeriesKind::Expense => &self.expense,
            SeriesKind::Net => &self.net,
        }
    }

    /// Buckets to show: the trailing `window`, or everything when `None`
    pub fn view(&self, kind: SeriesKind, window: Option<usize>) -> &[MonthlyBucket] {
        let series = self.series(kind);
        match window {
            Some(n) => recent_window(series, n),
            None => series.buckets(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, kind: SeriesKind, window: Option<usize>) -> String {
        let buckets = self.view(kind, window);
        let mut output = String::new();
        output.push_str(&format!("Monthly {} report", kind));
        if let Some(n) = window {
            output.push_str(&format!(" (last {} months)", n));
        }
        output.push('\n');
        output.push_str(&format_series_table(buckets));
        output
    }

    /// Export the viewed buckets as CSV
    pub fn export_csv(
        &self,
        kind: SeriesKind,
        window: Option<usize>,
        path: &Path,
        mode: WriteMode,
    ) -> OrganizeResult<WriteOutcome> {
        write_series_csv(self.view(kind, window), path, mode)
    }
}

fn read_stream_file(path: &Path, finance_type: FinanceType, date_format: &str) -> Vec<Transaction> {
    if !path.exists() {
        warn!("{} not found; no {} rows", path.display(), finance_type);
        return Vec::new();
    }

    let columns = ColumnNames {
        amount: finance_type.amount_label().to_string(),
        ..ColumnNames::default()
    };
    match Loader::new(&columns, date_format).load_file(path) {
        FileLoad::Loaded(rows) => rows,
        FileLoad::Skipped(reason) => {
            warn!("Ignoring {}: {:?}", path.display(), reason);
            Vec::new()
        }
    }
}
