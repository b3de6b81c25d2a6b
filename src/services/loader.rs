//! Transaction loading and normalization
//!
//! Reads one or more bank exports, maps their columns onto date, description
//! and amount, and concatenates the rows in file order. Files that lack a
//! required column or hold no rows are skipped with a warning; the load only
//! fails when a file is missing or nothing usable remains.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use crate::config::ColumnNames;
use crate::error::{OrganizeError, OrganizeResult};
use crate::models::{Money, Transaction};

/// Date formats tried after the configured one
const FALLBACK_DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%d/%m/%y", "%Y/%m/%d", "%m-%d-%Y",
    "%d-%m-%Y",
];

/// Why a file contributed no rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Required columns absent from the header
    MissingColumns(Vec<String>),
    /// Header present but no data rows
    Empty,
    /// File could not be opened or its header could not be read
    Unreadable(String),
}

/// Result of reading a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLoad {
    Loaded(Vec<Transaction>),
    Skipped(SkipReason),
}

/// Rows read from a group of files and how many of those files were usable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedFiles {
    pub transactions: Vec<Transaction>,
    pub usable_files: usize,
}

/// Positions of the three required columns
#[derive(Debug, Clone, Copy)]
struct ColumnIndexes {
    date: usize,
    description: usize,
    amount: usize,
}

/// Reads transaction exports using one column mapping
pub struct Loader<'a> {
    columns: &'a ColumnNames,
    date_format: &'a str,
}

impl<'a> Loader<'a> {
    pub fn new(columns: &'a ColumnNames, date_format: &'a str) -> Self {
        Self {
            columns,
            date_format,
        }
    }

    /// Load and concatenate `paths`, negating amounts when `reverse_sign` is set
    pub fn load(&self, paths: &[PathBuf], reverse_sign: bool) -> OrganizeResult<Vec<Transaction>> {
        let loaded = self.load_files(paths, reverse_sign)?;
        if loaded.usable_files == 0 {
            return Err(OrganizeError::NoUsableFiles);
        }
        Ok(loaded.transactions)
    }

    /// Like [`Loader::load`], but a group with no usable file is not an error.
    ///
    /// Callers combining several groups decide whether anything usable remains.
    pub fn load_files(
        &self,
        paths: &[PathBuf],
        reverse_sign: bool,
    ) -> OrganizeResult<LoadedFiles> {
        let mut transactions = Vec::new();
        let mut usable_files = 0;

        for path in paths {
            if !path.exists() {
                return Err(OrganizeError::FileNotFound(path.clone()));
            }

            match self.load_file(path) {
                FileLoad::Loaded(rows) => {
                    info!("Loaded {} rows from {}", rows.len(), path.display());
                    usable_files += 1;
                    transactions.extend(rows);
                }
                FileLoad::Skipped(reason) => {
                    warn!("Skipping {}: {}", path.display(), describe(&reason));
                }
            }
        }

        if reverse_sign {
            debug!("Reversing the sign of {} amounts", transactions.len());
            for txn in &mut transactions {
                txn.amount = -txn.amount;
            }
        }

        Ok(LoadedFiles {
            transactions,
            usable_files,
        })
    }

    /// Read a single file that is known to exist
    pub fn load_file(&self, path: &Path) -> FileLoad {
        match File::open(path) {
            Ok(file) => self.parse_reader(file),
            Err(e) => FileLoad::Skipped(SkipReason::Unreadable(e.to_string())),
        }
    }

    /// Parse CSV content from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> FileLoad {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers = match reader.headers() {
            Ok(headers) => headers.clone(),
            Err(e) => return FileLoad::Skipped(SkipReason::Unreadable(e.to_string())),
        };

        let indexes = match self.locate_columns(&headers) {
            Ok(indexes) => indexes,
            Err(missing) => return FileLoad::Skipped(SkipReason::MissingColumns(missing)),
        };

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Row {}: error reading CSV record: {}", idx + 1, e);
                    continue;
                }
            };
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            match self.parse_record(&record, indexes) {
                Ok(txn) => rows.push(txn),
                Err(e) => warn!("Row {}: {}", idx + 1, e),
            }
        }

        if rows.is_empty() {
            FileLoad::Skipped(SkipReason::Empty)
        } else {
            FileLoad::Loaded(rows)
        }
    }

    /// Find the configured columns by name, ignoring case and surrounding space
    fn locate_columns(&self, headers: &StringRecord) -> Result<ColumnIndexes, Vec<String>> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
        };

        let date = find(&self.columns.date);
        let description = find(&self.columns.description);
        let amount = find(&self.columns.amount);

        match (date, description, amount) {
            (Some(date), Some(description), Some(amount)) => Ok(ColumnIndexes {
                date,
                description,
                amount,
            }),
            _ => {
                let mut missing = Vec::new();
                if date.is_none() {
                    missing.push(self.columns.date.clone());
                }
                if description.is_none() {
                    missing.push(self.columns.description.clone());
                }
                if amount.is_none() {
                    missing.push(self.columns.amount.clone());
                }
                Err(missing)
            }
        }
    }

    /// Parse one record; an unparseable date is kept, an unparseable amount is not
    fn parse_record(
        &self,
        record: &StringRecord,
        indexes: ColumnIndexes,
    ) -> Result<Transaction, String> {
        let date_str = record.get(indexes.date).unwrap_or("").trim();
        let description = record.get(indexes.description).unwrap_or("").trim();
        let amount_str = record.get(indexes.amount).unwrap_or("").trim();

        let amount = Money::parse(amount_str)
            .map_err(|e| format!("Could not parse amount '{}': {}", amount_str, e))?;

        Ok(match parse_date(date_str, self.date_format) {
            Some(date) => {
                let mut txn = Transaction::new(date, amount, description);
                txn.raw_date = date_str.to_string();
                txn
            }
            None => {
                debug!("Unparseable date '{}' kept out of monthly sums", date_str);
                Transaction::with_unparsed_date(date_str, amount, description)
            }
        })
    }
}

/// Parse a date string trying the preferred format first
///
/// A trailing time component ("2021-01-05 00:00:00", "2021-01-05T08:30") is ignored.
pub fn parse_date(s: &str, primary_format: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = s.split(['T', ' ']).next().unwrap_or(s);

    for candidate in [s, date_part] {
        if let Ok(date) = NaiveDate::parse_from_str(candidate, primary_format) {
            return Some(date);
        }
        for format in FALLBACK_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(candidate, format) {
                return Some(date);
            }
        }
    }

    None
}

fn describe(reason: &SkipReason) -> String {
    match reason {
        SkipReason::MissingColumns(missing) => {
            format!("missing required column(s): {}", missing.join(", "))
        }
        SkipReason::Empty => "no transaction rows".to_string(),
        SkipReason::Unreadable(e) => format!("unreadable: {}", e),
    }
}
