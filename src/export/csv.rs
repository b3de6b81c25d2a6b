//! CSV output for categorized streams and monthly series
//!
//! Every write follows the same contract: the rows are encoded in memory and
//! written with a single call, a header is written only when the target is new or
//! empty, and an existing file whose first line is some other header is refused
//! rather than appended to.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{OrganizeError, OrganizeResult};
use crate::models::{FinanceType, MonthlyBucket, TransactionStream};

/// How an output file is opened
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Append to the file, creating it (with a header) if needed
    #[default]
    Append,
    /// Replace any existing content
    Overwrite,
}

/// What a write call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Nothing to write; the file was not touched
    Skipped,
    Written { rows: usize, header_written: bool },
}

/// Header of a categorized stream file
pub fn stream_header(finance_type: FinanceType) -> Vec<&'static str> {
    vec![
        "Date",
        finance_type.amount_label(),
        "Description",
        "Category",
        finance_type.counterparty_label(),
        "Note",
    ]
}

/// Header of a monthly series file
const SERIES_HEADER: [&str; 3] = ["Month", "Sum", "MidSum"];

/// Write a categorized stream to `path`
pub fn write_stream_csv(
    stream: &TransactionStream,
    path: &Path,
    mode: WriteMode,
) -> OrganizeResult<WriteOutcome> {
    let rows: Vec<Vec<String>> = stream
        .transactions()
        .iter()
        .map(|txn| {
            vec![
                txn.date_display(),
                txn.amount.to_decimal_string(),
                txn.description.clone(),
                txn.category.clone().unwrap_or_default(),
                txn.counterparty.clone().unwrap_or_default(),
                txn.note.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let outcome = write_records(path, &stream_header(stream.finance_type()), &rows, mode)?;
    if outcome == WriteOutcome::Skipped {
        info!(
            "No {} transactions to write; leaving {} untouched",
            stream.finance_type(),
            path.display()
        );
    }
    Ok(outcome)
}

/// Verify a stream file can be written before any output is produced
pub fn check_stream_target(
    finance_type: FinanceType,
    path: &Path,
    mode: WriteMode,
) -> OrganizeResult<()> {
    check_header(path, &stream_header(finance_type), mode).map(|_| ())
}

/// Write monthly buckets to `path`
pub fn write_series_csv(
    buckets: &[MonthlyBucket],
    path: &Path,
    mode: WriteMode,
) -> OrganizeResult<WriteOutcome> {
    let rows: Vec<Vec<String>> = buckets
        .iter()
        .map(|b| {
            vec![
                b.year_month.to_string(),
                b.sum.to_decimal_string(),
                b.mid_sum.to_decimal_string(),
            ]
        })
        .collect();

    write_records(path, &SERIES_HEADER, &rows, mode)
}

/// Encode and write rows according to the write contract
pub fn write_records(
    path: &Path,
    header: &[&str],
    rows: &[Vec<String>],
    mode: WriteMode,
) -> OrganizeResult<WriteOutcome> {
    if rows.is_empty() {
        return Ok(WriteOutcome::Skipped);
    }

    let write_header = check_header(path, header, mode)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    if write_header {
        writer.write_record(header)?;
    }
    for row in rows {
        writer.write_record(row)?;
    }
    let payload = writer
        .into_inner()
        .map_err(|e| OrganizeError::Export(format!("Failed to encode CSV: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            OrganizeError::Export(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Append => options.append(true),
        WriteMode::Overwrite => options.write(true).truncate(true),
    };
    let mut file = options
        .open(path)
        .map_err(|e| OrganizeError::Export(format!("Failed to open {}: {}", path.display(), e)))?;
    file.write_all(&payload)
        .map_err(|e| OrganizeError::Export(format!("Failed to write {}: {}", path.display(), e)))?;
    file.flush()?;

    debug!(
        path = %path.display(),
        rows = rows.len(),
        header = write_header,
        "wrote CSV"
    );

    Ok(WriteOutcome::Written {
        rows: rows.len(),
        header_written: write_header,
    })
}

/// Whether a write to `path` needs a header; fails on a foreign header in append mode
fn check_header(path: &Path, header: &[&str], mode: WriteMode) -> OrganizeResult<bool> {
    let header_line = header.join(",");
    match mode {
        WriteMode::Overwrite => Ok(true),
        WriteMode::Append => match read_first_line(path)? {
            None => Ok(true),
            Some(found) if found == header_line => Ok(false),
            Some(found) => Err(OrganizeError::HeaderMismatch {
                path: path.to_path_buf(),
                expected: header_line,
                found,
            }),
        },
    }
}

/// First line of an existing, non-empty file
fn read_first_line(path: &Path) -> OrganizeResult<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| OrganizeError::Export(format!("Failed to open {}: {}", path.display(), e)))?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line)?;

    let line = line.trim_end_matches(['\r', '\n']).to_string();
    Ok(if line.is_empty() { None } else { Some(line) })
}
