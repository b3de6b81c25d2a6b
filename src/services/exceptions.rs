//! Exception filtering
//!
//! Operators list description fragments (one per line) for rows that should
//! never reach categorization: transfers between their own accounts, card
//! payments, and similar noise. A row is dropped when its description contains
//! any pattern; matching is a literal, case-sensitive substring test.

use std::path::Path;

use tracing::{debug, info};

use crate::audit::{AuditLogger, ExclusionEntry};
use crate::error::{OrganizeError, OrganizeResult};
use crate::models::Transaction;

/// Ordered, de-duplicated set of substring patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionSet {
    patterns: Vec<String>,
}

/// A row removed by the filter and the first pattern that matched it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub pattern: String,
    pub transaction: Transaction,
}

/// Rows kept and rows removed by one filter pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub kept: Vec<Transaction>,
    pub removed: Vec<Exclusion>,
}

impl ExceptionSet {
    /// Build a set from patterns; blank entries are ignored, others are trimmed
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if !pattern.is_empty() && !set.iter().any(|p: &String| p == pattern) {
                set.push(pattern.to_string());
            }
        }
        Self { patterns: set }
    }

    /// Parse newline-delimited patterns
    pub fn parse(contents: &str) -> Self {
        Self::new(contents.lines())
    }

    /// Read a pattern file
    pub fn from_file(path: &Path) -> OrganizeResult<Self> {
        if !path.exists() {
            return Err(OrganizeError::FileNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OrganizeError::Io(format!(
                "Failed to read exceptions file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::parse(&contents))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// First pattern (in file order) contained in `description`
    pub fn matching_pattern(&self, description: &str) -> Option<&str> {
        self.patterns
            .iter()
            .map(String::as_str)
            .find(|p| description.contains(p))
    }

    pub fn matches(&self, description: &str) -> bool {
        self.matching_pattern(description).is_some()
    }

    /// Split rows into kept and removed, preserving the order of kept rows
    pub fn filter(&self, transactions: Vec<Transaction>) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();
        for txn in transactions {
            match self.matching_pattern(&txn.description) {
                Some(pattern) => outcome.removed.push(Exclusion {
                    pattern: pattern.to_string(),
                    transaction: txn,
                }),
                None => outcome.kept.push(txn),
            }
        }
        outcome
    }

    /// Log removed rows grouped by pattern, in pattern order
    fn log_removed(&self, removed: &[Exclusion]) {
        info!("Exceptions: {:?}", self.patterns);
        for pattern in &self.patterns {
            let rows: Vec<&Exclusion> = removed.iter().filter(|e| &e.pattern == pattern).collect();
            if rows.is_empty() {
                continue;
            }
            info!("Pattern '{}' removed {} row(s)", pattern, rows.len());
            for exclusion in rows {
                info!("  {}", exclusion.transaction);
            }
        }
    }
}

/// Apply the exceptions file at `path`, if any, recording removals in `audit`
pub fn apply_exceptions(
    path: Option<&Path>,
    transactions: Vec<Transaction>,
    audit: Option<&AuditLogger>,
) -> OrganizeResult<Vec<Transaction>> {
    let Some(path) = path else {
        return Ok(transactions);
    };

    let exceptions = ExceptionSet::from_file(path)?;
    let outcome = exceptions.filter(transactions);
    exceptions.log_removed(&outcome.removed);

    if let Some(logger) = audit {
        let entries: Vec<ExclusionEntry> = outcome
            .removed
            .iter()
            .map(|e| ExclusionEntry::new(e.pattern.clone(), &e.transaction))
            .collect();
        logger.log_batch(&entries)?;
        for entry in &entries {
            debug!("audit: {}", entry.format_human_readable());
        }
    }

    Ok(outcome.kept)
}
