//! Run settings
//!
//! Describes where transactions come from (one entry per account export), how
//! their columns are named, which exception patterns apply, and where the
//! categorized results go. Settings are read from a JSON file or assembled from
//! command-line flags, and validated before the pipeline starts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OrganizeError, OrganizeResult};
use crate::export::WriteMode;
use crate::models::{CategoryTable, CategoryTables, FinanceType};

/// Source column names mapped to the three semantic roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub date: String,
    pub description: String,
    pub amount: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            description: "Description".to_string(),
            amount: "Amount".to_string(),
        }
    }
}

/// One account's exports and how to read them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSource {
    pub name: String,

    /// Export files, read in order
    pub files: Vec<PathBuf>,

    #[serde(default)]
    pub columns: ColumnNames,

    /// Negate every amount (card issuers often report purchases as positive)
    #[serde(default)]
    pub reverse_sign: bool,

    /// Newline-delimited exception patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceptions: Option<PathBuf>,
}

impl AccountSource {
    pub fn new(name: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            files,
            columns: ColumnNames::default(),
            reverse_sign: false,
            exceptions: None,
        }
    }
}

/// Optional replacements for the built-in category tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<BTreeMap<u32, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<BTreeMap<u32, String>>,
}

/// Settings for one organize run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Export sources, loaded in the order listed
    #[serde(default)]
    pub accounts: Vec<AccountSource>,

    /// Preferred date format (strftime); common alternatives are tried after it
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_income_file")]
    pub income_file: PathBuf,

    #[serde(default = "default_expenses_file")]
    pub expenses_file: PathBuf,

    #[serde(default)]
    pub write_mode: WriteMode,

    /// Fill every row with a placeholder instead of prompting
    #[serde(default)]
    pub skip_input: bool,

    /// Number of months in the trailing report window
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// JSON-lines log of rows removed by exception patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<PathBuf>,

    #[serde(default)]
    pub categories: CategorySettings,
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_income_file() -> PathBuf {
    PathBuf::from("income.csv")
}

fn default_expenses_file() -> PathBuf {
    PathBuf::from("expenses.csv")
}

fn default_window_size() -> usize {
    15
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            date_format: default_date_format(),
            income_file: default_income_file(),
            expenses_file: default_expenses_file(),
            write_mode: WriteMode::default(),
            skip_input: false,
            window_size: default_window_size(),
            audit_log: None,
            categories: CategorySettings::default(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> OrganizeResult<Self> {
        let settings = Self::read(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse a settings file without validating it
    pub fn read(path: &Path) -> OrganizeResult<Self> {
        if !path.exists() {
            return Err(OrganizeError::FileNotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| OrganizeError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| OrganizeError::Config(format!("Failed to parse settings file: {}", e)))?;

        Ok(settings)
    }

    /// Check the settings are usable for a run
    pub fn validate(&self) -> OrganizeResult<()> {
        if self.accounts.is_empty() {
            return Err(OrganizeError::Config("No accounts configured".into()));
        }
        for (idx, account) in self.accounts.iter().enumerate() {
            if account.files.is_empty() {
                return Err(OrganizeError::Config(format!(
                    "Account '{}' lists no files",
                    account.name
                )));
            }
            if self.accounts[..idx].iter().any(|a| a.name == account.name) {
                return Err(OrganizeError::Config(format!(
                    "Account '{}' is listed twice",
                    account.name
                )));
            }
        }
        if self.window_size == 0 {
            return Err(OrganizeError::Config("window_size must be at least 1".into()));
        }
        self.category_tables()?;
        Ok(())
    }

    /// Category tables for this run, built-in defaults where not overridden
    pub fn category_tables(&self) -> OrganizeResult<CategoryTables> {
        let income = table_or_default(FinanceType::Income, self.categories.income.as_ref())?;
        let expense = table_or_default(FinanceType::Expense, self.categories.expense.as_ref())?;
        CategoryTables::new(income, expense).map_err(|e| OrganizeError::Config(e.to_string()))
    }
}

fn table_or_default(
    finance_type: FinanceType,
    entries: Option<&BTreeMap<u32, String>>,
) -> OrganizeResult<CategoryTable> {
    match entries {
        Some(entries) => CategoryTable::new(finance_type, entries.clone())
            .map_err(|e| OrganizeError::Config(e.to_string())),
        None => Ok(CategoryTable::default_for(finance_type)),
    }
}
