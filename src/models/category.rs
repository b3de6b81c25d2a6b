//! Category tables
//!
//! A category table is the closed set of labels a transaction of one finance type
//! may be assigned, keyed by the small integer the user types at the prompt.
//! Tables are validated when they are built and never change afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::finance::FinanceType;

/// Closed mapping from numeric key to category label for one finance type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    finance_type: FinanceType,
    entries: BTreeMap<u32, String>,
}

impl CategoryTable {
    /// Build a table, rejecting empty tables and blank or duplicate labels
    pub fn new(
        finance_type: FinanceType,
        entries: BTreeMap<u32, String>,
    ) -> Result<Self, CategoryValidationError> {
        if entries.is_empty() {
            return Err(CategoryValidationError::EmptyTable(finance_type));
        }

        let mut seen = BTreeSet::new();
        let mut cleaned = BTreeMap::new();
        for (key, label) in entries {
            let label = label.trim().to_string();
            if label.is_empty() {
                return Err(CategoryValidationError::EmptyLabel(key));
            }
            if label.len() > 50 {
                return Err(CategoryValidationError::LabelTooLong(key, label.len()));
            }
            if !seen.insert(label.clone()) {
                return Err(CategoryValidationError::DuplicateLabel(label));
            }
            cleaned.insert(key, label);
        }

        Ok(Self {
            finance_type,
            entries: cleaned,
        })
    }

    /// Built-in table used when the configuration does not supply one
    pub fn default_for(finance_type: FinanceType) -> Self {
        let labels: &[&str] = match finance_type {
            FinanceType::Expense => &[
                "Housing",
                "Utilities",
                "Groceries",
                "Dining",
                "Transportation",
                "Health",
                "Insurance",
                "Entertainment",
                "Shopping",
                "Subscriptions",
                "Gifts",
                "Other",
            ],
            FinanceType::Income => &["Salary", "Bonus", "Interest", "Refund", "Gift", "Other"],
        };

        Self {
            finance_type,
            entries: labels
                .iter()
                .enumerate()
                .map(|(key, label)| (key as u32, label.to_string()))
                .collect(),
        }
    }

    pub fn finance_type(&self) -> FinanceType {
        self.finance_type
    }

    /// Look up a label by key
    pub fn label(&self, key: u32) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Validate raw prompt input and resolve it to a label
    ///
    /// Only a non-negative integer literal naming a key present in the table is
    /// accepted. Surrounding whitespace is ignored; signs, decimals and anything
    /// else are rejected.
    pub fn resolve(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        input.parse::<u32>().ok().and_then(|key| self.label(key))
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for CategoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .entries
            .iter()
            .map(|(key, label)| format!("{}: {}", key, label))
            .collect();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}

/// The pair of tables injected into categorization, one per finance type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTables {
    income: CategoryTable,
    expense: CategoryTable,
}

impl CategoryTables {
    /// Pair two tables, checking each was built for the slot it fills
    pub fn new(
        income: CategoryTable,
        expense: CategoryTable,
    ) -> Result<Self, CategoryValidationError> {
        if income.finance_type() != FinanceType::Income {
            return Err(CategoryValidationError::WrongFinanceType(FinanceType::Income));
        }
        if expense.finance_type() != FinanceType::Expense {
            return Err(CategoryValidationError::WrongFinanceType(FinanceType::Expense));
        }
        Ok(Self { income, expense })
    }

    pub fn get(&self, finance_type: FinanceType) -> &CategoryTable {
        match finance_type {
            FinanceType::Income => &self.income,
            FinanceType::Expense => &self.expense,
        }
    }
}

impl Default for CategoryTables {
    fn default() -> Self {
        Self {
            income: CategoryTable::default_for(FinanceType::Income),
            expense: CategoryTable::default_for(FinanceType::Expense),
        }
    }
}

/// Validation errors for category tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyTable(FinanceType),
    EmptyLabel(u32),
    LabelTooLong(u32, usize),
    DuplicateLabel(String),
    WrongFinanceType(FinanceType),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTable(kind) => write!(f, "The {} category table is empty", kind),
            Self::EmptyLabel(key) => write!(f, "Category {} has an empty label", key),
            Self::LabelTooLong(key, len) => {
                write!(f, "Category {} label too long ({} chars, max 50)", key, len)
            }
            Self::DuplicateLabel(label) => write!(f, "Category label '{}' is used twice", label),
            Self::WrongFinanceType(kind) => write!(f, "Expected a {} category table", kind),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_key_table() -> CategoryTable {
        let entries = (0..5u32)
            .map(|k| (k, format!("Label {}", k)))
            .collect::<BTreeMap<_, _>>();
        CategoryTable::new(FinanceType::Expense, entries).unwrap()
    }

    #[test]
    fn test_resolve_accepts_known_keys() {
        let table = five_key_table();
        assert_eq!(table.resolve("2"), Some("Label 2"));
        assert_eq!(table.resolve("0"), Some("Label 0"));
        assert_eq!(table.resolve(" 4 "), Some("Label 4"));
    }

    #[test]
    fn test_resolve_rejects_invalid_input() {
        let table = five_key_table();
        assert_eq!(table.resolve("abc"), None);
        assert_eq!(table.resolve("-1"), None);
        assert_eq!(table.resolve("5"), None);
        assert_eq!(table.resolve(""), None);
        assert_eq!(table.resolve("+2"), None);
        assert_eq!(table.resolve("2.0"), None);
        assert_eq!(table.resolve("99999999999999999999"), None);
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = CategoryTable::new(FinanceType::Income, BTreeMap::new()).unwrap_err();
        assert_eq!(err, CategoryValidationError::EmptyTable(FinanceType::Income));
    }

    #[test]
    fn test_rejects_blank_and_duplicate_labels() {
        let mut entries = BTreeMap::new();
        entries.insert(0, "  ".to_string());
        assert_eq!(
            CategoryTable::new(FinanceType::Expense, entries).unwrap_err(),
            CategoryValidationError::EmptyLabel(0)
        );

        let mut entries = BTreeMap::new();
        entries.insert(0, "Food".to_string());
        entries.insert(1, "Food ".to_string());
        assert_eq!(
            CategoryTable::new(FinanceType::Expense, entries).unwrap_err(),
            CategoryValidationError::DuplicateLabel("Food".into())
        );
    }

    #[test]
    fn test_default_tables() {
        let expense = CategoryTable::default_for(FinanceType::Expense);
        assert_eq!(expense.label(0), Some("Housing"));
        assert_eq!(expense.finance_type(), FinanceType::Expense);

        let income = CategoryTable::default_for(FinanceType::Income);
        assert_eq!(income.label(0), Some("Salary"));
        assert!(!income.is_empty());
    }

    #[test]
    fn test_tables_reject_swapped_slots() {
        let income = CategoryTable::default_for(FinanceType::Income);
        let expense = CategoryTable::default_for(FinanceType::Expense);
        assert!(CategoryTables::new(income.clone(), expense.clone()).is_ok());
        assert_eq!(
            CategoryTables::new(expense, income).unwrap_err(),
            CategoryValidationError::WrongFinanceType(FinanceType::Income)
        );
    }

    #[test]
    fn test_display() {
        let mut entries = BTreeMap::new();
        entries.insert(0, "Salary".to_string());
        entries.insert(1, "Gift".to_string());
        let table = CategoryTable::new(FinanceType::Income, entries).unwrap();
        assert_eq!(table.to_string(), "{0: Salary, 1: Gift}");
    }
}
