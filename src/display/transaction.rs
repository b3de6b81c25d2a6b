//! Transaction display formatting
//!
//! Row and register views shown while categorizing, plus the category menu.

use crate::models::{CategoryTable, FinanceType, Transaction};

use super::truncate;

/// Column header matching [`format_transaction_row`]
pub fn format_row_header(finance_type: FinanceType) -> String {
    format!(
        "{:10} {:>12} {}",
        "Date",
        finance_type.amount_label(),
        "Description"
    )
}

/// Format a single transaction for display
pub fn format_transaction_row(txn: &Transaction) -> String {
    format!(
        "{:10} {:>12} {}",
        truncate(&txn.date_display(), 10),
        txn.amount.to_decimal_string(),
        txn.description
    )
}

/// Format a list of categorized transactions as a register
pub fn format_transaction_register(finance_type: FinanceType, transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:>12} {:20} {:16} {}\n",
        "Date",
        finance_type.amount_label(),
        "Category",
        finance_type.counterparty_label(),
        "Note"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format!(
            "{:10} {:>12} {:20} {:16} {}\n",
            truncate(&txn.date_display(), 10),
            txn.amount.to_decimal_string(),
            truncate(txn.category.as_deref().unwrap_or("(uncategorized)"), 20),
            truncate(txn.counterparty.as_deref().unwrap_or(""), 16),
            txn.note.as_deref().unwrap_or("")
        ));
    }

    output
}

/// Menu of category keys and labels
pub fn format_category_table(table: &CategoryTable) -> String {
    let mut output = format!("{} categories:\n", table.finance_type().amount_label());
    for (key, label) in table.iter() {
        output.push_str(&format!("  {:>2}: {}\n", key, label));
    }
    output
}
