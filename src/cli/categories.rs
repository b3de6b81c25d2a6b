//! The `categories` command

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::format_category_table;
use crate::error::OrganizeResult;
use crate::models::{CategoryTables, FinanceType};

/// Arguments of `organize categories`
#[derive(Args, Debug, Default)]
pub struct CategoriesArgs {
    /// Only show this table: income or expense
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    /// JSON settings file with custom category tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Handle `organize categories`
pub fn handle_categories_command(args: CategoriesArgs) -> OrganizeResult<()> {
    print!("{}", render_categories(&args)?);
    Ok(())
}

fn render_categories(args: &CategoriesArgs) -> OrganizeResult<String> {
    let tables = match &args.config {
        Some(path) => Settings::read(path)?.category_tables()?,
        None => CategoryTables::default(),
    };

    let types = match &args.kind {
        Some(kind) => vec![kind.parse::<FinanceType>()?],
        None => vec![FinanceType::Income, FinanceType::Expense],
    };

    Ok(types
        .into_iter()
        .map(|t| format_category_table(tables.get(t)))
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrganizeError;

    #[test]
    fn test_render_all() {
        let text = render_categories(&CategoriesArgs::default()).unwrap();
        assert!(text.contains("Income categories:"));
        assert!(text.contains("Expense categories:"));
    }

    #[test]
    fn test_render_one_and_invalid() {
        let args = CategoriesArgs {
            kind: Some("expense".into()),
            ..CategoriesArgs::default()
        };
        let text = render_categories(&args).unwrap();
        assert!(text.starts_with("Expense categories:"));
        assert!(!text.contains("Income"));

        let args = CategoriesArgs {
            kind: Some("loans".into()),
            ..CategoriesArgs::default()
        };
        assert!(matches!(
            render_categories(&args),
            Err(OrganizeError::InvalidFinanceType(_))
        ));
    }
}
