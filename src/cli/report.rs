//! The `report` command
//!
//! Reads categorized income/expense files written by earlier runs and shows
//! their monthly series.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::{OrganizeError, OrganizeResult};
use crate::export::{WriteMode, WriteOutcome};
use crate::reports::{MonthlyReport, SeriesKind};

/// Arguments of `organize report`
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Categorized income file
    #[arg(short, long)]
    pub income: Option<PathBuf>,

    /// Categorized expenses file
    #[arg(short = 'x', long)]
    pub expenses: Option<PathBuf>,

    /// Number of trailing months to show
    #[arg(long)]
    pub window: Option<usize>,

    /// Show every month instead of the trailing window
    #[arg(long, conflicts_with = "window")]
    pub all: bool,

    /// Series to show: income, expense or net
    #[arg(short = 't', long = "type", default_value = "net")]
    pub kind: String,

    /// Write the shown months to a CSV file instead of printing them
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Handle `organize report`
pub fn handle_report_command(args: ReportArgs) -> OrganizeResult<()> {
    let kind: SeriesKind = args.kind.parse()?;
    let defaults = Settings::default();

    let window = if args.all {
        None
    } else {
        let n = args.window.unwrap_or(defaults.window_size);
        if n == 0 {
            return Err(OrganizeError::Validation(
                "--window must be at least 1".into(),
            ));
        }
        Some(n)
    };

    let income = args.income.unwrap_or(defaults.income_file);
    let expenses = args.expenses.unwrap_or(defaults.expenses_file);
    let report = MonthlyReport::from_files(&income, &expenses, &defaults.date_format)?;

    match args.export {
        Some(path) => {
            match report.export_csv(kind, window, &path, WriteMode::Overwrite)? {
                WriteOutcome::Written { rows, .. } => {
                    println!("Exported {} months to: {}", rows, path.display())
                }
                WriteOutcome::Skipped => println!("No monthly data to export."),
            }
        }
        None => print!("{}", report.format_terminal(kind, window)),
    }

    Ok(())
}
