//! The `run` command
//!
//! Loads every configured account, drops exception rows, splits income from
//! expenses, categorizes both streams, writes them out and prints a monthly
//! summary.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{info, warn};

use crate::audit::AuditLogger;
use crate::config::{AccountSource, Settings};
use crate::console::{CategorizeUi, Prompt, SilentUi, TerminalPrompt, TerminalUi};
use crate::display::format_transaction_register;
use crate::error::{OrganizeError, OrganizeResult};
use crate::export::{check_stream_target, write_stream_csv, WriteMode, WriteOutcome};
use crate::models::FinanceType;
use crate::reports::{MonthlyReport, SeriesKind};
use crate::services::{apply_exceptions, split_streams, Categorizer, Loader, SplitStreams};

/// Account name used for files given on the command line
const COMMAND_LINE_ACCOUNT: &str = "command-line";

/// Arguments of `organize run`
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Transaction export files (CSV)
    pub files: Vec<PathBuf>,

    /// JSON settings file describing accounts and outputs
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File of description patterns to drop, one per line
    #[arg(short, long)]
    pub exceptions: Option<PathBuf>,

    /// Categorized income output file
    #[arg(short, long)]
    pub income: Option<PathBuf>,

    /// Categorized expenses output file
    #[arg(short = 'x', long)]
    pub expenses: Option<PathBuf>,

    /// Append to or overwrite the output files
    #[arg(short, long, value_enum)]
    pub write_mode: Option<WriteMode>,

    /// Negate every amount in the given files
    #[arg(long)]
    pub reverse_sign: bool,

    /// Fill every row with a placeholder instead of prompting
    #[arg(long)]
    pub skip_input: bool,

    /// Name of the date column
    #[arg(long)]
    pub date_column: Option<String>,

    /// Name of the description column
    #[arg(long)]
    pub description_column: Option<String>,

    /// Name of the amount column
    #[arg(long)]
    pub amount_column: Option<String>,
}

impl RunArgs {
    /// Settings from the config file (if any) with command-line overrides applied
    pub fn resolve_settings(&self) -> OrganizeResult<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::read(path)?,
            None => Settings::default(),
        };

        if self.files.is_empty() {
            for account in &mut settings.accounts {
                self.override_account(account);
            }
        } else {
            let mut account = AccountSource::new(COMMAND_LINE_ACCOUNT, self.files.clone());
            self.override_account(&mut account);
            settings.accounts.push(account);
        }

        if let Some(path) = &self.income {
            settings.income_file = path.clone();
        }
        if let Some(path) = &self.expenses {
            settings.expenses_file = path.clone();
        }
        if let Some(mode) = self.write_mode {
            settings.write_mode = mode;
        }
        settings.skip_input |= self.skip_input;

        if settings.accounts.is_empty() {
            return Err(OrganizeError::Config(
                "No input files: pass FILES or --config".into(),
            ));
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Apply the per-account flags that were actually given
    fn override_account(&self, account: &mut AccountSource) {
        account.reverse_sign |= self.reverse_sign;
        if let Some(path) = &self.exceptions {
            account.exceptions = Some(path.clone());
        }
        if let Some(column) = &self.date_column {
            account.columns.date = column.clone();
        }
        if let Some(column) = &self.description_column {
            account.columns.description = column.clone();
        }
        if let Some(column) = &self.amount_column {
            account.columns.amount = column.clone();
        }
    }
}

/// What a run produced
#[derive(Debug)]
pub struct RunSummary {
    pub streams: SplitStreams,
    pub income_written: WriteOutcome,
    pub expense_written: WriteOutcome,
    pub report: MonthlyReport,
}

/// Handle `organize run` against the terminal
pub fn handle_run_command(args: RunArgs) -> OrganizeResult<()> {
    let settings = args.resolve_settings()?;

    let summary = if settings.skip_input {
        run_pipeline(&settings, &mut TerminalPrompt::stdio(), &mut SilentUi)?
    } else {
        run_pipeline(
            &settings,
            &mut TerminalPrompt::stdio(),
            &mut TerminalUi::stdout(),
        )?
    };

    print_summary(&settings, &summary);
    Ok(())
}

/// Run the whole pipeline with the given console ports
pub fn run_pipeline(
    settings: &Settings,
    prompt: &mut dyn Prompt,
    ui: &mut dyn CategorizeUi,
) -> OrganizeResult<RunSummary> {
    let audit = settings.audit_log.clone().map(AuditLogger::new);

    let mut transactions = Vec::new();
    let mut usable_files = 0;
    for account in &settings.accounts {
        info!("Loading account '{}'", account.name);
        let loader = Loader::new(&account.columns, &settings.date_format);
        let loaded = loader.load_files(&account.files, account.reverse_sign)?;
        if loaded.usable_files == 0 {
            warn!("Account '{}' has no usable files", account.name);
        }
        usable_files += loaded.usable_files;
        let rows = apply_exceptions(
            account.exceptions.as_deref(),
            loaded.transactions,
            audit.as_ref(),
        )?;
        transactions.extend(rows);
    }
    if usable_files == 0 {
        return Err(OrganizeError::NoUsableFiles);
    }

    let mut streams = split_streams(transactions);

    // Check every output that will be written before any prompting
    for (finance_type, path) in [
        (FinanceType::Income, &settings.income_file),
        (FinanceType::Expense, &settings.expenses_file),
    ] {
        if !streams.get(finance_type).is_empty() {
            check_stream_target(finance_type, path, settings.write_mode)?;
        }
    }

    let tables = settings.category_tables()?;
    let categorizer = Categorizer::new(&tables, settings.skip_input);
    for finance_type in [FinanceType::Income, FinanceType::Expense] {
        categorizer.categorize(streams.get_mut(finance_type), prompt, ui)?;
    }

    let income_written = write_output(
        &streams,
        FinanceType::Income,
        &settings.income_file,
        settings.write_mode,
    )?;
    let expense_written = write_output(
        &streams,
        FinanceType::Expense,
        &settings.expenses_file,
        settings.write_mode,
    )?;

    let report = MonthlyReport::generate(
        streams.income.transactions(),
        streams.expense.transactions(),
    );

    Ok(RunSummary {
        streams,
        income_written,
        expense_written,
        report,
    })
}

fn write_output(
    streams: &SplitStreams,
    finance_type: FinanceType,
    path: &Path,
    mode: WriteMode,
) -> OrganizeResult<WriteOutcome> {
    let outcome = write_stream_csv(streams.get(finance_type), path, mode)?;
    if let WriteOutcome::Written { rows, .. } = outcome {
        info!("Wrote {} {} rows to {}", rows, finance_type, path.display());
    }
    Ok(outcome)
}

fn print_summary(settings: &Settings, summary: &RunSummary) {
    if !settings.skip_input {
        for stream in [&summary.streams.income, &summary.streams.expense] {
            if !stream.is_empty() {
                println!(
                    "{}",
                    format_transaction_register(stream.finance_type(), stream.transactions())
                );
            }
        }
    }

    println!(
        "Categorized {} income and {} expense transactions.",
        summary.streams.income.len(),
        summary.streams.expense.len()
    );
    for (kind, path, outcome) in [
        (SeriesKind::Income, &settings.income_file, summary.income_written),
        (SeriesKind::Expense, &settings.expenses_file, summary.expense_written),
    ] {
        if let WriteOutcome::Written { rows, .. } = outcome {
            println!("  {} rows -> {}", rows, path.display());
        }
        println!();
        print!(
            "{}",
            summary
                .report
                .format_terminal(kind, Some(settings.window_size))
        );
    }
}
