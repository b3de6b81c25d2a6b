use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use organize_cli::cli::{
    handle_categories_command, handle_report_command, handle_run_command, CategoriesArgs,
    ReportArgs, RunArgs,
};
use organize_cli::OrganizeError;

#[derive(Parser)]
#[command(
    name = "organize",
    version,
    about = "Organize bank exports into categorized income and expense files",
    long_about = "Reads transaction exports from one or more accounts, drops rows \
                  matching exception patterns, splits income from expenses, asks for \
                  a category, counterparty and note on each row, and writes the results \
                  alongside monthly and mid-month sums."
)]
struct Cli {
    /// Verbose diagnostics (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, filter, split, categorize and write transactions
    Run(RunArgs),

    /// Show monthly sums from categorized files
    Report(ReportArgs),

    /// List the category tables
    #[command(alias = "cats")]
    Categories(CategoriesArgs),
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => handle_run_command(args)?,
        Commands::Report(args) => handle_report_command(args)?,
        Commands::Categories(args) => handle_categories_command(args)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            let code = err
                .downcast_ref::<OrganizeError>()
                .map(OrganizeError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
