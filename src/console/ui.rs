//! Presentation port for categorization
//!
//! The categorizer emits a [`RowReady`] event before it asks about a row and a
//! completion callback afterwards. Screen clearing and printing live here.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::display::transaction::{format_category_table, format_row_header, format_transaction_row};
use crate::error::OrganizeResult;
use crate::models::{CategoryTable, FinanceType, Transaction};

/// A row is about to be categorized
#[derive(Debug, Clone, Copy)]
pub struct RowReady<'a> {
    /// 1-based position within the stream
    pub position: usize,
    pub total: usize,
    pub finance_type: FinanceType,
    pub transaction: &'a Transaction,
    pub table: &'a CategoryTable,
}

/// Receives categorization progress events
pub trait CategorizeUi {
    fn row_ready(&mut self, row: &RowReady<'_>) -> OrganizeResult<()>;

    fn row_finished(&mut self, _transaction: &Transaction) -> OrganizeResult<()> {
        Ok(())
    }
}

/// Prints each row and its category menu, clearing the screen between rows
pub struct TerminalUi<W: Write> {
    out: W,
    clear_between_rows: bool,
}

impl TerminalUi<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), true)
    }
}

impl<W: Write> TerminalUi<W> {
    pub fn new(out: W, clear_between_rows: bool) -> Self {
        Self {
            out,
            clear_between_rows,
        }
    }
}

impl<W: Write> CategorizeUi for TerminalUi<W> {
    fn row_ready(&mut self, row: &RowReady<'_>) -> OrganizeResult<()> {
        writeln!(
            self.out,
            "[{} {}/{}]",
            row.finance_type, row.position, row.total
        )?;
        writeln!(self.out, "{}", format_row_header(row.finance_type))?;
        writeln!(self.out, "{}", format_transaction_row(row.transaction))?;
        writeln!(self.out)?;
        write!(self.out, "{}", format_category_table(row.table))?;
        self.out.flush()?;
        Ok(())
    }

    fn row_finished(&mut self, _transaction: &Transaction) -> OrganizeResult<()> {
        if self.clear_between_rows {
            execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}

/// Ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentUi;

impl CategorizeUi for SilentUi {
    fn row_ready(&mut self, _row: &RowReady<'_>) -> OrganizeResult<()> {
        Ok(())
    }
}
