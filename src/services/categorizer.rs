//! Interactive categorization
//!
//! Each row walks through a small state machine: category key, counterparty,
//! optional note. Invalid input leaves the session in its current state and the
//! next prompt asks again, without limit. Rendering is delegated to a
//! [`CategorizeUi`] and input to a [`Prompt`], so the session itself does no I/O.

use std::fmt;

use tracing::{debug, info};

use crate::console::{CategorizeUi, Prompt, RowReady};
use crate::error::OrganizeResult;
use crate::models::{CategoryTable, CategoryTables, FinanceType, Transaction, TransactionStream};

use super::splitter::SplitStreams;

/// Value stored in every field when interactive input is skipped
pub const SKIP_PLACEHOLDER: &str = "skipped";

const CATEGORY_PROMPT: &str = "Enter a category: ";
const CATEGORY_RETRY_PROMPT: &str = "Invalid category. Please choose one of the numbers listed: ";
const COUNTERPARTY_RETRY_PROMPT: &str = "Please enter a value, any value: ";
const NOTE_PROMPT: &str = "(Optional) Note: ";

/// Where a row is in the categorization protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    AwaitingCategory,
    AwaitingCounterparty,
    AwaitingNote,
    Done,
}

/// Why an input was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    /// Not a key of the category table
    UnknownCategory(String),
    /// Counterparty was empty after trimming
    BlankCounterparty,
    /// The row already has every field
    AlreadyDone,
}

impl fmt::Display for InputRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(input) => write!(f, "'{}' is not a listed category", input),
            Self::BlankCounterparty => write!(f, "counterparty is blank"),
            Self::AlreadyDone => write!(f, "row is already categorized"),
        }
    }
}

/// Categorization state for a single row
#[derive(Debug, Clone)]
pub struct RowSession<'a> {
    table: &'a CategoryTable,
    state: RowState,
    last_rejected: bool,
    category: Option<String>,
    counterparty: Option<String>,
    note: Option<String>,
}

impl<'a> RowSession<'a> {
    pub fn new(table: &'a CategoryTable) -> Self {
        Self {
            table,
            state: RowState::AwaitingCategory,
            last_rejected: false,
            category: None,
            counterparty: None,
            note: None,
        }
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == RowState::Done
    }

    /// Text to show for the next input
    pub fn prompt(&self) -> String {
        match (self.state, self.last_rejected) {
            (RowState::AwaitingCategory, false) => CATEGORY_PROMPT.to_string(),
            (RowState::AwaitingCategory, true) => CATEGORY_RETRY_PROMPT.to_string(),
            (RowState::AwaitingCounterparty, false) => {
                format!("{}: ", self.table.finance_type().counterparty_label())
            }
            (RowState::AwaitingCounterparty, true) => COUNTERPARTY_RETRY_PROMPT.to_string(),
            (RowState::AwaitingNote, _) => NOTE_PROMPT.to_string(),
            (RowState::Done, _) => String::new(),
        }
    }

    /// Feed one response; advances the state only when the input is valid
    pub fn submit(&mut self, input: &str) -> Result<RowState, InputRejection> {
        let result = match self.state {
            RowState::AwaitingCategory => match self.table.resolve(input) {
                Some(label) => {
                    self.category = Some(label.to_string());
                    Ok(RowState::AwaitingCounterparty)
                }
                None => Err(InputRejection::UnknownCategory(input.trim().to_string())),
            },
            RowState::AwaitingCounterparty => {
                let value = input.trim();
                if value.is_empty() {
                    Err(InputRejection::BlankCounterparty)
                } else {
                    self.counterparty = Some(value.to_string());
                    Ok(RowState::AwaitingNote)
                }
            }
            RowState::AwaitingNote => {
                self.note = Some(input.to_string());
                Ok(RowState::Done)
            }
            RowState::Done => Err(InputRejection::AlreadyDone),
        };

        match result {
            Ok(next) => {
                self.state = next;
                self.last_rejected = false;
                Ok(next)
            }
            Err(rejection) => {
                self.last_rejected = true;
                Err(rejection)
            }
        }
    }

    /// Copy the collected fields onto the transaction
    pub fn apply(self, txn: &mut Transaction) {
        txn.category = self.category;
        txn.counterparty = self.counterparty;
        txn.note = self.note;
    }
}

/// Drives categorization over whole streams
pub struct Categorizer<'a> {
    tables: &'a CategoryTables,
    skip_input: bool,
}

impl<'a> Categorizer<'a> {
    pub fn new(tables: &'a CategoryTables, skip_input: bool) -> Self {
        Self { tables, skip_input }
    }

    /// Fill category, counterparty and note on every row of the stream.
    ///
    /// Returns the number of rows categorized.
    pub fn categorize(
        &self,
        stream: &mut TransactionStream,
        prompt: &mut dyn Prompt,
        ui: &mut dyn CategorizeUi,
    ) -> OrganizeResult<usize> {
        let finance_type = stream.finance_type();
        if stream.is_empty() {
            info!("No {} transactions to categorize", finance_type);
            return Ok(0);
        }

        if self.skip_input {
            for txn in stream.transactions_mut() {
                fill_placeholder(txn);
            }
            info!(
                count = stream.len(),
                "Skipped interactive input for {} transactions", finance_type
            );
            return Ok(stream.len());
        }

        let table = self.tables.get(finance_type);
        let total = stream.len();
        for (index, txn) in stream.transactions_mut().iter_mut().enumerate() {
            ui.row_ready(&RowReady {
                position: index + 1,
                total,
                finance_type,
                transaction: txn,
                table,
            })?;

            let mut session = RowSession::new(table);
            while !session.is_done() {
                let response = prompt.ask(&session.prompt())?;
                if let Err(rejection) = session.submit(&response) {
                    debug!("Rejected input: {}", rejection);
                }
            }
            session.apply(txn);

            ui.row_finished(txn)?;
        }

        Ok(total)
    }

    /// Categorize the stream named by `finance_type` ("income" or "expense")
    pub fn categorize_named(
        &self,
        finance_type: &str,
        streams: &mut SplitStreams,
        prompt: &mut dyn Prompt,
        ui: &mut dyn CategorizeUi,
    ) -> OrganizeResult<usize> {
        let finance_type: FinanceType = finance_type.parse()?;
        self.categorize(streams.get_mut(finance_type), prompt, ui)
    }
}

fn fill_placeholder(txn: &mut Transaction) {
    txn.category = Some(SKIP_PLACEHOLDER.to_string());
    txn.counterparty = Some(SKIP_PLACEHOLDER.to_string());
    txn.note = Some(SKIP_PLACEHOLDER.to_string());
}
