//! Audit trail for rows removed by exception patterns
//!
//! Every row the exception filter drops is appended to a line-delimited JSON
//! log so a run can be reviewed afterwards.
//!
//! - `ExclusionEntry`: one removed row together with the pattern that matched it.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use organize_cli::audit::{AuditLogger, ExclusionEntry};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log_batch(&[ExclusionEntry::new("TRANSFER", &transaction)])?;
//! ```

mod entry;
mod logger;

pub use entry::ExclusionEntry;
pub use logger::AuditLogger;
