//! Service layer for the organize pipeline
//!
//! Each stage consumes the previous stage's output: the loader reads bank
//! exports, exceptions drop noise rows, the splitter partitions income from
//! expenses, the categorizer fills in labels, and aggregation buckets by month.

pub mod aggregation;
pub mod categorizer;
pub mod exceptions;
pub mod loader;
pub mod splitter;

pub use aggregation::{build_series, merge_series, mid_month_sum, monthly_sums, recent_window};
pub use categorizer::{Categorizer, InputRejection, RowSession, RowState, SKIP_PLACEHOLDER};
pub use exceptions::{apply_exceptions, ExceptionSet, Exclusion, FilterOutcome};
pub use loader::{parse_date, FileLoad, LoadedFiles, Loader, SkipReason};
pub use splitter::{split_streams, SplitStreams};
