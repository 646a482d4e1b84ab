//! Rowlog Core: types and traits for the rowlog storage layer
//!
//! This crate defines the core abstractions for a concurrent, file-backed
//! row log:
//! - Record: an immutable, tab-separated unit of log data
//! - RowLog: the storage trait (append under an exclusive lock, ordinal
//!   reads under a shared lock)
//! - Error taxonomy shared by all backends

pub mod error;
pub mod record;
pub mod row_log;
pub mod types;

pub use error::{Result, RowlogError};
pub use record::{Record, FIELD_SEPARATOR};
pub use row_log::{RowLog, RowLogStats};
pub use types::RowId;
