//! Row log trait and types
//!
//! Defines the interface for row log storage backends (file-based today,
//! anything line-addressable tomorrow).

use crate::error::Result;
use crate::record::Record;
use crate::types::RowId;

/// Row log storage backend
///
/// An append-only log of records addressed by 1-based row ordinal.
/// Implementations must serialize writers against each other and against
/// readers, while allowing readers to scan concurrently:
/// - `append` / `append_batch` run under an exclusive acquisition
/// - `read_row` / `read_all` / `row_count` run under a shared acquisition
///
/// Writers acquire the exclusive side in an unspecified order, so callers
/// must not assume insertion order across concurrent appends. A reader sees
/// whatever had been appended at the moment it acquired the shared side.
pub trait RowLog: Send + Sync {
    /// Append a single record as one new row at the end of the log.
    fn append(&self, record: &Record) -> Result<()>;

    /// Append several records under a single exclusive acquisition.
    ///
    /// No reader observes a prefix of the batch. Appending an empty batch
    /// is a no-op.
    fn append_batch(&self, records: &[Record]) -> Result<()>;

    /// Read the record at 1-based ordinal `row`.
    ///
    /// Returns `None` when the log has fewer than `row` rows (including
    /// `row == 0`). A missing row is an expected outcome of racing with
    /// writers, never an error.
    fn read_row(&self, row: RowId) -> Result<Option<Record>>;

    /// Read every decodable row, in file order.
    fn read_all(&self) -> Result<Vec<Record>>;

    /// Number of rows currently in the log.
    fn row_count(&self) -> Result<u64>;

    /// Sync all writes to disk.
    fn sync(&self) -> Result<()>;

    /// Flush and close the underlying handle.
    ///
    /// All subsequent operations fail with `Closed`. Closing an already
    /// closed log is a no-op. Callers must join every task still using the
    /// log before closing; the log does not track outstanding callers.
    fn close(&self) -> Result<()>;

    /// Get statistics about the row log
    fn stats(&self) -> Result<RowLogStats>;
}

/// Statistics about the row log
#[derive(Debug, Clone)]
pub struct RowLogStats {
    /// Total number of rows in storage
    pub row_count: u64,

    /// Total bytes used by the log file
    pub total_bytes: u64,
}
