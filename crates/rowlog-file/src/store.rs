use parking_lot::RwLock;
use rowlog_core::{
    error::{Result, RowlogError},
    record::Record,
    row_log::{RowLog, RowLogStats},
    types::RowId,
};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Configuration for the file-based row log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRowLogConfig {
    /// Path of the log file
    pub path: PathBuf,

    /// Whether to truncate an existing file on open (default: true).
    ///
    /// Set to `false` to reopen an existing log and keep appending to it.
    #[serde(default = "default_true")]
    pub truncate: bool,

    /// Buffer size for read-side scans (bytes)
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
}

impl Default for FileRowLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/rows.log"),
            truncate: true,
            read_buffer_size: default_read_buffer_size(),
        }
    }
}

impl FileRowLogConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_read_buffer_size() -> usize {
    64 * 1024
}

/// Write-side state guarded by the store's lock.
///
/// `None` means the store is closed.
struct LogState {
    file: Option<File>,
}

/// File-based row log implementation
///
/// One lock guards both the writer handle and the open/closed state.
/// Writers take it exclusively for the whole seek + write sequence, so no
/// reader ever observes a partially written line. Readers take it shared
/// and scan through their own read-only handle on the path, so concurrent
/// readers never contend over a file cursor.
pub struct FileRowLog {
    config: FileRowLogConfig,
    state: RwLock<LogState>,
}

impl FileRowLog {
    /// Open (and by default truncate) the log file at the configured path.
    ///
    /// Failure here is fatal for the store: callers must not hand a store
    /// that failed to open to concurrent tasks.
    pub fn open(config: FileRowLogConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| RowlogError::Open {
                    path: config.path.clone(),
                    source,
                })?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(config.truncate)
            .open(&config.path)
            .map_err(|source| RowlogError::Open {
                path: config.path.clone(),
                source,
            })?;

        tracing::debug!(path = %config.path.display(), "opened row log");

        Ok(Self {
            config,
            state: RwLock::new(LogState { file: Some(file) }),
        })
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Open an independent read-only handle on the log file.
    ///
    /// Each scan gets its own cursor, which is what lets readers run
    /// concurrently with each other. Callers must hold at least the shared
    /// side of `state` so no writer is mid-append while the scan runs.
    fn open_reader(&self) -> Result<BufReader<File>> {
        let file = File::open(&self.config.path)?;
        Ok(BufReader::with_capacity(self.config.read_buffer_size, file))
    }
}

impl RowLog for FileRowLog {
    fn append(&self, record: &Record) -> Result<()> {
        let mut line = record.encode();
        line.push('\n');

        let mut state = self.state.write();
        let file = state.file.as_mut().ok_or(RowlogError::Closed)?;

        file.seek(SeekFrom::End(0)).map_err(RowlogError::Write)?;
        file.write_all(line.as_bytes()).map_err(RowlogError::Write)?;

        Ok(())
    }

    fn append_batch(&self, records: &[Record]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        // Serialize outside the lock; one acquisition, one write syscall.
        let mut buffer = String::new();
        for record in records {
            buffer.push_str(&record.encode());
            buffer.push('\n');
        }

        let mut state = self.state.write();
        let file = state.file.as_mut().ok_or(RowlogError::Closed)?;

        file.seek(SeekFrom::End(0)).map_err(RowlogError::Write)?;
        file.write_all(buffer.as_bytes()).map_err(RowlogError::Write)?;

        Ok(())
    }

    fn read_row(&self, row: RowId) -> Result<Option<Record>> {
        let state = self.state.read();
        if state.file.is_none() {
            return Err(RowlogError::Closed);
        }

        // Rows are 1-based; row 0 can never exist.
        if row == 0 {
            return Ok(None);
        }

        let reader = self.open_reader()?;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if index as u64 + 1 == row {
                return match Record::decode(&line) {
                    Ok(record) => Ok(Some(record)),
                    Err(err) => {
                        // Treat an undecodable line as an absent row so one
                        // corrupted line cannot take down unrelated readers.
                        tracing::warn!(row, %err, "treating malformed row as absent");
                        Ok(None)
                    }
                };
            }
        }

        Ok(None)
    }

    fn read_all(&self) -> Result<Vec<Record>> {
        let state = self.state.read();
        if state.file.is_none() {
            return Err(RowlogError::Closed);
        }

        let reader = self.open_reader()?;
        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            match Record::decode(&line) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(row = index as u64 + 1, %err, "skipping malformed row");
                }
            }
        }

        Ok(records)
    }

    fn row_count(&self) -> Result<u64> {
        let state = self.state.read();
        if state.file.is_none() {
            return Err(RowlogError::Closed);
        }

        let reader = self.open_reader()?;
        let mut count = 0u64;
        for line in reader.lines() {
            line?;
            count += 1;
        }

        Ok(count)
    }

    fn sync(&self) -> Result<()> {
        let mut state = self.state.write();
        let file = state.file.as_mut().ok_or(RowlogError::Closed)?;
        file.sync_all()?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        let mut state = self.state.write();
        match state.file.take() {
            Some(file) => {
                file.sync_all()?;
                tracing::debug!(path = %self.config.path.display(), "closed row log");
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn stats(&self) -> Result<RowLogStats> {
        let state = self.state.read();
        if state.file.is_none() {
            return Err(RowlogError::Closed);
        }

        let total_bytes = std::fs::metadata(&self.config.path)?.len();

        let reader = self.open_reader()?;
        let mut row_count = 0u64;
        for line in reader.lines() {
            line?;
            row_count += 1;
        }

        Ok(RowLogStats {
            row_count,
            total_bytes,
        })
    }
}

/// Ensure the handle is flushed when the store goes away without an
/// explicit `close()`.
impl Drop for FileRowLog {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(%err, "failed to close row log on drop");
        }
    }
}
