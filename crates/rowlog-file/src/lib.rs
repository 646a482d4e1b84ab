//! File-based row log implementation
//!
//! Provides an append-only log of tab-separated records over a single
//! shared file. All access goes through one reader-writer lock:
//! - Appends hold the exclusive side for the full seek + write sequence
//! - Ordinal reads hold the shared side for the full scan, so any number
//!   of readers run concurrently but never overlap a writer
//!
//! Reads are linear scans from the start of the file. There is no index
//! and no caching, so a reader always sees exactly what had been appended
//! when it acquired the shared side.

mod store;

pub use store::{FileRowLog, FileRowLogConfig};
