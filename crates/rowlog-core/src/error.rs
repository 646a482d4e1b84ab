use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowlogError {
    #[error("failed to open log file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    #[error("record decode error: {0}")]
    Decode(String),

    #[error("record field '{field}' contains a separator or line terminator")]
    InvalidField { field: &'static str },

    #[error("store is closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RowlogError>;
