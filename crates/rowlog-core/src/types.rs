/// Row ordinal - 1-based position of a line in the log file
pub type RowId = u64;
