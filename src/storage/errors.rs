use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported file format: {0}. Use CSV or Excel.")]
    UnsupportedFormat(String),
    #[error("No datetime column found in the input file (available columns: {available:?})")]
    NoTimestampColumn { available: Vec<String> },
    #[error("Failed to parse datetime column `{column}`: {reason}")]
    DatetimeParse { column: String, reason: String },
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("Invalid null pattern: {0}")]
    NullPattern(#[from] regex::Error),
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),
    #[cfg(feature = "excel")]
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
