use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservationError {
    #[error("Failed to open observation table '{0}'")]
    FileAccess(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse observation table '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{0}' not found in observation table")]
    MissingColumn(String),

    #[error("Column '{column}' does not hold the expected type")]
    InvalidColumnType {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Unparseable timestamp '{value}' in row {row}")]
    TimestampParse { row: usize, value: String },

    #[error("Failed processing observation frame")]
    Frame(#[from] PolarsError),
}
