use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to serialize config")]
    Serialize(#[source] serde_json::Error),

    #[error("Required setting '{0}' is missing")]
    MissingField(&'static str),

    #[error("Month {0} is outside 1..=12")]
    InvalidMonth(u32),

    #[error("Invalid speed bin edges: {0}")]
    InvalidBinEdges(String),

    #[error("Invalid season mapping: {0}")]
    InvalidSeasons(String),

    #[error("At least 16 direction sectors are required, got {0}")]
    TooFewSectors(usize),

    #[error("Date window start {start} is after end {end}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("'{0}' is not a recognised date or datetime")]
    InvalidTimestamp(String),

    #[error("Invalid render option: {0}")]
    InvalidRenderOption(String),
}
