use crate::config::ConfigError;
use crate::types::timestamp::{parse_timestamp, TIMESTAMP_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// A closed interval `[start, end]` of timestamps.
///
/// Bounds given as plain dates resolve to midnight, so an end bound of
/// `2024-04-28` keeps readings at exactly `2024-04-28 00:00:00` but drops
/// anything later that day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    #[serde(with = "window_bound")]
    pub start: NaiveDateTime,
    #[serde(with = "window_bound")]
    pub end: NaiveDateTime,
}

impl DateWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ConfigError> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    /// Builds a window from two date or datetime strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ConfigError> {
        let start = parse_timestamp(start)
            .ok_or_else(|| ConfigError::InvalidTimestamp(start.to_string()))?;
        let end =
            parse_timestamp(end).ok_or_else(|| ConfigError::InvalidTimestamp(end.to_string()))?;
        Self::new(start, end)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start > self.end {
            return Err(ConfigError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        let midnight = |y, m, d| {
            NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .unwrap_or_default()
        };
        Self {
            start: midnight(2023, 5, 19),
            end: midnight(2024, 4, 28),
        }
    }
}

impl Display for DateWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]",
            self.start.format(TIMESTAMP_FORMAT),
            self.end.format(TIMESTAMP_FORMAT)
        )
    }
}

mod window_bound {
    use crate::types::timestamp::{parse_timestamp, TIMESTAMP_FORMAT};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date or datetime '{}'", raw)))
    }
}
