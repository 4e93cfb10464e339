use chrono::NaiveDateTime;

/// A single wind reading taken from the observation table.
///
/// Only rows with all three fields present ever become an `Observation`;
/// incomplete source rows are dropped by the cleaner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Time of the reading, timezone-naive.
    pub timestamp: NaiveDateTime,
    /// Direction the wind blows from, in degrees (0 = North, clockwise).
    pub direction: f64,
    /// Wind speed in meters per second.
    pub speed: f64,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, direction: f64, speed: f64) -> Self {
        Self {
            timestamp,
            direction,
            speed,
        }
    }
}
