//! Contains the `ObservationFrame` wrapper around the cleaned observation table.

use crate::config::ColumnNames;
use crate::filtering::WindFrameFilterExt;
use crate::observations::error::ObservationError;
use crate::types::date_window::DateWindow;
use crate::types::month::MonthOfYear;
use crate::types::observation::Observation;
use crate::types::season::Season;
use chrono::DateTime;
use polars::prelude::*;

/// A cleaned observation table: no missing values, a typed timestamp column
/// and float direction/speed columns.
///
/// Every filtering method returns a *new* frame; `self` is never modified.
/// Columns other than the three configured ones are carried along untouched.
///
/// Instances come from [`crate::clean_observations`].
#[derive(Debug, Clone)]
pub struct ObservationFrame {
    frame: DataFrame,
    columns: ColumnNames,
}

impl ObservationFrame {
    pub(crate) fn new(frame: DataFrame, columns: ColumnNames) -> Self {
        Self { frame, columns }
    }

    /// The underlying polars `DataFrame`.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    /// Number of observations.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    fn apply(&self, filter: impl FnOnce(LazyFrame) -> LazyFrame) -> Result<Self, ObservationError> {
        let frame = filter(self.frame.clone().lazy()).collect()?;
        Ok(Self::new(frame, self.columns.clone()))
    }

    /// Restricts the frame to the closed interval `window`.
    pub fn window(&self, window: &DateWindow) -> Result<Self, ObservationError> {
        self.apply(|lf| lf.filter_window(&self.columns.timestamp, window))
    }

    /// Observations from a single calendar month, in any year.
    pub fn month(&self, month: MonthOfYear) -> Result<Self, ObservationError> {
        self.months(&[month])
    }

    /// Observations whose month is in `months`.
    pub fn months(&self, months: &[MonthOfYear]) -> Result<Self, ObservationError> {
        self.apply(|lf| lf.filter_months(&self.columns.timestamp, months))
    }

    /// Observations from the months of `season`.
    pub fn season(&self, season: &Season) -> Result<Self, ObservationError> {
        self.months(&season.months)
    }

    /// Collects the rows into [`Observation`]s, preserving row order.
    pub fn observations(&self) -> Result<Vec<Observation>, ObservationError> {
        let column = |name: &str| {
            self.frame
                .column(name)
                .map_err(|_| ObservationError::MissingColumn(name.to_string()))
        };
        let invalid = |name: &str| {
            let name = name.to_string();
            move |source| ObservationError::InvalidColumnType {
                column: name,
                source,
            }
        };

        let millis = column(&self.columns.timestamp)?
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
            .cast(&DataType::Int64)?;
        let millis = millis.i64().map_err(invalid(&self.columns.timestamp))?;
        let directions = column(&self.columns.direction)?.cast(&DataType::Float64)?;
        let directions = directions.f64().map_err(invalid(&self.columns.direction))?;
        let speeds = column(&self.columns.speed)?.cast(&DataType::Float64)?;
        let speeds = speeds.f64().map_err(invalid(&self.columns.speed))?;

        let observations = millis
            .into_iter()
            .zip(directions.into_iter())
            .zip(speeds.into_iter())
            .filter_map(|((ms, direction), speed)| {
                let timestamp = DateTime::from_timestamp_millis(ms?)?.naive_utc();
                Some(Observation::new(timestamp, direction?, speed?))
            })
            .collect();
        Ok(observations)
    }
}
