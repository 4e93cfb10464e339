use crate::config::ColumnNames;
use crate::observations::error::ObservationError;
use crate::observations::frame::ObservationFrame;
use crate::types::timestamp::parse_timestamp;
use log::{debug, info};
use polars::prelude::*;

/// Removes every row that has a missing value in any column.
///
/// Columns the pipeline does not use still count: a row is kept only when it
/// is complete. Row order is preserved.
pub fn drop_incomplete_rows(df: &DataFrame) -> Result<DataFrame, ObservationError> {
    let mut mask = BooleanChunked::full(PlSmallStr::from_static("complete"), true, df.height());
    for column in df.get_columns() {
        if column.null_count() > 0 {
            mask = &mask & &column.is_not_null();
        }
    }
    Ok(df.filter(&mask)?)
}

/// Parses a text column into a millisecond `Datetime` series of the same name.
///
/// Fails on the first value no known layout matches, reporting its row.
fn parse_timestamp_column(df: &DataFrame, name: &str) -> Result<Series, ObservationError> {
    let column = df
        .column(name)
        .map_err(|_| ObservationError::MissingColumn(name.to_string()))?;

    if matches!(column.dtype(), DataType::Datetime(_, _)) {
        return Ok(column
            .as_materialized_series()
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?);
    }

    let strings = column
        .str()
        .map_err(|e| ObservationError::InvalidColumnType {
            column: name.to_string(),
            source: e,
        })?;

    let mut parsed = Vec::with_capacity(strings.len());
    for (row, value) in strings.into_iter().enumerate() {
        let value = value.unwrap_or_default();
        let timestamp = parse_timestamp(value).ok_or_else(|| ObservationError::TimestampParse {
            row,
            value: value.to_string(),
        })?;
        parsed.push(timestamp);
    }

    Ok(Series::new(PlSmallStr::from(name), parsed)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?)
}

/// Casts a numeric column to `Float64`, rejecting non-numeric content.
fn float_column(df: &DataFrame, name: &str) -> Result<Column, ObservationError> {
    df.column(name)
        .map_err(|_| ObservationError::MissingColumn(name.to_string()))?
        .strict_cast(&DataType::Float64)
        .map_err(|e| ObservationError::InvalidColumnType {
            column: name.to_string(),
            source: e,
        })
}

/// Turns a freshly loaded table into an [`ObservationFrame`].
///
/// Drops incomplete rows, parses the timestamp column into a typed datetime
/// and casts direction and speed to floats. No rows are added. Running it on
/// an already cleaned frame yields the same table.
///
/// # Errors
///
/// * [`ObservationError::MissingColumn`] if a configured column is absent.
/// * [`ObservationError::TimestampParse`] if a timestamp cannot be parsed.
/// * [`ObservationError::InvalidColumnType`] if direction or speed hold non-numeric data.
pub fn clean_observations(
    raw: &DataFrame,
    columns: &ColumnNames,
) -> Result<ObservationFrame, ObservationError> {
    for name in columns.required() {
        if raw.column(name).is_err() {
            return Err(ObservationError::MissingColumn(name.to_string()));
        }
    }

    let mut df = drop_incomplete_rows(raw)?;
    debug!(
        "Dropped {} incomplete rows out of {}",
        raw.height() - df.height(),
        raw.height()
    );

    let timestamps = parse_timestamp_column(&df, &columns.timestamp)?;
    let directions = float_column(&df, &columns.direction)?;
    let speeds = float_column(&df, &columns.speed)?;
    df.with_column(timestamps)?;
    df.with_column(directions)?;
    df.with_column(speeds)?;

    info!(
        "Cleaned observation table: kept {} of {} rows",
        df.height(),
        raw.height()
    );
    Ok(ObservationFrame::new(df, columns.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame() -> PolarsResult<DataFrame> {
        df!(
            "Timestamps" => [Some("2024-01-01 00:00:00"), Some("2024-01-01 00:10:00"), None, Some("2024-01-01 00:30:00")],
            "degrees_Wind_Direction" => [Some(10i64), Some(190), Some(90), Some(45)],
            "m/s_Wind_Speed" => [Some(1.0f64), None, Some(5.0), Some(2.5)],
            "note" => [Some("a"), Some("b"), Some("c"), None]
        )
    }

    #[test]
    fn incomplete_rows_in_any_column_are_dropped() -> Result<(), Box<dyn std::error::Error>> {
        let raw = raw_frame()?;
        let cleaned = drop_incomplete_rows(&raw)?;
        assert_eq!(cleaned.height(), 1);
        for column in cleaned.get_columns() {
            assert_eq!(column.null_count(), 0);
        }
        Ok(())
    }

    #[test]
    fn cleaning_types_the_columns() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!(
            "Timestamps" => ["2024-01-01 00:00:00", "2024-02-01 06:00"],
            "degrees_Wind_Direction" => [10i64, 90],
            "m/s_Wind_Speed" => [1.0f64, 5.0]
        )?;
        let frame = clean_observations(&raw, &ColumnNames::default())?;
        let df = frame.frame();
        assert!(matches!(
            df.column("Timestamps")?.dtype(),
            DataType::Datetime(TimeUnit::Milliseconds, None)
        ));
        assert_eq!(df.column("degrees_Wind_Direction")?.dtype(), &DataType::Float64);

        let observations = frame.observations()?;
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].direction, 90.0);
        assert_eq!(observations[1].timestamp.to_string(), "2024-02-01 06:00:00");
        Ok(())
    }

    #[test]
    fn cleaning_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
        let columns = ColumnNames::default();
        let once = clean_observations(&raw_frame()?, &columns)?;
        let twice = clean_observations(once.frame(), &columns)?;
        assert!(once.frame().equals(twice.frame()));
        assert!(once.height() <= raw_frame()?.height());
        Ok(())
    }

    #[test]
    fn malformed_timestamps_are_reported_not_coerced() -> Result<(), Box<dyn std::error::Error>> {
        let raw = df!(
            "Timestamps" => ["2024-01-01 00:00:00", "sometime in May"],
            "degrees_Wind_Direction" => [10.0f64, 20.0],
            "m/s_Wind_Speed" => [1.0f64, 2.0]
        )?;
        match clean_observations(&raw, &ColumnNames::default()) {
            Err(ObservationError::TimestampParse { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "sometime in May");
            }
            other => panic!("expected a timestamp parse error, got {:?}", other.map(|f| f.height())),
        }
        Ok(())
    }

    #[test]
    fn missing_and_mistyped_columns_are_errors() -> Result<(), Box<dyn std::error::Error>> {
        let no_speed = df!(
            "Timestamps" => ["2024-01-01 00:00:00"],
            "degrees_Wind_Direction" => [10.0f64]
        )?;
        assert!(matches!(
            clean_observations(&no_speed, &ColumnNames::default()),
            Err(ObservationError::MissingColumn(name)) if name == "m/s_Wind_Speed"
        ));

        let text_speed = df!(
            "Timestamps" => ["2024-01-01 00:00:00"],
            "degrees_Wind_Direction" => [10.0f64],
            "m/s_Wind_Speed" => ["breezy"]
        )?;
        assert!(matches!(
            clean_observations(&text_speed, &ColumnNames::default()),
            Err(ObservationError::InvalidColumnType { .. })
        ));
        Ok(())
    }
}
