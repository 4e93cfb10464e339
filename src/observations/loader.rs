use crate::observations::error::ObservationError;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Reads a comma-delimited table with a header row into a `DataFrame`.
///
/// All columns are kept, including ones the pipeline never uses. Cells equal
/// to one of `null_values` (and empty cells) become nulls. Column types are
/// inferred from the whole file, so a fractional value late in an otherwise
/// integral column still parses.
///
/// # Errors
///
/// Returns [`ObservationError::FileAccess`] if the file cannot be opened and
/// [`ObservationError::CsvRead`] if its content is not a valid delimited table.
pub fn load_observations(
    path: &Path,
    null_values: &[String],
) -> Result<DataFrame, ObservationError> {
    let file = File::open(path).map_err(|e| ObservationError::FileAccess(path.to_path_buf(), e))?;

    let null_values = (!null_values.is_empty()).then(|| {
        NullValues::AllColumns(
            null_values
                .iter()
                .map(|value| PlSmallStr::from(value.as_str()))
                .collect(),
        )
    });

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_null_values(null_values))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| ObservationError::CsvRead(path.to_path_buf(), e))?;

    info!(
        "Loaded {} rows with {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}
