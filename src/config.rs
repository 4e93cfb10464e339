//! Explicit configuration for a windrose run.
//!
//! Every setting the pipeline needs lives in [`WindroseConfig`]. It can be
//! built in code with the generated builder or read from a JSON file; unset
//! fields fall back to the defaults of the Glanerbeek field campaign.

mod error;

pub use error::ConfigError;

use crate::render::RenderOptions;
use crate::types::date_window::DateWindow;
use crate::types::month::MonthOfYear;
use crate::types::season::SeasonMap;
use crate::types::speed_bins::SpeedBins;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_SECTORS: usize = 16;
pub const DEFAULT_MONTH_TITLE: &str = "Windrose for {label}, Field 1 (Glanerbeek)";
pub const DEFAULT_SEASON_TITLE: &str = "Windrose Field 1 for {label}";

/// Names of the columns read from the input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub timestamp: String,
    pub direction: String,
    pub speed: String,
}

impl ColumnNames {
    pub fn required(&self) -> [&str; 3] {
        [
            self.timestamp.as_str(),
            self.direction.as_str(),
            self.speed.as_str(),
        ]
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            timestamp: "Timestamps".to_string(),
            direction: "degrees_Wind_Direction".to_string(),
            speed: "m/s_Wind_Speed".to_string(),
        }
    }
}

/// What to do with a bucket that has no observations.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyBucketPolicy {
    /// Abort the run with [`crate::RenderError::EmptyBucket`].
    #[default]
    Error,
    /// Render a chart with axes, legend and caption but no bars.
    Blank,
}

impl Display for EmptyBucketPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EmptyBucketPolicy::Error => write!(f, "error"),
            EmptyBucketPolicy::Blank => write!(f, "blank"),
        }
    }
}

fn default_months() -> Vec<MonthOfYear> {
    MonthOfYear::all().collect()
}

fn default_sectors() -> usize {
    DEFAULT_SECTORS
}

pub fn default_null_values() -> Vec<String> {
    ["NA", "NaN", "nan", "null", "NULL"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_month_title() -> String {
    DEFAULT_MONTH_TITLE.to_string()
}

fn default_season_title() -> String {
    DEFAULT_SEASON_TITLE.to_string()
}

/// Full configuration of a windrose run.
///
/// # Examples
///
/// ```
/// use windrose_rs::{EmptyBucketPolicy, WindroseConfig};
///
/// let config = WindroseConfig::builder()
///     .input_path("data/Field1.csv")
///     .output_dir("plots/field1")
///     .empty_bucket(EmptyBucketPolicy::Blank)
///     .build();
///
/// assert_eq!(config.months.len(), 12);
/// assert_eq!(config.sectors, 16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct WindroseConfig {
    /// Delimited input table with a header row.
    #[serde(default)]
    #[builder(into)]
    pub input_path: PathBuf,

    /// Existing directory receiving `<label>.png` files.
    #[serde(default)]
    #[builder(into)]
    pub output_dir: PathBuf,

    #[serde(default)]
    #[builder(default)]
    pub date_window: DateWindow,

    /// Months to chart individually; rendered in ascending order.
    #[serde(default = "default_months")]
    #[builder(default = default_months())]
    pub months: Vec<MonthOfYear>,

    #[serde(default)]
    #[builder(default)]
    pub seasons: SeasonMap,

    #[serde(default)]
    #[builder(default)]
    pub bin_edges: SpeedBins,

    /// Number of direction sectors around the compass.
    #[serde(default = "default_sectors")]
    #[builder(default = DEFAULT_SECTORS)]
    pub sectors: usize,

    #[serde(default)]
    #[builder(default)]
    pub columns: ColumnNames,

    /// Cell values the loader treats as missing.
    #[serde(default = "default_null_values")]
    #[builder(default = default_null_values())]
    pub null_values: Vec<String>,

    #[serde(default)]
    #[builder(default)]
    pub empty_bucket: EmptyBucketPolicy,

    /// Title template for month charts; `{label}` becomes the month abbreviation.
    #[serde(default = "default_month_title")]
    #[builder(into, default = default_month_title())]
    pub month_title: String,

    /// Title template for season charts; `{label}` becomes the season code.
    #[serde(default = "default_season_title")]
    #[builder(into, default = default_season_title())]
    pub season_title: String,

    #[serde(default)]
    #[builder(default)]
    pub render: RenderOptions,
}

impl WindroseConfig {
    /// Reads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Months to render, deduplicated and in ascending order.
    pub fn months_to_render(&self) -> Vec<MonthOfYear> {
        let mut months = self.months.clone();
        months.sort();
        months.dedup();
        months
    }

    /// Checks every setting without touching the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("input_path"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("output_dir"));
        }
        self.date_window.validate()?;
        self.seasons.validate()?;
        if self.sectors < DEFAULT_SECTORS {
            return Err(ConfigError::TooFewSectors(self.sectors));
        }
        self.render.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builder_defaults_match_reference_run() {
        let config = WindroseConfig::builder()
            .input_path("in.csv")
            .output_dir("out")
            .build();
        assert_eq!(config.bin_edges.edges(), &[0.0, 2.0, 4.0, 6.0]);
        assert_eq!(config.columns.speed, "m/s_Wind_Speed");
        assert_eq!(config.empty_bucket, EmptyBucketPolicy::Error);
        assert_eq!(config.seasons.seasons().len(), 4);
        assert_eq!(config.render.dpi, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn months_to_render_are_sorted_and_unique() {
        let months = [3, 1, 3, 2]
            .into_iter()
            .filter_map(MonthOfYear::new)
            .collect::<Vec<_>>();
        let config = WindroseConfig::builder()
            .input_path("in.csv")
            .output_dir("out")
            .months(months)
            .build();
        let rendered: Vec<u32> = config.months_to_render().into_iter().map(u32::from).collect();
        assert_eq!(rendered, vec![1, 2, 3]);
    }

    #[test]
    fn validation_reports_the_offending_setting() {
        let missing_input = WindroseConfig::builder().input_path("").output_dir("out").build();
        assert!(matches!(
            missing_input.validate(),
            Err(ConfigError::MissingField("input_path"))
        ));

        let coarse = WindroseConfig::builder()
            .input_path("in.csv")
            .output_dir("out")
            .sectors(8)
            .build();
        assert!(matches!(coarse.validate(), Err(ConfigError::TooFewSectors(8))));
    }

    #[test]
    fn json_file_overrides_only_given_fields() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{
                "input_path": "/data/Field1.csv",
                "output_dir": "/plots",
                "months": [1, 2],
                "bin_edges": [0, 3, 6],
                "empty_bucket": "blank",
                "date_window": {{"start": "2023-06-01", "end": "2023-08-31 23:59:59"}}
            }}"#
        )?;

        let config = WindroseConfig::from_json_file(file.path())?;
        assert_eq!(config.input_path, PathBuf::from("/data/Field1.csv"));
        assert_eq!(config.months.len(), 2);
        assert_eq!(config.bin_edges.len(), 3);
        assert_eq!(config.empty_bucket, EmptyBucketPolicy::Blank);
        assert_eq!(config.sectors, DEFAULT_SECTORS);
        assert_eq!(config.month_title, DEFAULT_MONTH_TITLE);
        assert!(config.validate().is_ok());
        Ok(())
    }

    #[test]
    fn invalid_json_values_surface_as_parse_errors() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{"input_path": "a.csv", "months": [0]}}"#)?;
        assert!(matches!(
            WindroseConfig::from_json_file(file.path()),
            Err(ConfigError::Parse(_, _))
        ));

        let missing = file.path().with_extension("does-not-exist");
        assert!(matches!(
            WindroseConfig::from_json_file(&missing),
            Err(ConfigError::Read(_, _))
        ));
        Ok(())
    }

    #[test]
    fn config_round_trips_through_json() -> Result<(), Box<dyn std::error::Error>> {
        let config = WindroseConfig::builder()
            .input_path("in.csv")
            .output_dir("out")
            .build();
        let json = config.to_json()?;
        let parsed: WindroseConfig = serde_json::from_str(&json)?;
        assert_eq!(parsed, config);
        Ok(())
    }
}
