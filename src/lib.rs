mod config;
mod error;
mod filtering;
mod histogram;
mod observations;
mod render;
mod types;
mod utils;
mod windrose;

pub use config::{
    default_null_values, ColumnNames, ConfigError, EmptyBucketPolicy, WindroseConfig,
    DEFAULT_MONTH_TITLE, DEFAULT_SEASON_TITLE, DEFAULT_SECTORS,
};
pub use error::WindroseError;
pub use filtering::WindFrameFilterExt;
pub use histogram::{sector_of, WindroseHistogram};
pub use windrose::*;

pub use observations::cleaner::{clean_observations, drop_incomplete_rows};
pub use observations::error::ObservationError;
pub use observations::frame::ObservationFrame;
pub use observations::loader::load_observations;

pub use render::{
    ChartRequest, PlottersRenderer, PolarHistogramRenderer, RenderError, RenderOptions,
    DEFAULT_CAPTION,
};

pub use types::bucket::Bucket;
pub use types::date_window::DateWindow;
pub use types::month::MonthOfYear;
pub use types::observation::Observation;
pub use types::season::{Season, SeasonMap};
pub use types::speed_bins::SpeedBins;
pub use types::timestamp::{parse_timestamp, TIMESTAMP_FORMAT};

pub use utils::{default_config_path, ensure_output_dir_exists};
