use crate::config::ConfigError;
use crate::observations::error::ObservationError;
use crate::render::RenderError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindroseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Observations(#[from] ObservationError),

    #[error("Output directory '{0}' does not exist or is not a directory")]
    OutputDirMissing(PathBuf),

    #[error("Failed to write chart '{0}'")]
    OutputWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to render windrose for {bucket}")]
    Render {
        bucket: String,
        #[source]
        source: RenderError,
    },

    #[error("Failed to determine config directory")]
    ConfigDirResolution,
}
