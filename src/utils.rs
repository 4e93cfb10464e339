use crate::error::WindroseError;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "windrose_rs";
const CONFIG_FILE_NAME: &str = "config.json";

/// `<platform config dir>/windrose_rs/config.json`, whether or not it exists.
pub fn default_config_path() -> Result<PathBuf, WindroseError> {
    dirs::config_dir()
        .ok_or(WindroseError::ConfigDirResolution)
        .map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Charts are only ever written into an existing directory.
pub fn ensure_output_dir_exists(path: &Path) -> Result<(), WindroseError> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(WindroseError::OutputDirMissing(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_ends_with_crate_file() -> Result<(), Box<dyn std::error::Error>> {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("windrose_rs/config.json"));
        }
        Ok(())
    }

    #[test]
    fn output_dir_must_exist() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        ensure_output_dir_exists(dir.path())?;

        let missing = dir.path().join("plots");
        assert!(matches!(
            ensure_output_dir_exists(&missing),
            Err(WindroseError::OutputDirMissing(p)) if p == missing
        ));

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x")?;
        assert!(matches!(
            ensure_output_dir_exists(&file),
            Err(WindroseError::OutputDirMissing(_))
        ));
        assert!(!missing.exists());
        Ok(())
    }
}
