//! Loading a [`GridConfig`] from a JSON file.

use std::fmt;
use std::path::{Path, PathBuf};

use gridpath_core::{GridConfig, GridError};

/// Why a settings file could not be used.
#[derive(Debug)]
pub enum SettingsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid(GridError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "reading {}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "parsing {}: {source}", path.display()),
            Self::Invalid(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<GridError> for SettingsError {
    fn from(e: GridError) -> Self {
        Self::Invalid(e)
    }
}

/// Read and validate a settings file. Missing fields take their defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<GridConfig, SettingsError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_owned(),
        source,
    })?;
    let config = parse_config(path, &text)?;
    log::info!(
        "loaded {}x{} grid settings from {}",
        config.rows,
        config.cols,
        path.display()
    );
    Ok(config)
}

fn parse_config(path: &Path, text: &str) -> Result<GridConfig, SettingsError> {
    let config: GridConfig = serde_json::from_str(text).map_err(|source| SettingsError::Parse {
        path: path.to_owned(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}
