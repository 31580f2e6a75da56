//! IO helpers for reading configuration layers from disk.
//!
//! Loading never fails: a missing file is an empty layer, an unreadable or
//! malformed one is an empty layer plus a warning event and a `Failed` status.

use super::ConfigError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::Display;
use tracing::{debug, warn};

/// Origin of a configuration layer, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigLayerSource {
    /// `appsettings.json`.
    BaseFile,
    /// `appsettings.<environment>.json`.
    EnvironmentFile,
    /// `env/.env.<environment>`; never overrides live variables.
    Dotenv,
    /// Live process environment.
    Process,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerStatus {
    Loaded,
    Missing,
    Failed { reason: String },
}

/// Metadata about one layer considered during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    pub path: Option<PathBuf>,
    pub status: LayerStatus,
}

impl ConfigLayer {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.status, LayerStatus::Failed { .. })
    }
}

/// Reads a JSON settings file strictly; the root must be an object.
///
/// # Errors
/// Returns [`ConfigError::Io`] when the file cannot be read and
/// [`ConfigError::Parse`] when it is not a JSON object.
pub fn load_json_file(path: &Path) -> Result<Value, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        source,
        context: Some(path.display().to_string().into()),
    })?;

    let value: Value = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
        message: e.to_string().into(),
        context: Some(path.display().to_string().into()),
    })?;

    if !value.is_object() {
        return Err(ConfigError::Parse {
            message: "root must be a JSON object".into(),
            context: Some(path.display().to_string().into()),
        });
    }

    Ok(value)
}

/// Reads a dotenv file strictly, preserving declaration order.
///
/// # Errors
/// Returns [`ConfigError::Dotenv`] when the file cannot be read or parsed.
pub fn load_dotenv_file(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let entries = dotenvy::from_path_iter(path)
        .map_err(|source| ConfigError::Dotenv {
            source,
            context: Some(path.display().to_string().into()),
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ConfigError::Dotenv {
            source,
            context: Some(path.display().to_string().into()),
        })?;
    Ok(entries)
}

/// Sets the file's variables on the process, leaving existing ones untouched.
pub(super) fn export_dotenv(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => debug!(path = %path.display(), "Exported dotenv variables"),
        Err(err) => warn!(path = %path.display(), error = %err, "Could not export dotenv variables"),
    }
}

pub(super) fn json_layer(source: ConfigLayerSource, path: &Path) -> (Value, ConfigLayer) {
    optional_layer(source, path, load_json_file, || Value::Object(Map::new()))
}

pub(super) fn dotenv_layer(path: &Path) -> (Vec<(String, String)>, ConfigLayer) {
    optional_layer(ConfigLayerSource::Dotenv, path, load_dotenv_file, Vec::new)
}

fn optional_layer<T>(
    source: ConfigLayerSource,
    path: &Path,
    load: impl FnOnce(&Path) -> Result<T, ConfigError>,
    empty: impl FnOnce() -> T,
) -> (T, ConfigLayer) {
    let meta = |status| ConfigLayer { source, path: Some(path.to_path_buf()), status };

    if !path.exists() {
        debug!(%source, path = %path.display(), "Optional config layer missing");
        return (empty(), meta(LayerStatus::Missing));
    }

    match load(path) {
        Ok(value) => {
            debug!(%source, path = %path.display(), "Loaded config layer");
            (value, meta(LayerStatus::Loaded))
        }
        Err(err) => {
            warn!(%source, path = %path.display(), error = %err, "Could not load config file; using an empty layer");
            (empty(), meta(LayerStatus::Failed { reason: err.to_string() }))
        }
    }
}
