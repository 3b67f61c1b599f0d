use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::query::City;

/// Environment variable naming the directory that holds the city CSVs.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
}

impl Settings {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Uses `override_dir` when given, else `BIKESHARE_DATA_DIR`, else the
    /// current directory.
    pub fn resolve(override_dir: Option<PathBuf>) -> Self {
        Self::resolve_from(override_dir, std::env::var_os(DATA_DIR_ENV))
    }

    /// [`Settings::resolve`] with the environment value passed in.
    pub fn resolve_from(override_dir: Option<PathBuf>, env_dir: Option<OsString>) -> Self {
        let data_dir = override_dir
            .or_else(|| env_dir.filter(|d| !d.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        Self { data_dir }
    }

    /// Path of the plain CSV file for `city`.
    pub fn city_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
