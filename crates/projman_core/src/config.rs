//! Runtime configuration for the tracker.
//!
//! Values come from CLI flags or environment variables (resolved by the
//! binary) and fall back to the defaults below.

use std::path::{Path, PathBuf};

/// Default JSON document name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Resolved tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// JSON document holding users, projects and tasks.
    pub data_file: PathBuf,
    /// File log level; `None` disables file logging.
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: None,
            log_dir: default_log_dir(),
        }
    }
}

impl TrackerConfig {
    /// Builds a config from optional overrides, filling gaps with defaults.
    ///
    /// Blank values count as unset. A relative `log_dir` is anchored at `cwd`
    /// because the logger only accepts absolute directories.
    pub fn resolve(
        data_file: Option<PathBuf>,
        log_level: Option<String>,
        log_dir: Option<PathBuf>,
        cwd: &Path,
    ) -> Self {
        let defaults = Self::default();

        let data_file = data_file
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or(defaults.data_file);
        let log_level = log_level
            .map(|level| level.trim().to_string())
            .filter(|level| !level.is_empty());
        let log_dir = match log_dir.filter(|path| !path.as_os_str().is_empty()) {
            Some(dir) if dir.is_relative() => cwd.join(dir),
            Some(dir) => dir,
            None => defaults.log_dir,
        };

        Self {
            data_file,
            log_level,
            log_dir,
        }
    }

    pub fn logging_enabled(&self) -> bool {
        self.log_level.is_some()
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_log_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(std::env::temp_dir);
    base.join("projman").join("logs")
}
