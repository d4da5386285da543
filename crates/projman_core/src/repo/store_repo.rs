//! Store repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Load the whole `Store` from one JSON document.
//! - Save the whole `Store` back after every mutation.
//!
//! # Invariants
//! - Loading never fails: missing files yield an empty store, unreadable or
//!   malformed files yield an empty store plus a `LoadWarning`.
//! - Saving replaces the target via rename, so readers never observe a
//!   half-written document.

use crate::model::store::Store;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure while saving the store.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: std::io::Error },
    Serialization(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Serialization(err) => write!(f, "failed to serialize store: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Non-fatal problem encountered while loading; the store started empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The file exists but could not be read.
    Unreadable { path: PathBuf, message: String },
    /// The file was read but is not a valid store document.
    Malformed { path: PathBuf, message: String },
}

impl Display for LoadWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable { path, message } => write!(
                f,
                "could not read `{}` ({message}); starting with an empty store",
                path.display()
            ),
            Self::Malformed { path, message } => write!(
                f,
                "malformed JSON in `{}` ({message}); starting with an empty store",
                path.display()
            ),
        }
    }
}

/// Result of a load: the store plus any degradation warning.
#[derive(Debug, Clone, Default)]
pub struct LoadedStore {
    pub store: Store,
    pub warning: Option<LoadWarning>,
}

/// Repository interface for whole-store persistence.
pub trait StoreRepository {
    fn load(&self) -> LoadedStore;
    fn save(&self, store: &Store) -> RepoResult<()>;
}

/// Repository backed by a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StoreRepository for JsonFileRepository {
    fn load(&self) -> LoadedStore {
        let started_at = Instant::now();

        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=store_load module=repo status=ok source=missing_file users=0 projects=0 tasks=0");
                return LoadedStore::default();
            }
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=degraded error_code=read_failed duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return LoadedStore {
                    store: Store::default(),
                    warning: Some(LoadWarning::Unreadable {
                        path: self.path.clone(),
                        message: err.to_string(),
                    }),
                };
            }
        };

        match serde_json::from_str::<Store>(&raw) {
            Ok(store) => {
                info!(
                    "event=store_load module=repo status=ok source=file duration_ms={} users={} projects={} tasks={}",
                    started_at.elapsed().as_millis(),
                    store.users().len(),
                    store.projects().len(),
                    store.tasks().len()
                );
                LoadedStore {
                    store,
                    warning: None,
                }
            }
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=degraded error_code=malformed_json duration_ms={} line={} column={}",
                    started_at.elapsed().as_millis(),
                    err.line(),
                    err.column()
                );
                LoadedStore {
                    store: Store::default(),
                    warning: Some(LoadWarning::Malformed {
                        path: self.path.clone(),
                        message: err.to_string(),
                    }),
                }
            }
        }
    }

    fn save(&self, store: &Store) -> RepoResult<()> {
        let started_at = Instant::now();

        let mut json = serde_json::to_string_pretty(store)?;
        json.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }

        let temp_path = self.temp_path();
        let result = std::fs::write(&temp_path, json)
            .and_then(|()| std::fs::rename(&temp_path, &self.path));

        match result {
            Ok(()) => {
                info!(
                    "event=store_save module=repo status=ok duration_ms={} users={} projects={} tasks={}",
                    started_at.elapsed().as_millis(),
                    store.users().len(),
                    store.projects().len(),
                    store.tasks().len()
                );
                Ok(())
            }
            Err(err) => {
                let _ = std::fs::remove_file(&temp_path);
                error!(
                    "event=store_save module=repo status=error duration_ms={} error_code=write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(self.io_error(err))
            }
        }
    }
}
