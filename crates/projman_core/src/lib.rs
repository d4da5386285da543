//! Core domain logic for projman.
//! This crate is the single source of truth for tracker invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::TrackerConfig;
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::project::{Project, ProjectId};
pub use model::store::Store;
pub use model::task::{Task, TaskId, TaskStatus};
pub use model::user::{User, UserId};
pub use repo::store_repo::{
    JsonFileRepository, LoadWarning, LoadedStore, RepoError, RepoResult, StoreRepository,
};
pub use service::tracker_service::{
    EntityKind, NewTaskRequest, ProjectOverview, ServiceError, ServiceResult, TrackerService,
    UserOverview,
};
pub use validation::{
    validate_complete_task, validate_date, validate_email, validate_non_blank, validate_status,
    ValidationError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
