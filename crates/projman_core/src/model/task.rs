//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its lifecycle status.
//! - Provide the canonical wire strings for `TaskStatus`.
//!
//! # Invariants
//! - `id` is generated once and never reassigned.
//! - `status` serializes as `todo|in-progress|done`.

use super::project::ProjectId;
use super::user::UserId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable task identifier.
pub type TaskId = Uuid;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Created but not started.
    #[default]
    Todo,
    /// Work is in progress.
    InProgress,
    /// Completed. Only done tasks may be removed.
    Done,
}

impl TaskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the wire string used in JSON and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Parses an exact wire string. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of work, optionally assigned to a user and filed under a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub(crate) assigned_to: Option<UserId>,
    #[serde(default)]
    pub(crate) project_id: Option<ProjectId>,
}

impl Task {
    /// Creates an unassigned task with a generated ID.
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self::with_id(Uuid::new_v4(), title, status)
    }

    /// Creates a task with a caller-provided ID (import paths and tests).
    pub fn with_id(id: TaskId, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id,
            title: title.into(),
            status,
            assigned_to: None,
            project_id: None,
        }
    }

    /// Presets the assignee and project. `Store::add_task` creates the
    /// matching project links.
    pub fn with_links(
        mut self,
        assigned_to: Option<UserId>,
        project_id: Option<ProjectId>,
    ) -> Self {
        self.assigned_to = assigned_to;
        self.project_id = project_id;
        self
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}
