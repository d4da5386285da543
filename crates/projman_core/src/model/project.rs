//! Project domain model.
//!
//! # Invariants
//! - `due_date` is a calendar date and serializes as `YYYY-MM-DD`.
//! - `user_ids` and `task_ids` hold each ID at most once.

use super::task::TaskId;
use super::user::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable project identifier.
pub type ProjectId = Uuid;

/// Named body of work with a due date and associated users/tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    /// Distinct assignees of this project's tasks, maintained by `Store`.
    #[serde(default)]
    pub(crate) user_ids: Vec<UserId>,
    /// Tasks filed under this project, in insertion order.
    #[serde(default)]
    pub(crate) task_ids: Vec<TaskId>,
}

impl Project {
    /// Creates a project with a generated stable ID and no associations.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, description, due_date)
    }

    /// Creates a project with a caller-provided ID.
    pub fn with_id(
        id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            due_date,
            user_ids: Vec::new(),
            task_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Adds `task_id` unless it is already associated.
    pub(crate) fn link_task(&mut self, task_id: TaskId) {
        if !self.task_ids.contains(&task_id) {
            self.task_ids.push(task_id);
        }
    }

    pub(crate) fn unlink_task(&mut self, task_id: TaskId) {
        self.task_ids.retain(|id| *id != task_id);
    }
}
