//! In-memory entity store.
//!
//! # Responsibility
//! - Hold users, projects and tasks in insertion order.
//! - Keep cross-entity links consistent on every mutation.
//!
//! # Invariants
//! - A task with `project_id = P` is listed in `P.task_ids`.
//! - `P.user_ids` equals the distinct assignees of P's tasks, in task order.
//! - Removing an entity never leaves dangling references behind.
//!
//! The store does not validate field contents or enforce the `done`
//! precondition for task removal; `TrackerService` does that before mutating.

use super::project::{Project, ProjectId};
use super::task::{Task, TaskId, TaskStatus};
use super::user::{User, UserId};
use serde::{Deserialize, Serialize};

/// Whole-document state persisted as one JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.projects.is_empty() && self.tasks.is_empty()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id() == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Appends a user and returns its ID.
    pub fn add_user(&mut self, user: User) -> UserId {
        let id = user.id();
        self.users.push(user);
        id
    }

    /// Removes a user, unassigning its tasks and dropping it from projects.
    ///
    /// Returns `None` when no user has `id`.
    pub fn remove_user(&mut self, id: UserId) -> Option<User> {
        let index = self.users.iter().position(|user| user.id() == id)?;
        let removed = self.users.remove(index);

        for task in self.tasks.iter_mut() {
            if task.assigned_to == Some(id) {
                task.assigned_to = None;
            }
        }
        // Loaded documents may list the user without a matching task.
        for project in self.projects.iter_mut() {
            project.user_ids.retain(|user_id| *user_id != id);
        }

        Some(removed)
    }

    /// Appends a project and returns its ID.
    pub fn add_project(&mut self, project: Project) -> ProjectId {
        let id = project.id();
        self.projects.push(project);
        id
    }

    /// Removes a project and detaches its tasks.
    pub fn remove_project(&mut self, id: ProjectId) -> Option<Project> {
        let index = self
            .projects
            .iter()
            .position(|project| project.id() == id)?;
        let removed = self.projects.remove(index);

        for task in self.tasks.iter_mut() {
            if task.project_id == Some(id) {
                task.project_id = None;
            }
        }

        Some(removed)
    }

    /// Appends a task and links it into its project, if any.
    ///
    /// A `project_id` naming no stored project is kept on the task but
    /// produces no link.
    pub fn add_task(&mut self, task: Task) -> TaskId {
        let id = task.id();
        let project_id = task.project_id;
        self.tasks.push(task);

        if let Some(project_id) = project_id {
            if let Some(project) = self.project_mut(project_id) {
                project.link_task(id);
            }
            self.refresh_project_users(project_id);
        }
        id
    }

    /// Removes a task and unlinks it from its project.
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        let removed = self.tasks.remove(index);

        if let Some(project_id) = removed.project_id {
            if let Some(project) = self.project_mut(project_id) {
                project.unlink_task(id);
            }
            self.refresh_project_users(project_id);
        }

        Some(removed)
    }

    /// Sets a task's status. Returns the updated task.
    pub fn set_task_status(&mut self, id: TaskId, status: TaskStatus) -> Option<&Task> {
        let task = self.task_mut(id)?;
        task.status = status;
        Some(&*task)
    }

    /// Assigns a task to a user and refreshes its project's user links.
    pub fn assign_task(&mut self, task_id: TaskId, user_id: UserId) -> Option<&Task> {
        let task = self.task_mut(task_id)?;
        task.assigned_to = Some(user_id);
        let project_id = task.project_id;

        if let Some(project_id) = project_id {
            self.refresh_project_users(project_id);
        }
        self.task(task_id)
    }

    /// Tasks assigned to `user_id`, in insertion order.
    pub fn tasks_for_user(&self, user_id: UserId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.assigned_to == Some(user_id))
            .collect()
    }

    /// Projects that list `user_id` among their users.
    pub fn projects_for_user(&self, user_id: UserId) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|project| project.user_ids.contains(&user_id))
            .collect()
    }

    /// Tasks filed under `project_id`, in insertion order.
    pub fn tasks_for_project(&self, project_id: ProjectId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id == Some(project_id))
            .collect()
    }

    fn project_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|project| project.id() == id)
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    fn refresh_project_users(&mut self, project_id: ProjectId) {
        let mut assignees: Vec<UserId> = Vec::new();
        for task in &self.tasks {
            if task.project_id != Some(project_id) {
                continue;
            }
            if let Some(user_id) = task.assigned_to {
                if !assignees.contains(&user_id) {
                    assignees.push(user_id);
                }
            }
        }

        if let Some(project) = self.project_mut(project_id) {
            project.user_ids = assignees;
        }
    }
}
