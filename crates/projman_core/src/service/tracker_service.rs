//! Tracker use-case service.
//!
//! # Responsibility
//! - Provide the add/remove/list/update entry points used by the CLI.
//! - Validate input and referenced IDs before touching the store.
//! - Persist the whole store after every successful mutation.
//!
//! # Invariants
//! - A failed validation or lookup leaves the store and the file untouched.
//! - Tasks are removed only when their status is `done`.
//! - IDs that do not parse as UUIDs are reported as not found.

use crate::model::project::{Project, ProjectId};
use crate::model::store::Store;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::model::user::{User, UserId};
use crate::repo::store_repo::{LoadWarning, RepoError, StoreRepository};
use crate::validation::{
    validate_complete_task, validate_date, validate_email, validate_non_blank, validate_status,
    ValidationError,
};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Entity category used in not-found reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Project,
    Task,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Task => "task",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from tracker service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected by a validation rule.
    Validation(ValidationError),
    /// No entity of `kind` has `id`.
    NotFound { kind: EntityKind, id: String },
    /// Saving the store failed.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Request model for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRequest {
    pub title: String,
    /// Status wire string; `None` means `todo`.
    pub status: Option<String>,
    /// Assignee user ID as entered by the caller.
    pub assigned_to: Option<String>,
    /// Project ID as entered by the caller.
    pub project_id: Option<String>,
}

impl NewTaskRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: None,
            assigned_to: None,
            project_id: None,
        }
    }
}

/// A user with the projects and tasks linked to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOverview<'a> {
    pub user: &'a User,
    pub projects: Vec<&'a Project>,
    pub tasks: Vec<&'a Task>,
}

/// A project with its associated users and tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOverview<'a> {
    pub project: &'a Project,
    pub users: Vec<&'a User>,
    pub tasks: Vec<&'a Task>,
}

/// Use-case service over a loaded store and its repository.
pub struct TrackerService<R: StoreRepository> {
    repo: R,
    store: Store,
    load_warning: Option<LoadWarning>,
}

impl<R: StoreRepository> TrackerService<R> {
    /// Loads the store through `repo`.
    ///
    /// Load problems never fail this call; see `load_warning()`.
    pub fn open(repo: R) -> Self {
        let loaded = repo.load();
        Self {
            repo,
            store: loaded.store,
            load_warning: loaded.warning,
        }
    }

    /// Warning produced while loading, if the store started empty because of it.
    pub fn load_warning(&self) -> Option<&LoadWarning> {
        self.load_warning.as_ref()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Creates a user after validating name and email.
    pub fn add_user(&mut self, name: &str, email: &str) -> ServiceResult<User> {
        validate_non_blank("name", name)?;
        validate_email(email)?;

        let user = User::new(name, email);
        self.store.add_user(user.clone());
        self.commit()?;
        info!(
            "event=user_add module=service status=ok user_id={}",
            user.id()
        );
        Ok(user)
    }

    /// Removes a user and clears its task assignments.
    pub fn remove_user(&mut self, id: &str) -> ServiceResult<User> {
        let user_id = self.resolve_user(id)?;
        let removed = self
            .store
            .remove_user(user_id)
            .ok_or_else(|| not_found(EntityKind::User, id))?;
        self.commit()?;
        info!("event=user_remove module=service status=ok user_id={user_id}");
        Ok(removed)
    }

    pub fn users(&self) -> &[User] {
        self.store.users()
    }

    /// Creates a project after validating title and due date.
    pub fn add_project(
        &mut self,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> ServiceResult<Project> {
        validate_non_blank("title", title)?;
        let due_date = validate_date(due_date)?;

        let project = Project::new(title, description, due_date);
        self.store.add_project(project.clone());
        self.commit()?;
        info!(
            "event=project_add module=service status=ok project_id={}",
            project.id()
        );
        Ok(project)
    }

    /// Removes a project and detaches its tasks.
    pub fn remove_project(&mut self, id: &str) -> ServiceResult<Project> {
        let project_id = self.resolve_project(id)?;
        let removed = self
            .store
            .remove_project(project_id)
            .ok_or_else(|| not_found(EntityKind::Project, id))?;
        self.commit()?;
        info!("event=project_remove module=service status=ok project_id={project_id}");
        Ok(removed)
    }

    pub fn projects(&self) -> &[Project] {
        self.store.projects()
    }

    /// Creates a task; referenced user and project must already exist.
    pub fn add_task(&mut self, request: &NewTaskRequest) -> ServiceResult<Task> {
        validate_non_blank("title", &request.title)?;
        let status = match request.status.as_deref() {
            Some(value) => validate_status(value)?,
            None => TaskStatus::Todo,
        };
        let assigned_to = request
            .assigned_to
            .as_deref()
            .map(|id| self.resolve_user(id))
            .transpose()?;
        let project_id = request
            .project_id
            .as_deref()
            .map(|id| self.resolve_project(id))
            .transpose()?;

        let task = Task::new(request.title.as_str(), status).with_links(assigned_to, project_id);
        self.store.add_task(task.clone());
        self.commit()?;
        info!(
            "event=task_add module=service status=ok task_id={} task_status={}",
            task.id(),
            task.status
        );
        Ok(task)
    }

    /// Removes a task. Only `done` tasks may be removed.
    pub fn remove_task(&mut self, id: &str) -> ServiceResult<Task> {
        let task_id = self.resolve_task(id)?;
        if let Some(task) = self.store.task(task_id) {
            validate_complete_task(task)?;
        }
        let removed = self
            .store
            .remove_task(task_id)
            .ok_or_else(|| not_found(EntityKind::Task, id))?;
        self.commit()?;
        info!("event=task_remove module=service status=ok task_id={task_id}");
        Ok(removed)
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Lists tasks, optionally restricted to one status wire string.
    pub fn tasks_with_status(&self, status: Option<&str>) -> ServiceResult<Vec<&Task>> {
        let status = status.map(validate_status).transpose()?;
        Ok(self
            .store
            .tasks()
            .iter()
            .filter(|task| status.map_or(true, |status| task.status == status))
            .collect())
    }

    /// Moves a task to a new status.
    pub fn update_task_status(&mut self, id: &str, status: &str) -> ServiceResult<Task> {
        let status = validate_status(status)?;
        let task_id = self.resolve_task(id)?;
        let updated = self
            .store
            .set_task_status(task_id, status)
            .cloned()
            .ok_or_else(|| not_found(EntityKind::Task, id))?;
        self.commit()?;
        info!("event=task_update_status module=service status=ok task_id={task_id} task_status={status}");
        Ok(updated)
    }

    /// Assigns a task to an existing user.
    pub fn assign_task(&mut self, task_id: &str, user_id: &str) -> ServiceResult<Task> {
        let resolved_task = self.resolve_task(task_id)?;
        let resolved_user = self.resolve_user(user_id)?;
        let updated = self
            .store
            .assign_task(resolved_task, resolved_user)
            .cloned()
            .ok_or_else(|| not_found(EntityKind::Task, task_id))?;
        self.commit()?;
        info!(
            "event=task_assign module=service status=ok task_id={resolved_task} user_id={resolved_user}"
        );
        Ok(updated)
    }

    /// Returns a user with its linked projects and assigned tasks.
    pub fn user_overview(&self, id: &str) -> ServiceResult<UserOverview<'_>> {
        let user_id = self.resolve_user(id)?;
        let user = self
            .store
            .user(user_id)
            .ok_or_else(|| not_found(EntityKind::User, id))?;
        Ok(UserOverview {
            user,
            projects: self.store.projects_for_user(user_id),
            tasks: self.store.tasks_for_user(user_id),
        })
    }

    /// Returns a project with its associated users and tasks.
    pub fn project_overview(&self, id: &str) -> ServiceResult<ProjectOverview<'_>> {
        let project_id = self.resolve_project(id)?;
        let project = self
            .store
            .project(project_id)
            .ok_or_else(|| not_found(EntityKind::Project, id))?;
        let users = project
            .user_ids
            .iter()
            .filter_map(|user_id| self.store.user(*user_id))
            .collect();
        Ok(ProjectOverview {
            project,
            users,
            tasks: self.store.tasks_for_project(project_id),
        })
    }

    fn commit(&self) -> ServiceResult<()> {
        self.repo.save(&self.store)?;
        Ok(())
    }

    fn resolve_user(&self, id: &str) -> ServiceResult<UserId> {
        parse_id(EntityKind::User, id)
            .filter(|user_id| self.store.user(*user_id).is_some())
            .ok_or_else(|| not_found(EntityKind::User, id))
    }

    fn resolve_project(&self, id: &str) -> ServiceResult<ProjectId> {
        parse_id(EntityKind::Project, id)
            .filter(|project_id| self.store.project(*project_id).is_some())
            .ok_or_else(|| not_found(EntityKind::Project, id))
    }

    fn resolve_task(&self, id: &str) -> ServiceResult<TaskId> {
        parse_id(EntityKind::Task, id)
            .filter(|task_id| self.store.task(*task_id).is_some())
            .ok_or_else(|| not_found(EntityKind::Task, id))
    }
}

fn parse_id(kind: EntityKind, raw: &str) -> Option<Uuid> {
    let parsed = Uuid::parse_str(raw.trim()).ok();
    if parsed.is_none() {
        debug!("event=id_parse module=service status=rejected kind={kind}");
    }
    parsed
}

fn not_found(kind: EntityKind, id: &str) -> ServiceError {
    ServiceError::NotFound {
        kind,
        id: id.to_string(),
    }
}
