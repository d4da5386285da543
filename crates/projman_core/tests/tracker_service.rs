use projman_core::{
    EntityKind, JsonFileRepository, NewTaskRequest, RepoError, ServiceError, StoreRepository,
    TaskStatus, TrackerService, ValidationError,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn open_service() -> (TempDir, PathBuf, TrackerService<JsonFileRepository>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let service = TrackerService::open(JsonFileRepository::new(&path));
    (dir, path, service)
}

fn reopen(path: &Path) -> TrackerService<JsonFileRepository> {
    TrackerService::open(JsonFileRepository::new(path))
}

#[test]
fn added_user_is_listed_with_stable_id_across_reloads() {
    let (_dir, path, mut service) = open_service();

    let user = service.add_user("Test User", "testuser@example.com").unwrap();
    assert_eq!(service.users().len(), 1);
    assert_eq!(service.users()[0].id(), user.id());

    let reloaded = reopen(&path);
    assert_eq!(reloaded.users().len(), 1);
    assert_eq!(reloaded.users()[0].id(), user.id());
    assert_eq!(reloaded.users()[0].name, "Test User");
    assert_eq!(reloaded.users()[0].email, "testuser@example.com");
}

#[test]
fn invalid_email_is_rejected_and_nothing_is_saved() {
    let (_dir, path, mut service) = open_service();

    let err = service.add_user("Bad", "not-an-email").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidEmail(_))
    ));
    assert!(service.users().is_empty());
    assert!(!path.exists());
}

#[test]
fn blank_name_is_rejected() {
    let (_dir, _path, mut service) = open_service();
    let err = service.add_user("   ", "ok@example.com").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankField("name"))
    ));
}

#[test]
fn remove_unknown_user_reports_not_found() {
    let (_dir, _path, mut service) = open_service();
    service.add_user("Ada", "ada@example.com").unwrap();

    let err = service
        .remove_user("8e0b7c8a-1d7f-4e0f-9a51-0c1d2e3f4a5b")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: EntityKind::User,
            ..
        }
    ));

    let err = service.remove_user("garbage").unwrap_err();
    assert_eq!(err.to_string(), "user not found: garbage");
    assert_eq!(service.users().len(), 1);
}

#[test]
fn project_requires_valid_due_date() {
    let (_dir, path, mut service) = open_service();

    let err = service
        .add_project("Launch", "first release", "2024/12/31")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidDate(_))
    ));

    let project = service
        .add_project("Launch", "first release", "2024-12-31")
        .unwrap();
    let reloaded = reopen(&path);
    assert_eq!(reloaded.projects().len(), 1);
    assert_eq!(reloaded.projects()[0].id(), project.id());
    assert_eq!(reloaded.projects()[0].due_date.to_string(), "2024-12-31");
}

#[test]
fn task_defaults_to_todo_and_rejects_unknown_status() {
    let (_dir, _path, mut service) = open_service();

    let task = service.add_task(&NewTaskRequest::new("Draft")).unwrap();
    assert_eq!(task.status, TaskStatus::Todo);

    let mut request = NewTaskRequest::new("Bad status");
    request.status = Some("completed".to_string());
    let err = service.add_task(&request).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidStatus(_))
    ));
    assert_eq!(service.tasks().len(), 1);
}

#[test]
fn task_with_unknown_references_is_rejected() {
    let (_dir, _path, mut service) = open_service();

    let mut request = NewTaskRequest::new("Orphan");
    request.project_id = Some("3f2a0f3c-0000-4000-8000-000000000000".to_string());
    let err = service.add_task(&request).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: EntityKind::Project,
            ..
        }
    ));

    let mut request = NewTaskRequest::new("Orphan");
    request.assigned_to = Some("nobody".to_string());
    let err = service.add_task(&request).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: EntityKind::User,
            ..
        }
    ));
    assert!(service.tasks().is_empty());
}

#[test]
fn removing_unfinished_task_is_rejected_until_done() {
    let (_dir, path, mut service) = open_service();
    let task = service.add_task(&NewTaskRequest::new("Ship")).unwrap();
    let task_id = task.id().to_string();

    let err = service.remove_task(&task_id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::TaskNotDone {
            status: TaskStatus::Todo,
            ..
        })
    ));
    assert_eq!(service.tasks().len(), 1);

    service.update_task_status(&task_id, "done").unwrap();
    let removed = service.remove_task(&task_id).unwrap();
    assert_eq!(removed.id(), task.id());
    assert!(service.tasks().is_empty());
    assert!(reopen(&path).tasks().is_empty());
}

#[test]
fn update_status_validates_before_lookup() {
    let (_dir, _path, mut service) = open_service();
    let task = service.add_task(&NewTaskRequest::new("Ship")).unwrap();

    let err = service
        .update_task_status(&task.id().to_string(), "finished")
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = service.update_task_status("missing", "done").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: EntityKind::Task,
            ..
        }
    ));
}

#[test]
fn assign_links_user_into_project_and_overviews() {
    let (_dir, path, mut service) = open_service();
    let user = service.add_user("Ada", "ada@example.com").unwrap();
    let project = service
        .add_project("Engine", "notes", "2025-01-15")
        .unwrap();

    let mut request = NewTaskRequest::new("Write program");
    request.project_id = Some(project.id().to_string());
    let task = service.add_task(&request).unwrap();

    let assigned = service
        .assign_task(&task.id().to_string(), &user.id().to_string())
        .unwrap();
    assert_eq!(assigned.assigned_to(), Some(user.id()));

    let reloaded = reopen(&path);
    let overview = reloaded
        .project_overview(&project.id().to_string())
        .unwrap();
    assert_eq!(overview.users.len(), 1);
    assert_eq!(overview.users[0].id(), user.id());
    assert_eq!(overview.tasks.len(), 1);
    assert_eq!(overview.project.task_ids(), [task.id()]);

    let user_view = reloaded.user_overview(&user.id().to_string()).unwrap();
    assert_eq!(user_view.projects.len(), 1);
    assert_eq!(user_view.tasks[0].id(), task.id());
}

#[test]
fn assign_to_unknown_user_is_rejected() {
    let (_dir, _path, mut service) = open_service();
    let task = service.add_task(&NewTaskRequest::new("Ship")).unwrap();

    let err = service
        .assign_task(&task.id().to_string(), "ghost")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: EntityKind::User,
            ..
        }
    ));
    assert_eq!(service.tasks()[0].assigned_to(), None);
}

#[test]
fn removing_user_and_project_cleans_links() {
    let (_dir, path, mut service) = open_service();
    let user = service.add_user("Ada", "ada@example.com").unwrap();
    let project = service.add_project("Engine", "", "2025-01-15").unwrap();

    let mut request = NewTaskRequest::new("Write program");
    request.assigned_to = Some(user.id().to_string());
    request.project_id = Some(project.id().to_string());
    let task = service.add_task(&request).unwrap();

    service.remove_user(&user.id().to_string()).unwrap();
    service.remove_project(&project.id().to_string()).unwrap();

    let reloaded = reopen(&path);
    let stored = reloaded.store().task(task.id()).unwrap();
    assert_eq!(stored.assigned_to(), None);
    assert_eq!(stored.project_id(), None);
}

#[test]
fn status_filter_selects_matching_tasks() {
    let (_dir, _path, mut service) = open_service();
    service.add_task(&NewTaskRequest::new("a")).unwrap();
    let mut request = NewTaskRequest::new("b");
    request.status = Some("done".to_string());
    service.add_task(&request).unwrap();

    assert_eq!(service.tasks_with_status(None).unwrap().len(), 2);
    let done = service.tasks_with_status(Some("done")).unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].title, "b");
    assert!(service.tasks_with_status(Some("nope")).is_err());
}

#[test]
fn malformed_file_surfaces_warning_and_next_save_rewrites_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "not json").unwrap();

    let mut service = reopen(&path);
    assert!(service.load_warning().is_some());
    assert!(service.users().is_empty());

    service.add_user("Ada", "ada@example.com").unwrap();
    let loaded = JsonFileRepository::new(&path).load();
    assert_eq!(loaded.warning, None);
    assert_eq!(loaded.store.users().len(), 1);
}

#[test]
fn removing_user_clears_project_link_loaded_without_tasks() {
    let (_dir, path, _service) = open_service();
    let user_id = "9b1d2c3e-4f50-4a6b-8c7d-8e9f0a1b2c3d";
    let document = serde_json::json!({
        "users": [{ "id": user_id, "name": "Ada", "email": "ada@example.com" }],
        "projects": [{
            "id": "1e2d3c4b-5a69-4788-9a0b-1c2d3e4f5a6b",
            "title": "Engine",
            "description": "",
            "due_date": "2025-01-15",
            "user_ids": [user_id],
            "task_ids": []
        }],
        "tasks": []
    });
    std::fs::write(&path, document.to_string()).unwrap();

    let mut service = reopen(&path);
    assert_eq!(service.projects()[0].user_ids().len(), 1);
    service.remove_user(user_id).unwrap();

    let reloaded = reopen(&path);
    assert!(reloaded.load_warning().is_none());
    assert!(reloaded.users().is_empty());
    assert!(reloaded.projects()[0].user_ids().is_empty());
}

#[test]
fn failed_save_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let path = blocker.join("data.json");
    let mut service = TrackerService::open(JsonFileRepository::new(&path));

    let err = service.add_user("Ada", "ada@example.com").unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::Io { .. })));
    assert!(err.to_string().contains("failed to write"));
    assert!(!path.exists());
}
