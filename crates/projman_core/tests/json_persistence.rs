use chrono::NaiveDate;
use projman_core::{
    JsonFileRepository, LoadWarning, Project, Store, StoreRepository, Task, TaskStatus, User,
};
use uuid::Uuid;

fn sample_store() -> Store {
    let mut store = Store::new();
    let user_id = store.add_user(User::new("Ada Lovelace", "ada@example.com"));
    let project_id = store.add_project(Project::new(
        "Engine",
        "Analytical engine notes",
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    ));

    store.add_task(
        Task::new("Write program", TaskStatus::InProgress)
            .with_links(Some(user_id), Some(project_id)),
    );
    store.add_task(Task::new("Loose end", TaskStatus::Done));
    store
}

#[test]
fn missing_file_loads_empty_without_warning() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path().join("data.json"));

    let loaded = repo.load();
    assert!(loaded.store.is_empty());
    assert_eq!(loaded.warning, None);
}

#[test]
fn save_then_load_preserves_all_fields() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path().join("data.json"));
    let store = sample_store();

    repo.save(&store).unwrap();
    let loaded = repo.load();

    assert_eq!(loaded.warning, None);
    assert_eq!(loaded.store, store);
}

#[test]
fn saved_document_uses_expected_wire_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let repo = JsonFileRepository::new(&path);
    let store = sample_store();
    repo.save(&store).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let user = &json["users"][0];
    assert_eq!(user["id"], store.users()[0].id().to_string());
    assert_eq!(user["name"], "Ada Lovelace");
    assert_eq!(user["email"], "ada@example.com");

    let project = &json["projects"][0];
    assert_eq!(project["title"], "Engine");
    assert_eq!(project["description"], "Analytical engine notes");
    assert_eq!(project["due_date"], "2024-12-31");
    assert_eq!(project["user_ids"][0], user["id"]);
    assert_eq!(project["task_ids"].as_array().unwrap().len(), 1);

    let task = &json["tasks"][0];
    assert_eq!(task["status"], "in-progress");
    assert_eq!(task["assigned_to"], user["id"]);
    assert_eq!(task["project_id"], project["id"]);
    assert_eq!(json["tasks"][1]["assigned_to"], serde_json::Value::Null);
}

#[test]
fn malformed_json_degrades_to_empty_store_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{ \"users\": [ oops").unwrap();

    let loaded = JsonFileRepository::new(&path).load();

    assert!(loaded.store.is_empty());
    match loaded.warning {
        Some(LoadWarning::Malformed { path: warned, .. }) => assert_eq!(warned, path),
        other => panic!("expected malformed warning, got {other:?}"),
    }
}

#[test]
fn wrong_shape_is_reported_as_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, r#"{"users": [{"id": "not-a-uuid", "name": "x", "email": "x@y.io"}]}"#)
        .unwrap();

    let loaded = JsonFileRepository::new(&path).load();
    assert!(loaded.store.is_empty());
    assert!(matches!(loaded.warning, Some(LoadWarning::Malformed { .. })));
}

#[test]
fn unreadable_path_degrades_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be read as a file.
    let loaded = JsonFileRepository::new(dir.path()).load();

    assert!(loaded.store.is_empty());
    assert!(matches!(loaded.warning, Some(LoadWarning::Unreadable { .. })));
}

#[test]
fn missing_top_level_arrays_default_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let user_id = Uuid::new_v4();
    std::fs::write(
        &path,
        format!(r#"{{"users": [{{"id": "{user_id}", "name": "Ada", "email": "ada@example.com"}}]}}"#),
    )
    .unwrap();

    let loaded = JsonFileRepository::new(&path).load();
    assert_eq!(loaded.warning, None);
    assert_eq!(loaded.store.users().len(), 1);
    assert_eq!(loaded.store.users()[0].id(), user_id);
    assert!(loaded.store.projects().is_empty());
    assert!(loaded.store.tasks().is_empty());
}

#[test]
fn save_creates_parent_directories_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("data.json");
    let repo = JsonFileRepository::new(&path);

    repo.save(&sample_store()).unwrap();

    assert!(path.is_file());
    assert!(!path.with_file_name("data.json.tmp").exists());
}

#[test]
fn save_overwrites_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::new(dir.path().join("data.json"));

    repo.save(&sample_store()).unwrap();
    repo.save(&Store::new()).unwrap();

    assert!(repo.load().store.is_empty());
}
