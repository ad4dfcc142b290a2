use roomtask_core::{
    JsonSnapshotRepository, Priority, Room, SnapshotRepository, Task, TaskStore, GENERAL_ROOM_ID,
};
use tempfile::TempDir;

fn repo_in(dir: &TempDir) -> JsonSnapshotRepository {
    JsonSnapshotRepository::open(dir.path()).unwrap()
}

#[test]
fn first_run_loads_the_default_seed() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir);

    let rooms = repo.load_rooms().unwrap();
    let tasks = repo.load_tasks().unwrap();

    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].id, GENERAL_ROOM_ID);
    assert_eq!(rooms[0].name, "General");
    assert!(tasks.is_empty());
}

#[test]
fn save_then_load_reproduces_the_collections() {
    let dir = TempDir::new().unwrap();

    let mut store = TaskStore::open(repo_in(&dir)).unwrap();
    let work = store.add_room("Work").unwrap().unwrap();
    store
        .add_task("ship release", Priority::High, &work.id)
        .unwrap()
        .unwrap();
    let toggled = store
        .add_task("water plants", Priority::Low, GENERAL_ROOM_ID)
        .unwrap()
        .unwrap();
    store.toggle_task(&toggled.id).unwrap();

    let saved_rooms = store.rooms().to_vec();
    let saved_tasks = store.tasks().to_vec();
    drop(store);

    let reloaded = TaskStore::open(repo_in(&dir)).unwrap();
    assert_eq!(reloaded.rooms(), saved_rooms.as_slice());
    assert_eq!(reloaded.tasks(), saved_tasks.as_slice());
}

#[test]
fn corrupt_tasks_bucket_falls_back_without_touching_rooms() {
    let dir = TempDir::new().unwrap();

    let mut store = TaskStore::open(repo_in(&dir)).unwrap();
    store.add_room("Work").unwrap().unwrap();
    store
        .add_task("will be lost", Priority::Medium, GENERAL_ROOM_ID)
        .unwrap()
        .unwrap();
    drop(store);

    std::fs::write(dir.path().join("tasks.json"), "{not json").unwrap();

    let reloaded = TaskStore::open(repo_in(&dir)).unwrap();
    assert!(reloaded.tasks().is_empty());
    assert_eq!(reloaded.rooms().len(), 2);
}

#[test]
fn corrupt_buckets_load_as_the_seed_state() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "][").unwrap();
    std::fs::write(dir.path().join("rooms.json"), "\"not a collection\"").unwrap();

    let store = TaskStore::open(repo_in(&dir)).unwrap();

    assert_eq!(store.rooms().len(), 1);
    assert_eq!(store.rooms()[0].id, GENERAL_ROOM_ID);
    assert!(store.tasks().is_empty());
    assert_eq!(store.current_room_id(), GENERAL_ROOM_ID);
}

#[test]
fn legacy_bare_array_buckets_are_accepted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("rooms.json"),
        r#"[
            {"id": "general", "name": "General", "createdAt": "2024-03-01T09:00:00Z"},
            {"id": "abc1234", "name": "Errands", "createdAt": "2024-03-02T10:30:00Z"}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("tasks.json"),
        r#"[
            {"id": "t1", "text": "buy stamps", "isCompleted": false,
             "priority": "high", "roomId": "abc1234",
             "createdAt": "2024-03-02T11:00:00.250Z"}
        ]"#,
    )
    .unwrap();

    let store = TaskStore::open(repo_in(&dir)).unwrap();

    assert_eq!(store.rooms().len(), 2);
    let task = &store.tasks()[0];
    assert_eq!(task.text, "buy stamps");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.room_id, "abc1234");
    assert_eq!(task.created_at.timestamp_millis(), 1_709_377_200_250);
}

#[test]
fn bucket_from_a_newer_layout_version_is_treated_as_unreadable() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("rooms.json"),
        r#"{"version": 99, "items": []}"#,
    )
    .unwrap();

    let repo = repo_in(&dir);
    let rooms = repo.load_rooms().unwrap();

    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].id, GENERAL_ROOM_ID);
}

#[test]
fn open_drops_tasks_whose_room_no_longer_exists() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir);

    let rooms = vec![Room::general()];
    let tasks = vec![
        Task::new("kept", Priority::Medium, GENERAL_ROOM_ID),
        Task::new("orphaned", Priority::Medium, "deleted-room"),
    ];
    repo.save_rooms(&rooms).unwrap();
    repo.save_tasks(&tasks).unwrap();

    let store = TaskStore::open(repo_in(&dir)).unwrap();

    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].text, "kept");
}

#[test]
fn open_reseeds_a_missing_general_room() {
    let dir = TempDir::new().unwrap();
    let repo = repo_in(&dir);

    repo.save_rooms(&[Room::new("Only Custom")]).unwrap();

    let store = TaskStore::open(repo_in(&dir)).unwrap();

    assert_eq!(store.rooms().len(), 2);
    assert!(store.rooms()[0].is_general());
    assert_eq!(store.current_room_id(), GENERAL_ROOM_ID);
}

#[test]
fn mutations_rewrite_the_buckets_synchronously() {
    let dir = TempDir::new().unwrap();

    let mut store = TaskStore::open(repo_in(&dir)).unwrap();
    let task = store
        .add_task("persisted at once", Priority::Medium, GENERAL_ROOM_ID)
        .unwrap()
        .unwrap();

    // A second repository over the same directory sees the write already.
    let observer = repo_in(&dir);
    let on_disk = observer.load_tasks().unwrap();
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk[0].id, task.id);

    store.delete_task(&task.id).unwrap();
    assert!(observer.load_tasks().unwrap().is_empty());
}
