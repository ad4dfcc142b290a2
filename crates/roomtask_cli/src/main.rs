//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `roomtask_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use roomtask_core::{MemorySnapshotRepository, Priority, TaskStore, GENERAL_ROOM_ID};

fn main() {
    println!("roomtask_core version={}", roomtask_core::core_version());

    // In-memory session exercising the full mutation surface end to end.
    let mut store = match TaskStore::open(MemorySnapshotRepository::new()) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = smoke_session(&mut store) {
        eprintln!("smoke session failed: {err}");
        std::process::exit(1);
    }

    println!(
        "rooms={} tasks={} current_room={} revision={}",
        store.rooms().len(),
        store.tasks().len(),
        store.current_room_id(),
        store.revision()
    );
}

fn smoke_session(
    store: &mut TaskStore<MemorySnapshotRepository>,
) -> Result<(), roomtask_core::RepoError> {
    let task = store.add_task("smoke check", Priority::High, GENERAL_ROOM_ID)?;
    if let Some(task) = task {
        store.toggle_task(&task.id)?;
    }
    if let Some(room) = store.add_room("Scratch")? {
        store.set_current_room(&room.id);
        store.delete_room(&room.id)?;
    }
    Ok(())
}
