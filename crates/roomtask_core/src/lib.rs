//! Core domain logic for the room-scoped task tracker.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::room::{Room, RoomId, GENERAL_ROOM_ID};
pub use model::task::{Priority, Task, TaskId};
pub use repo::snapshot_repo::{
    JsonSnapshotRepository, MemorySnapshotRepository, RepoError, RepoResult, SnapshotRepository,
};
pub use store::task_store::TaskStore;
pub use view::{group_by_completion, room_by_id, sorted_tasks, visible_tasks, TaskSections};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
