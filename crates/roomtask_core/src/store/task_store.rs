//! Task/room store and its mutation operations.
//!
//! # Responsibility
//! - Provide the single mutation surface for rooms, tasks, and selection.
//! - Normalize loaded state so in-memory invariants hold from the start.
//!
//! # Invariants
//! - Exactly one room with the reserved `"general"` id exists at all times.
//! - Every task's `room_id` references an existing room.
//! - `current_room_id` references an existing room; deleting the selected
//!   room falls back to `"general"`.
//! - Invalid input (empty text/name) and unknown ids are silent no-ops;
//!   nothing here raises a domain error to the caller.

use crate::model::room::{Room, RoomId, GENERAL_ROOM_ID};
use crate::model::task::{Priority, Task};
use crate::repo::snapshot_repo::{RepoResult, SnapshotRepository};
use log::{debug, info, warn};

/// Sole owner of rooms, tasks, and the current-room selection.
///
/// Constructed once via [`TaskStore::open`] and passed by reference to
/// whatever layer renders or drives it; there is no ambient global
/// instance. All mutation methods take `&mut self`, so access is
/// single-threaded by construction.
pub struct TaskStore<R: SnapshotRepository> {
    repo: R,
    rooms: Vec<Room>,
    tasks: Vec<Task>,
    current_room_id: RoomId,
    revision: u64,
}

impl<R: SnapshotRepository> TaskStore<R> {
    /// Loads both buckets and normalizes them into a consistent state.
    ///
    /// # Contract
    /// - A missing `"general"` room is re-seeded at the front.
    /// - Tasks whose `room_id` matches no loaded room are dropped (repair
    ///   for the cross-bucket inconsistency window of independent saves).
    /// - Selection starts at `"general"`.
    pub fn open(repo: R) -> RepoResult<Self> {
        let mut rooms = repo.load_rooms()?;
        let mut tasks = repo.load_tasks()?;

        if !rooms.iter().any(Room::is_general) {
            warn!("event=store_open module=store status=repair error_code=missing_general_room");
            rooms.insert(0, Room::general());
        }

        let before = tasks.len();
        tasks.retain(|task| rooms.iter().any(|room| room.id == task.room_id));
        let dropped = before - tasks.len();
        if dropped > 0 {
            warn!(
                "event=store_open module=store status=repair error_code=orphaned_tasks dropped={dropped}"
            );
        }

        info!(
            "event=store_open module=store status=ok rooms={} tasks={}",
            rooms.len(),
            tasks.len()
        );

        Ok(Self {
            repo,
            rooms,
            tasks,
            current_room_id: GENERAL_ROOM_ID.to_string(),
            revision: 0,
        })
    }

    /// Appends a new incomplete task to the target room.
    ///
    /// Returns `Ok(None)` without touching state when `text` trims to
    /// empty or `room_id` names no existing room.
    pub fn add_task(
        &mut self,
        text: &str,
        priority: Priority,
        room_id: &str,
    ) -> RepoResult<Option<Task>> {
        let text = text.trim();
        if text.is_empty() {
            debug!("event=add_task module=store status=noop reason=empty_text");
            return Ok(None);
        }
        if !self.room_exists(room_id) {
            debug!("event=add_task module=store status=noop reason=unknown_room");
            return Ok(None);
        }

        let task = Task::new(text, priority, room_id);
        self.tasks.push(task.clone());
        self.repo.save_tasks(&self.tasks)?;
        self.revision += 1;

        debug!("event=add_task module=store status=ok task_id={}", task.id);
        Ok(Some(task))
    }

    /// Flips completion for the task with the given id; unknown ids are
    /// silently ignored.
    pub fn toggle_task(&mut self, id: &str) -> RepoResult<()> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=toggle_task module=store status=noop reason=unknown_task");
            return Ok(());
        };
        task.toggle();
        self.repo.save_tasks(&self.tasks)?;
        self.revision += 1;
        Ok(())
    }

    /// Removes the task with the given id; unknown ids are silently
    /// ignored.
    pub fn delete_task(&mut self, id: &str) -> RepoResult<()> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            debug!("event=delete_task module=store status=noop reason=unknown_task");
            return Ok(());
        }
        self.repo.save_tasks(&self.tasks)?;
        self.revision += 1;
        Ok(())
    }

    /// Appends a new room.
    ///
    /// Returns `Ok(None)` without touching state when `name` trims to
    /// empty.
    pub fn add_room(&mut self, name: &str) -> RepoResult<Option<Room>> {
        let name = name.trim();
        if name.is_empty() {
            debug!("event=add_room module=store status=noop reason=empty_name");
            return Ok(None);
        }

        let room = Room::new(name);
        self.rooms.push(room.clone());
        self.repo.save_rooms(&self.rooms)?;
        self.revision += 1;

        debug!("event=add_room module=store status=ok room_id={}", room.id);
        Ok(Some(room))
    }

    /// Removes a room and every task filed under it as one state
    /// transition.
    ///
    /// # Contract
    /// - Targeting `"general"` is a protected no-op.
    /// - Unknown ids are silently ignored.
    /// - If the deleted room was selected, selection falls back to
    ///   `"general"`.
    pub fn delete_room(&mut self, id: &str) -> RepoResult<()> {
        if id == GENERAL_ROOM_ID {
            debug!("event=delete_room module=store status=noop reason=protected_room");
            return Ok(());
        }
        if !self.room_exists(id) {
            debug!("event=delete_room module=store status=noop reason=unknown_room");
            return Ok(());
        }

        // Both collections change in memory first; the bucket saves that
        // follow are independent writes, so a crash between them leaves an
        // inconsistency that open() repairs.
        self.tasks.retain(|task| task.room_id != id);
        self.rooms.retain(|room| room.id != id);
        if self.current_room_id == id {
            self.current_room_id = GENERAL_ROOM_ID.to_string();
        }

        self.repo.save_tasks(&self.tasks)?;
        self.repo.save_rooms(&self.rooms)?;
        self.revision += 1;

        debug!("event=delete_room module=store status=ok room_id={id}");
        Ok(())
    }

    /// Switches the current-room selection.
    ///
    /// Ids naming no existing room are silently ignored, keeping the
    /// selection pointed at a live room. Selection is ephemeral and never
    /// persisted.
    pub fn set_current_room(&mut self, id: &str) {
        if !self.room_exists(id) {
            debug!("event=set_current_room module=store status=noop reason=unknown_room");
            return;
        }
        if self.current_room_id != id {
            self.current_room_id = id.to_string();
            self.revision += 1;
        }
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All rooms in insertion order; `"general"` is always present.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Id of the currently selected room.
    pub fn current_room_id(&self) -> &str {
        &self.current_room_id
    }

    /// Monotonic change counter; bumps on every state change, letting a
    /// presentation layer detect when to re-derive its views.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Looks up a task by id.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn room_exists(&self, id: &str) -> bool {
        self.rooms.iter().any(|room| room.id == id)
    }
}
