//! Pure view derivation over store state.
//!
//! # Responsibility
//! - Compute the filtered/sorted task lists a renderer displays.
//! - Stay stateless: identical inputs always produce identical output.
//!
//! # Invariants
//! - Incomplete tasks sort before completed tasks.
//! - Within the incomplete group, priority rank decides order
//!   (`high < medium < low`); ties keep insertion order (stable sort,
//!   no secondary key).
//! - The completed group keeps insertion order; completing a task never
//!   reorders it by priority.

use crate::model::room::Room;
use crate::model::task::Task;
use std::cmp::Ordering;

/// Ordered partition of one room's tasks for sectioned display.
#[derive(Debug, Default)]
pub struct TaskSections<'a> {
    pub incomplete: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

/// Filters to the tasks filed under the selected room, keeping insertion
/// order.
pub fn visible_tasks<'a>(tasks: &'a [Task], current_room_id: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| task.room_id == current_room_id)
        .collect()
}

/// Sorts tasks for display: incomplete first by priority rank, completed
/// last in insertion order.
pub fn sorted_tasks(mut tasks: Vec<&Task>) -> Vec<&Task> {
    tasks.sort_by(|a, b| match (a.is_completed, b.is_completed) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
        (false, false) => a.priority.rank().cmp(&b.priority.rank()),
    });
    tasks
}

/// Partitions an already-sorted task list into display sections,
/// preserving order.
pub fn group_by_completion<'a>(sorted: &[&'a Task]) -> TaskSections<'a> {
    let mut sections = TaskSections::default();
    for task in sorted {
        if task.is_completed {
            sections.completed.push(task);
        } else {
            sections.incomplete.push(task);
        }
    }
    sections
}

/// Looks up the room backing a list header.
pub fn room_by_id<'a>(rooms: &'a [Room], id: &str) -> Option<&'a Room> {
    rooms.iter().find(|room| room.id == id)
}

#[cfg(test)]
mod tests {
    use super::{group_by_completion, room_by_id, sorted_tasks, visible_tasks};
    use crate::model::room::Room;
    use crate::model::task::{Priority, Task};

    fn task(text: &str, priority: Priority, completed: bool, room_id: &str) -> Task {
        let mut task = Task::new(text, priority, room_id);
        task.is_completed = completed;
        task
    }

    #[test]
    fn visible_tasks_filters_by_room() {
        let tasks = vec![
            task("a", Priority::Medium, false, "general"),
            task("b", Priority::Medium, false, "work"),
            task("c", Priority::Medium, false, "general"),
        ];

        let visible = visible_tasks(&tasks, "general");
        let texts: Vec<_> = visible.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn incomplete_sort_before_completed_with_priority_order() {
        let tasks = vec![
            task("high", Priority::High, false, "general"),
            task("low", Priority::Low, false, "general"),
            task("done", Priority::Medium, true, "general"),
        ];

        let sorted = sorted_tasks(tasks.iter().collect());
        let texts: Vec<_> = sorted.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["high", "low", "done"]);
    }

    #[test]
    fn equal_priority_keeps_insertion_order() {
        let tasks = vec![
            task("first", Priority::Medium, false, "general"),
            task("second", Priority::Medium, false, "general"),
            task("third", Priority::High, false, "general"),
        ];

        let sorted = sorted_tasks(tasks.iter().collect());
        let texts: Vec<_> = sorted.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["third", "first", "second"]);
    }

    #[test]
    fn completed_group_keeps_insertion_order_regardless_of_priority() {
        let tasks = vec![
            task("done-low", Priority::Low, true, "general"),
            task("done-high", Priority::High, true, "general"),
        ];

        let sorted = sorted_tasks(tasks.iter().collect());
        let texts: Vec<_> = sorted.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["done-low", "done-high"]);
    }

    #[test]
    fn grouping_partitions_and_preserves_order() {
        let tasks = vec![
            task("a", Priority::High, false, "general"),
            task("b", Priority::Low, false, "general"),
            task("c", Priority::Medium, true, "general"),
        ];

        let sorted = sorted_tasks(tasks.iter().collect());
        let sections = group_by_completion(&sorted);

        let incomplete: Vec<_> = sections.incomplete.iter().map(|t| t.text.as_str()).collect();
        let completed: Vec<_> = sections.completed.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(incomplete, ["a", "b"]);
        assert_eq!(completed, ["c"]);
    }

    #[test]
    fn room_by_id_finds_the_header_room() {
        let rooms = vec![Room::general(), Room::new("Work")];
        assert_eq!(room_by_id(&rooms, "general").map(|r| r.name.as_str()), Some("General"));
        assert!(room_by_id(&rooms, "missing").is_none());
    }
}
