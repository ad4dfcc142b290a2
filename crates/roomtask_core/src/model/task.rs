//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its priority scale.
//! - Provide the completion toggle used by the store.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `room_id` references an existing room at creation time.
//! - `is_completed` starts as `false`.

use crate::model::room::RoomId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task (UUID v4 text).
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = String;

/// Urgency scale for a task.
///
/// `rank()` is the sort key used by view derivation: lower rank sorts
/// first among incomplete tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Display-order rank: `high(0) < medium(1) < low(2)`.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A single to-do item filed under one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id used for toggle/delete addressing.
    pub id: TaskId,
    /// Non-empty trimmed content.
    pub text: String,
    /// Completion flag, flipped by `Task::toggle`.
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
    pub priority: Priority,
    /// Foreign key into the room collection.
    #[serde(rename = "roomId")]
    pub room_id: RoomId,
    /// Creation instant, serialized as RFC 3339 text.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task with a freshly generated stable id.
    ///
    /// # Invariants
    /// - `is_completed` starts as `false`.
    /// - `created_at` is the current instant.
    pub fn new(text: impl Into<String>, priority: Priority, room_id: impl Into<RoomId>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            is_completed: false,
            priority,
            room_id: room_id.into(),
            created_at: Utc::now(),
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }
}
