//! Room domain model.
//!
//! # Responsibility
//! - Define the room record and the reserved default room.
//!
//! # Invariants
//! - `id` is stable and never reused for another room.
//! - The `"general"` room exists at all times and is never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a room.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Generated ids are UUID v4 text; `"general"` is the single reserved
/// non-UUID value.
pub type RoomId = String;

/// Reserved id of the default room that always exists.
pub const GENERAL_ROOM_ID: &str = "general";

/// A named category tasks are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Stable id used as the foreign key target of `Task::room_id`.
    pub id: RoomId,
    /// Display name, non-empty after trimming.
    pub name: String,
    /// Creation instant, serialized as RFC 3339 text.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Creates a room with a freshly generated stable id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Returns the seed room present on first-ever run.
    pub fn general() -> Self {
        Self {
            id: GENERAL_ROOM_ID.to_string(),
            name: "General".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Returns whether this is the protected default room.
    pub fn is_general(&self) -> bool {
        self.id == GENERAL_ROOM_ID
    }
}
