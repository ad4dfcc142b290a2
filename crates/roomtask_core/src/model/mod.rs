//! Domain model for room-scoped task tracking.
//!
//! # Responsibility
//! - Define the canonical `Task` and `Room` records used by core logic.
//! - Keep wire-field naming aligned with the persisted snapshot layout.
//!
//! # Invariants
//! - Every domain object is identified by a stable string id.
//! - Exactly one room carries the reserved id `"general"`.

pub mod room;
pub mod task;
