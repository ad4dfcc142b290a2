//! Authoritative state ownership.
//!
//! # Responsibility
//! - Own the room/task collections and the current-room selection.
//! - Funnel every mutation through one place that persists before
//!   reporting completion.
//!
//! # Invariants
//! - No other component holds mutable references into the collections.
//! - Every successful mutation is persisted before the call returns.

pub mod task_store;
