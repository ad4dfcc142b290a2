//! Persistence layer abstractions and snapshot implementations.
//!
//! # Responsibility
//! - Define the two-bucket snapshot contract the store persists through.
//! - Isolate file-format details from store/business orchestration.
//!
//! # Invariants
//! - Saves rewrite the full collection for one bucket; never deltas.
//! - Unreadable bucket contents degrade to the default seed instead of
//!   propagating a parse failure to the caller.

pub mod snapshot_repo;
