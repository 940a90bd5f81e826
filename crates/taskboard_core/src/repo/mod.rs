//! Repository layer for durable board storage.
//!
//! # Responsibility
//! - Define the storage contract the board service persists through.
//! - Isolate SQLite query details from board orchestration.
//!
//! # Invariants
//! - Repositories store validated snapshots only and never mutate board state.

pub mod snapshot_repo;
