//! Board domain model.
//!
//! # Responsibility
//! - Define the lane and task records shared by the engine and storage.
//!
//! # Invariants
//! - Lanes and tasks reference each other by id only.
//! - A task belongs to exactly one lane at a time.

pub mod lane;
pub mod task;
