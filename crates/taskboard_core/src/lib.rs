//! Core domain logic for the priority task board.
//! This crate is the single source of truth for lane and task ordering
//! invariants.

pub mod board;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use board::lane_registry::{LaneError, LaneRegistry, LaneRemoval, DEFAULT_LANE_NAMES};
pub use board::snapshot::{BoardSnapshot, SnapshotError};
pub use board::task_ledger::{TaskError, TaskLedger};
pub use board::{Board, BoardError, LaneRemovalOutcome};
pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::lane::{Lane, LaneId};
pub use model::task::{Task, TaskId};
pub use repo::snapshot_repo::{
    SnapshotRepoError, SnapshotRepoResult, SnapshotRepository, SqliteSnapshotRepository,
    DEFAULT_STORAGE_KEY,
};
pub use service::board_service::{BoardService, BoardServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
