//! Persisting board service.
//!
//! # Responsibility
//! - Load the stored board (or defaults) for one storage key.
//! - Run one board operation at a time and persist the resulting snapshot.
//!
//! # Invariants
//! - A snapshot is written only after the board operation succeeded.
//! - When persisting fails the in-memory board is rolled back, so memory and
//!   storage never diverge.
//! - Log lines carry ids and counts only, never task titles or content.

use crate::board::snapshot::{BoardSnapshot, SnapshotError};
use crate::board::{Board, BoardError, LaneRemovalOutcome};
use crate::model::lane::{Lane, LaneId};
use crate::model::task::{Task, TaskId};
use crate::repo::snapshot_repo::{normalize_storage_key, SnapshotRepoError, SnapshotRepository};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Errors from board service operations.
#[derive(Debug)]
pub enum BoardServiceError {
    /// Board rejected the operation; nothing was written.
    Board(BoardError),
    /// Snapshot payload could not be decoded.
    Snapshot(SnapshotError),
    /// Storage failure; the in-memory board was rolled back.
    Repo(SnapshotRepoError),
    /// Storage key is blank after trim.
    InvalidStorageKey,
}

impl Display for BoardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Board(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InvalidStorageKey => write!(f, "storage key must not be blank"),
        }
    }
}

impl Error for BoardServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Board(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InvalidStorageKey => None,
        }
    }
}

impl From<BoardError> for BoardServiceError {
    fn from(value: BoardError) -> Self {
        Self::Board(value)
    }
}

impl From<SnapshotError> for BoardServiceError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

impl From<SnapshotRepoError> for BoardServiceError {
    fn from(value: SnapshotRepoError) -> Self {
        Self::Repo(value)
    }
}

/// Board facade that persists after every successful mutation.
pub struct BoardService<R: SnapshotRepository> {
    repo: R,
    storage_key: String,
    board: Board,
}

impl<R: SnapshotRepository> BoardService<R> {
    /// Loads the board stored under `storage_key`, or starts a default board
    /// when nothing is stored yet.
    pub fn open(repo: R, storage_key: &str) -> Result<Self, BoardServiceError> {
        let storage_key = normalize_storage_key(storage_key)
            .map_err(|_| BoardServiceError::InvalidStorageKey)?
            .to_string();
        let board = match repo.load(&storage_key)? {
            Some(snapshot) => {
                info!(
                    "event=board_load module=service status=ok source=storage lanes={} tasks={}",
                    snapshot.lanes().len(),
                    snapshot.tasks().len()
                );
                Board::from_snapshot(snapshot)
            }
            None => {
                info!("event=board_load module=service status=ok source=defaults");
                Board::new()
            }
        };
        Ok(Self {
            repo,
            storage_key,
            board,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn storage_key(&self) -> &str {
        self.storage_key.as_str()
    }

    pub fn add_lane(&mut self) -> Result<Lane, BoardServiceError> {
        self.apply("lane_add", |board| Ok(board.add_lane()))
    }

    /// Removes the lowest-priority lane and folds its tasks into the new tail.
    pub fn remove_last_lane(&mut self) -> Result<LaneRemovalOutcome, BoardServiceError> {
        self.apply("lane_remove", Board::remove_last_lane)
    }

    pub fn rename_lane(
        &mut self,
        lane_id: LaneId,
        new_name: &str,
    ) -> Result<String, BoardServiceError> {
        self.apply("lane_rename", |board| board.rename_lane(lane_id, new_name))
    }

    pub fn create_task(
        &mut self,
        title: &str,
        content: &str,
        lane_id: LaneId,
    ) -> Result<Task, BoardServiceError> {
        self.apply("task_create", |board| {
            board.create_task(title, content, lane_id)
        })
    }

    /// Creates a task in the highest-priority lane.
    pub fn add_task(&mut self, title: &str, content: &str) -> Result<Task, BoardServiceError> {
        self.apply("task_create", |board| board.add_task(title, content))
    }

    pub fn update_task(
        &mut self,
        task_id: &TaskId,
        title: &str,
        content: &str,
    ) -> Result<Task, BoardServiceError> {
        self.apply("task_update", |board| {
            board.update_task(task_id, title, content)
        })
    }

    pub fn delete_task(&mut self, task_id: &TaskId) -> Result<Task, BoardServiceError> {
        self.apply("task_delete", |board| board.delete_task(task_id))
    }

    pub fn move_task_to_lane(
        &mut self,
        task_id: &TaskId,
        target_lane_id: LaneId,
    ) -> Result<Task, BoardServiceError> {
        self.apply("task_move", |board| {
            board.move_task_to_lane(task_id, target_lane_id)
        })
    }

    pub fn reorder_task(
        &mut self,
        task_id: &TaskId,
        target_lane_id: LaneId,
        new_order: usize,
    ) -> Result<Task, BoardServiceError> {
        self.apply("task_reorder", |board| {
            board.reorder_task(task_id, target_lane_id, new_order)
        })
    }

    /// Replaces the board with a decoded JSON snapshot and persists it.
    pub fn import_json(&mut self, payload: &str) -> Result<(), BoardServiceError> {
        let snapshot = BoardSnapshot::from_json(payload)?;
        self.apply("board_import", |board| {
            board.import_state(snapshot);
            Ok(())
        })
    }

    pub fn export_json(&self) -> Result<String, BoardServiceError> {
        Ok(self.board.export_state().to_json()?)
    }

    /// Writes the current board without mutating it.
    pub fn save(&self) -> Result<(), BoardServiceError> {
        self.repo
            .save(&self.storage_key, &self.board.export_state())
            .map_err(Into::into)
    }

    /// Drops the stored snapshot and returns to a default board.
    pub fn reset(&mut self) -> Result<(), BoardServiceError> {
        let existed = self.repo.clear(&self.storage_key)?;
        self.board = Board::new();
        info!("event=board_reset module=service status=ok existed={existed}");
        Ok(())
    }

    fn apply<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut Board) -> Result<T, BoardError>,
    ) -> Result<T, BoardServiceError> {
        let started_at = Instant::now();
        let previous = self.board.clone();

        let value = match f(&mut self.board) {
            Ok(value) => value,
            Err(err) => {
                warn!("event={op} module=service status=rejected error={err}");
                return Err(err.into());
            }
        };

        if let Err(err) = self.save() {
            self.board = previous;
            error!(
                "event={op} module=service status=error error_code=persist_failed error={err}"
            );
            return Err(err);
        }

        info!(
            "event={op} module=service status=ok duration_ms={} lanes={} tasks={}",
            started_at.elapsed().as_millis(),
            self.board.lanes().len(),
            self.board.tasks().len()
        );
        Ok(value)
    }
}
