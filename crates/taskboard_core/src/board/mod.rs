//! In-memory board engine: lane registry, task ledger and their orchestration.
//!
//! # Responsibility
//! - Compose the lane registry and task ledger into one board state.
//! - Run cross-entity operations (lane removal with task relocation) as one
//!   logical transaction.
//! - Validate lane references before delegating task placement.
//!
//! # Invariants
//! - No operation performs I/O.
//! - Lane removal never relocates tasks unless the registry removal succeeded.
//! - Every task references a lane present in the registry.

pub mod lane_registry;
pub mod snapshot;
pub mod task_ledger;

use crate::model::lane::{Lane, LaneId};
use crate::model::task::{Task, TaskId};
use lane_registry::{LaneError, LaneRegistry};
use snapshot::BoardSnapshot;
use std::error::Error;
use std::fmt::{Display, Formatter};
use task_ledger::{TaskError, TaskLedger};

/// Errors from board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Lane(LaneError),
    Task(TaskError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lane(err) => write!(f, "{err}"),
            Self::Task(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lane(err) => Some(err),
            Self::Task(err) => Some(err),
        }
    }
}

impl From<LaneError> for BoardError {
    fn from(value: LaneError) -> Self {
        Self::Lane(value)
    }
}

impl From<TaskError> for BoardError {
    fn from(value: TaskError) -> Self {
        Self::Task(value)
    }
}

/// Result of removing the lowest-priority lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneRemovalOutcome {
    pub removed_lane: Lane,
    pub fallback_lane_id: LaneId,
    /// Tasks moved into the fallback lane, in their new order.
    pub relocated_task_ids: Vec<TaskId>,
}

/// Complete in-memory board state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    lanes: LaneRegistry,
    tasks: TaskLedger,
}

impl Board {
    /// Creates a board with the default lanes and no tasks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a board from a validated snapshot.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        let (lanes, tasks, lane_id_counter, task_id_counter) = snapshot.into_parts();
        Self {
            lanes: LaneRegistry::from_parts(lanes, lane_id_counter),
            tasks: TaskLedger::from_parts(tasks, task_id_counter),
        }
    }

    /// Produces a detached snapshot of lanes, tasks and both counters.
    pub fn export_state(&self) -> BoardSnapshot {
        BoardSnapshot::from_parts(
            self.lanes.list_lanes(),
            self.tasks.tasks().to_vec(),
            self.lanes.lane_id_counter(),
            self.tasks.task_id_counter(),
        )
    }

    /// Replaces the whole board state with `snapshot`.
    pub fn import_state(&mut self, snapshot: BoardSnapshot) {
        *self = Self::from_snapshot(snapshot);
    }

    pub fn add_lane(&mut self) -> Lane {
        self.lanes.add_lane()
    }

    /// Removes the tail lane and folds its tasks into the new tail.
    pub fn remove_last_lane(&mut self) -> Result<LaneRemovalOutcome, BoardError> {
        let removal = self.lanes.remove_last_lane()?;
        let relocated_task_ids = self
            .tasks
            .relocate_all_tasks(removal.removed_lane.id, removal.fallback_lane_id);
        Ok(LaneRemovalOutcome {
            removed_lane: removal.removed_lane,
            fallback_lane_id: removal.fallback_lane_id,
            relocated_task_ids,
        })
    }

    pub fn rename_lane(&mut self, lane_id: LaneId, new_name: &str) -> Result<String, BoardError> {
        Ok(self.lanes.rename_lane(lane_id, new_name)?)
    }

    pub fn find_lane(&self, lane_id: LaneId) -> Option<&Lane> {
        self.lanes.find_lane(lane_id)
    }

    pub fn list_lanes(&self) -> Vec<Lane> {
        self.lanes.list_lanes()
    }

    pub fn highest_priority_lane_id(&self) -> LaneId {
        self.lanes.highest_priority_lane_id()
    }

    /// Creates a task at the tail of an existing lane.
    pub fn create_task(
        &mut self,
        title: &str,
        content: &str,
        lane_id: LaneId,
    ) -> Result<Task, BoardError> {
        self.ensure_lane(lane_id)?;
        Ok(self.tasks.create_task(title, content, lane_id)?)
    }

    /// Creates a task at the tail of the highest-priority lane.
    pub fn add_task(&mut self, title: &str, content: &str) -> Result<Task, BoardError> {
        let lane_id = self.lanes.highest_priority_lane_id();
        self.create_task(title, content, lane_id)
    }

    pub fn update_task(
        &mut self,
        task_id: &TaskId,
        title: &str,
        content: &str,
    ) -> Result<Task, BoardError> {
        Ok(self.tasks.update_task(task_id, title, content)?.clone())
    }

    pub fn delete_task(&mut self, task_id: &TaskId) -> Result<Task, BoardError> {
        Ok(self.tasks.delete_task(task_id)?)
    }

    pub fn move_task_to_lane(
        &mut self,
        task_id: &TaskId,
        target_lane_id: LaneId,
    ) -> Result<Task, BoardError> {
        self.ensure_lane(target_lane_id)?;
        Ok(self.tasks.move_task_to_lane(task_id, target_lane_id)?.clone())
    }

    pub fn reorder_task(
        &mut self,
        task_id: &TaskId,
        target_lane_id: LaneId,
        new_order: usize,
    ) -> Result<Task, BoardError> {
        self.ensure_lane(target_lane_id)?;
        Ok(self
            .tasks
            .reorder_task(task_id, target_lane_id, new_order)?
            .clone())
    }

    pub fn get_task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.get_task(task_id)
    }

    pub fn get_tasks_by_lane(&self, lane_id: LaneId) -> Vec<Task> {
        self.tasks.get_tasks_by_lane(lane_id)
    }

    pub fn lanes(&self) -> &LaneRegistry {
        &self.lanes
    }

    pub fn tasks(&self) -> &TaskLedger {
        &self.tasks
    }

    fn ensure_lane(&self, lane_id: LaneId) -> Result<(), BoardError> {
        if self.lanes.has_lane(lane_id) {
            return Ok(());
        }
        Err(BoardError::Lane(LaneError::LaneNotFound(lane_id)))
    }
}
