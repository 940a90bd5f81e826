//! Board snapshot: the serializable `{lanes, tasks, counters}` document.
//!
//! # Responsibility
//! - Define the export/import shape consumed by persistence collaborators.
//! - Normalize persisted ids (numeric or numeric-string lane ids) into
//!   canonical in-memory types at the boundary.
//! - Migrate legacy payloads (`queues`/`queueId`/`counters`, missing `order`).
//!
//! # Invariants
//! - A constructed `BoardSnapshot` has unique lane ids, unique task ids, and
//!   every task references a lane in `lanes` (unless both lists are empty).
//! - Counters are never lower than `max(existing id) + 1` and always leave
//!   room for the next issued id.
//! - Serialized output always carries explicit `order` values and counters.

use crate::board::lane_registry::DEFAULT_LANE_NAMES;
use crate::model::lane::{positional_lane_name, Lane, LaneId};
use crate::model::task::{normalize_title, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from snapshot encode/decode and validation.
#[derive(Debug)]
pub enum SnapshotError {
    /// JSON transport failure (including validation failures raised while
    /// decoding).
    Json(serde_json::Error),
    /// Lane id is neither a number nor a numeric string.
    InvalidLaneId(String),
    DuplicateLaneId(LaneId),
    DuplicateTaskId(TaskId),
    /// Task points at a lane missing from the snapshot.
    UnknownLane { task_id: TaskId, lane_id: LaneId },
    /// Task title is blank after trim.
    EmptyTitle(TaskId),
    /// An id or order value leaves no room for the next one.
    CounterOverflow,
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid snapshot json: {err}"),
            Self::InvalidLaneId(value) => write!(f, "invalid lane id `{value}`"),
            Self::DuplicateLaneId(id) => write!(f, "duplicate lane id: {id}"),
            Self::DuplicateTaskId(id) => write!(f, "duplicate task id: {id}"),
            Self::UnknownLane { task_id, lane_id } => {
                write!(f, "task {task_id} references unknown lane {lane_id}")
            }
            Self::EmptyTitle(id) => write!(f, "task {id} has a blank title"),
            Self::CounterOverflow => write!(f, "snapshot id or order value is out of range"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Validated board state detached from any live board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSnapshot")]
pub struct BoardSnapshot {
    lanes: Vec<Lane>,
    tasks: Vec<Task>,
    lane_id_counter: u64,
    task_id_counter: u64,
}

impl BoardSnapshot {
    /// Builds a snapshot after validating references and raising counters to
    /// the id floor.
    ///
    /// Missing counters are derived from the highest existing id.
    pub fn new(
        lanes: Vec<Lane>,
        tasks: Vec<Task>,
        lane_id_counter: Option<u64>,
        task_id_counter: Option<u64>,
    ) -> Result<Self, SnapshotError> {
        let mut lane_ids = HashSet::with_capacity(lanes.len());
        for lane in &lanes {
            if !lane_ids.insert(lane.id) {
                return Err(SnapshotError::DuplicateLaneId(lane.id));
            }
        }

        let mut task_ids = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !task_ids.insert(&task.id) {
                return Err(SnapshotError::DuplicateTaskId(task.id.clone()));
            }
            if !lane_ids.contains(&task.lane_id) {
                return Err(SnapshotError::UnknownLane {
                    task_id: task.id.clone(),
                    lane_id: task.lane_id,
                });
            }
            if task.title.trim().is_empty() {
                return Err(SnapshotError::EmptyTitle(task.id.clone()));
            }
            // The lane tail slot is `max(order) + 1`.
            if task.order.checked_add(1).is_none() {
                return Err(SnapshotError::CounterOverflow);
            }
        }

        let lane_floor = next_counter(lanes.iter().map(|lane| lane.id.value()))?;
        let task_floor = next_counter(tasks.iter().filter_map(|task| task.id.counter_value()))?;
        let lane_id_counter = lane_id_counter.unwrap_or(0).max(lane_floor);
        let task_id_counter = task_id_counter.unwrap_or(0).max(task_floor);
        // An empty lane list is refilled with the default lanes on load.
        let lanes_to_issue = if lanes.is_empty() {
            DEFAULT_LANE_NAMES.len() as u64
        } else {
            1
        };
        if lane_id_counter.checked_add(lanes_to_issue).is_none()
            || task_id_counter.checked_add(1).is_none()
        {
            return Err(SnapshotError::CounterOverflow);
        }

        Ok(Self {
            lane_id_counter,
            task_id_counter,
            lanes,
            tasks,
        })
    }

    /// Wraps parts exported from a live board, which already satisfy the
    /// snapshot invariants.
    pub(crate) fn from_parts(
        lanes: Vec<Lane>,
        tasks: Vec<Task>,
        lane_id_counter: u64,
        task_id_counter: u64,
    ) -> Self {
        Self {
            lanes,
            tasks,
            lane_id_counter,
            task_id_counter,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Lane>, Vec<Task>, u64, u64) {
        (
            self.lanes,
            self.tasks,
            self.lane_id_counter,
            self.task_id_counter,
        )
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn lane_id_counter(&self) -> u64 {
        self.lane_id_counter
    }

    pub fn task_id_counter(&self) -> u64 {
        self.task_id_counter
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes current and legacy payload shapes.
    pub fn from_json(payload: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// One past the highest issued value, or 0 when nothing was issued.
fn next_counter(values: impl Iterator<Item = u64>) -> Result<u64, SnapshotError> {
    match values.max() {
        Some(max) => max.checked_add(1).ok_or(SnapshotError::CounterOverflow),
        None => Ok(0),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLaneId {
    Number(u64),
    Text(String),
}

impl RawLaneId {
    fn normalize(self) -> Result<LaneId, SnapshotError> {
        match self {
            Self::Number(value) => Ok(LaneId::new(value)),
            Self::Text(value) => LaneId::parse(&value).ok_or(SnapshotError::InvalidLaneId(value)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawLane {
    id: RawLaneId,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    id: String,
    title: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(alias = "queueId")]
    lane_id: RawLaneId,
    #[serde(default)]
    order: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCounters {
    #[serde(default)]
    task: Option<u64>,
    #[serde(default)]
    queue: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default, alias = "queues")]
    lanes: Vec<RawLane>,
    #[serde(default)]
    tasks: Vec<RawTask>,
    #[serde(default, alias = "queueIdCounter")]
    lane_id_counter: Option<u64>,
    #[serde(default)]
    task_id_counter: Option<u64>,
    #[serde(default)]
    counters: Option<RawCounters>,
}

impl TryFrom<RawSnapshot> for BoardSnapshot {
    type Error = SnapshotError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        let lanes = raw
            .lanes
            .into_iter()
            .enumerate()
            .map(|(index, lane)| {
                let id = lane.id.normalize()?;
                let name = lane
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map_or_else(|| positional_lane_name(index), str::to_string);
                Ok(Lane::new(id, name))
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?;

        // Legacy rows without `order` take their index within the lane, in
        // source array order.
        let mut seen_per_lane: HashMap<LaneId, usize> = HashMap::new();
        let mut tasks = Vec::with_capacity(raw.tasks.len());
        for raw_task in raw.tasks {
            let id = TaskId::from_raw(raw_task.id);
            let lane_id = raw_task.lane_id.normalize()?;
            let position = seen_per_lane.entry(lane_id).or_insert(0);
            let order = raw_task.order.unwrap_or(*position);
            *position += 1;

            let title =
                normalize_title(&raw_task.title).ok_or_else(|| SnapshotError::EmptyTitle(id.clone()))?;
            tasks.push(Task {
                id,
                title,
                content: raw_task.content.unwrap_or_default(),
                lane_id,
                order,
            });
        }

        let counters = raw.counters.unwrap_or_default();
        Self::new(
            lanes,
            tasks,
            raw.lane_id_counter.or(counters.queue),
            raw.task_id_counter.or(counters.task),
        )
    }
}
