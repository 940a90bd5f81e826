//! Lane registry: the ordered priority ladder.
//!
//! # Responsibility
//! - Own lane records and the lane id counter.
//! - Provide append, tail removal, rename and lookup operations.
//!
//! # Invariants
//! - Registry order is priority order (index 0 = highest).
//! - At least one lane remains once the registry is initialized.
//! - Only the tail lane can be removed.
//! - Lane ids are issued from `next_id` and never reused.

use crate::model::lane::{positional_lane_name, Lane, LaneId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Names of the lanes created for a fresh board, highest priority first.
pub const DEFAULT_LANE_NAMES: [&str; 3] = ["High", "Medium", "Low"];

/// Errors from lane registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneError {
    /// Referenced lane does not exist.
    LaneNotFound(LaneId),
    /// Removing the only remaining lane is refused.
    LastLaneProtected,
}

impl Display for LaneError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LaneNotFound(id) => write!(f, "lane not found: {id}"),
            Self::LastLaneProtected => write!(f, "the last remaining lane cannot be removed"),
        }
    }
}

impl Error for LaneError {}

/// Outcome of removing the tail lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneRemoval {
    pub removed_lane: Lane,
    /// New tail lane; orphaned tasks must be relocated here.
    pub fallback_lane_id: LaneId,
}

/// Ordered lane store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneRegistry {
    lanes: Vec<Lane>,
    next_id: u64,
}

impl Default for LaneRegistry {
    fn default() -> Self {
        Self::with_default_lanes()
    }
}

impl LaneRegistry {
    /// Creates a registry holding the default high/medium/low lanes.
    pub fn with_default_lanes() -> Self {
        let mut registry = Self {
            lanes: Vec::with_capacity(DEFAULT_LANE_NAMES.len()),
            next_id: 0,
        };
        registry.push_default_lanes();
        registry
    }

    /// Rebuilds a registry from already-validated parts.
    ///
    /// An empty `lanes` input is refilled with the default lanes so the lane
    /// floor holds; their ids continue from `next_id`.
    pub(crate) fn from_parts(lanes: Vec<Lane>, next_id: u64) -> Self {
        let mut registry = Self { lanes, next_id };
        if registry.lanes.is_empty() {
            registry.push_default_lanes();
        }
        registry
    }

    fn push_default_lanes(&mut self) {
        for name in DEFAULT_LANE_NAMES {
            let id = self.issue_id();
            self.lanes.push(Lane::new(id, name));
        }
    }

    fn issue_id(&mut self) -> LaneId {
        let id = LaneId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Appends a new lowest-priority lane named `Lane {n}`.
    pub fn add_lane(&mut self) -> Lane {
        let id = self.issue_id();
        let lane = Lane::new(id, positional_lane_name(self.lanes.len()));
        self.lanes.push(lane.clone());
        lane
    }

    /// Removes the tail lane and reports the lane that now takes its tasks.
    pub fn remove_last_lane(&mut self) -> Result<LaneRemoval, LaneError> {
        if self.lanes.len() <= 1 {
            return Err(LaneError::LastLaneProtected);
        }
        let removed_lane = self.lanes.pop().ok_or(LaneError::LastLaneProtected)?;
        let fallback_lane_id = self
            .lanes
            .last()
            .map(|lane| lane.id)
            .ok_or(LaneError::LastLaneProtected)?;
        Ok(LaneRemoval {
            removed_lane,
            fallback_lane_id,
        })
    }

    /// Renames one lane and returns the stored name.
    ///
    /// A blank name falls back to the lane's positional default at the time
    /// of the rename.
    pub fn rename_lane(&mut self, lane_id: LaneId, new_name: &str) -> Result<String, LaneError> {
        let index = self
            .position(lane_id)
            .ok_or(LaneError::LaneNotFound(lane_id))?;
        let trimmed = new_name.trim();
        let name = if trimmed.is_empty() {
            positional_lane_name(index)
        } else {
            trimmed.to_string()
        };
        self.lanes[index].name = name.clone();
        Ok(name)
    }

    pub fn find_lane(&self, lane_id: LaneId) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.id == lane_id)
    }

    pub fn has_lane(&self, lane_id: LaneId) -> bool {
        self.find_lane(lane_id).is_some()
    }

    /// Zero-based priority index of one lane.
    pub fn position(&self, lane_id: LaneId) -> Option<usize> {
        self.lanes.iter().position(|lane| lane.id == lane_id)
    }

    /// Returns an owned copy of all lanes in priority order.
    pub fn list_lanes(&self) -> Vec<Lane> {
        self.lanes.clone()
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// First lane in priority order. The lane floor keeps index 0 occupied.
    pub fn highest_priority_lane_id(&self) -> LaneId {
        self.lanes[0].id
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Next id the registry will issue.
    pub fn lane_id_counter(&self) -> u64 {
        self.next_id
    }
}
