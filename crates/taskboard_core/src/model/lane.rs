//! Lane domain model.
//!
//! # Responsibility
//! - Define the priority bucket record owned by the lane registry.
//! - Provide the canonical lane identifier used by every other component.
//!
//! # Invariants
//! - `LaneId` values come from a monotonic counter and are never reused.
//! - Lane position in the registry is its priority (index 0 = highest).

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Stable lane identifier.
///
/// Persisted data may carry lane ids as numbers or numeric strings; both are
/// normalized to this type when a snapshot is imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LaneId(u64);

impl LaneId {
    /// Wraps a raw counter value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Parses the textual id form found in legacy payloads.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<u64>().ok().map(Self)
    }
}

impl Display for LaneId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for LaneId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Ordered priority bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lane {
    pub id: LaneId,
    /// User-facing label. Never blank once stored.
    pub name: String,
}

impl Lane {
    pub fn new(id: LaneId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Positional fallback label for a lane at zero-based `index`.
pub fn positional_lane_name(index: usize) -> String {
    format!("Lane {}", index + 1)
}
