//! Task domain model.
//!
//! # Responsibility
//! - Define the task record owned by the task ledger.
//! - Map between counter values and the `task-{n}` identifier form.
//!
//! # Invariants
//! - `id` is stable and never reissued by the same ledger.
//! - `title` is non-blank and stored trimmed.
//! - `order` is the zero-based rank within `lane_id`.

use crate::model::lane::LaneId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt::{Display, Formatter};

const TASK_ID_PREFIX: &str = "task-";

static TASK_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^task-(\d+)$").expect("valid task id regex"));

/// Stable task identifier in `task-{counter}` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Builds the id issued for counter value `value`.
    pub fn from_counter(value: u64) -> Self {
        Self(format!("{TASK_ID_PREFIX}{value}"))
    }

    /// Wraps an id read from persisted data without reformatting it.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the counter value encoded in this id, if it has the
    /// `task-{n}` shape.
    pub fn counter_value(&self) -> Option<u64> {
        TASK_ID_RE
            .captures(self.0.as_str())
            .and_then(|captures| captures.get(1))
            .and_then(|digits| digits.as_str().parse::<u64>().ok())
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Optional free-text body; empty when unset.
    pub content: String,
    pub lane_id: LaneId,
    pub order: usize,
}

/// Trims `title` and rejects it when nothing remains.
pub(crate) fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
