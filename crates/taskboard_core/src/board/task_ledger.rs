//! Task ledger: per-lane ordering and placement.
//!
//! # Responsibility
//! - Own task records and the task id counter.
//! - Keep each lane's `order` values unique, gap-free and zero-based across
//!   create, edit, delete, move, reorder and bulk relocation.
//!
//! # Invariants
//! - After any operation returns, every lane's orders form `0..count`
//!   (given contiguous input; sparse legacy lanes are never made worse).
//! - Failed operations perform no mutation: every precondition is checked
//!   before the first write.
//! - Lane ids are used opaquely; lane existence is the caller's concern.

use crate::model::lane::LaneId;
use crate::model::task::{normalize_title, Task, TaskId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from task ledger operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Referenced task does not exist.
    TaskNotFound(TaskId),
    /// Title is blank after trim.
    EmptyTitleRejected,
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::EmptyTitleRejected => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for TaskError {}

/// Task store with placement rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskLedger {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from already-validated parts.
    pub(crate) fn from_parts(tasks: Vec<Task>, next_id: u64) -> Self {
        Self { tasks, next_id }
    }

    /// Creates a task at the tail of `lane_id`.
    ///
    /// The tail slot is `max(order) + 1` rather than the lane count, so lanes
    /// carrying sparse legacy orders never receive a duplicate.
    pub fn create_task(
        &mut self,
        title: &str,
        content: &str,
        lane_id: LaneId,
    ) -> Result<Task, TaskError> {
        let title = normalize_title(title).ok_or(TaskError::EmptyTitleRejected)?;
        let order = self.tail_order(lane_id);
        let task = Task {
            id: self.issue_id(),
            title,
            content: content.to_string(),
            lane_id,
            order,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Replaces title and content in place. Placement is untouched.
    pub fn update_task(
        &mut self,
        task_id: &TaskId,
        title: &str,
        content: &str,
    ) -> Result<&Task, TaskError> {
        let index = self.index_of(task_id)?;
        let title = normalize_title(title).ok_or(TaskError::EmptyTitleRejected)?;
        let task = &mut self.tasks[index];
        task.title = title;
        task.content = content.to_string();
        Ok(task)
    }

    /// Removes one task and closes the gap it leaves in its lane.
    pub fn delete_task(&mut self, task_id: &TaskId) -> Result<Task, TaskError> {
        let index = self.index_of(task_id)?;
        let removed = self.tasks.remove(index);
        self.close_gap(removed.lane_id, removed.order);
        Ok(removed)
    }

    /// Moves one task to the tail of `target_lane_id`.
    ///
    /// Moving into the lane the task already occupies is a no-op.
    pub fn move_task_to_lane(
        &mut self,
        task_id: &TaskId,
        target_lane_id: LaneId,
    ) -> Result<&Task, TaskError> {
        let index = self.index_of(task_id)?;
        let (source_lane_id, old_order) = {
            let task = &self.tasks[index];
            (task.lane_id, task.order)
        };
        if source_lane_id == target_lane_id {
            return Ok(&self.tasks[index]);
        }

        let tail = self.tail_order(target_lane_id);
        self.close_gap(source_lane_id, old_order);

        let task = &mut self.tasks[index];
        task.lane_id = target_lane_id;
        task.order = tail;
        Ok(task)
    }

    /// Places one task at `new_order` inside its lane.
    ///
    /// When `target_lane_id` differs from the task's lane this behaves like
    /// [`TaskLedger::move_task_to_lane`] and `new_order` is ignored: the task
    /// lands at the target tail. A `new_order` past the tail is clamped to the
    /// last index.
    pub fn reorder_task(
        &mut self,
        task_id: &TaskId,
        target_lane_id: LaneId,
        new_order: usize,
    ) -> Result<&Task, TaskError> {
        let index = self.index_of(task_id)?;
        let (lane_id, old_order) = {
            let task = &self.tasks[index];
            (task.lane_id, task.order)
        };
        if lane_id != target_lane_id {
            return self.move_task_to_lane(task_id, target_lane_id);
        }

        let last_index = self.lane_len(lane_id).saturating_sub(1);
        let new_order = new_order.min(last_index);
        if new_order == old_order {
            return Ok(&self.tasks[index]);
        }

        for (position, task) in self.tasks.iter_mut().enumerate() {
            if position == index || task.lane_id != lane_id {
                continue;
            }
            if new_order > old_order {
                if task.order > old_order && task.order <= new_order {
                    task.order -= 1;
                }
            } else if task.order >= new_order && task.order < old_order {
                task.order += 1;
            }
        }

        let task = &mut self.tasks[index];
        task.order = new_order;
        Ok(task)
    }

    /// Moves every task of `source_lane_id` to the tail of `target_lane_id`.
    ///
    /// Relocated tasks keep their relative order and continue from the
    /// target's task count; tasks already in the target are not renumbered.
    /// Returns relocated ids in their new order.
    pub fn relocate_all_tasks(
        &mut self,
        source_lane_id: LaneId,
        target_lane_id: LaneId,
    ) -> Vec<TaskId> {
        if source_lane_id == target_lane_id {
            return Vec::new();
        }

        let mut next_order = self.lane_len(target_lane_id);
        let mut indices: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.lane_id == source_lane_id)
            .map(|(index, _)| index)
            .collect();
        indices.sort_by_key(|index| self.tasks[*index].order);

        let mut relocated = Vec::with_capacity(indices.len());
        for index in indices {
            let task = &mut self.tasks[index];
            task.lane_id = target_lane_id;
            task.order = next_order;
            next_order += 1;
            relocated.push(task.id.clone());
        }
        relocated
    }

    /// Returns the tasks of one lane sorted by ascending `order`.
    pub fn get_tasks_by_lane(&self, lane_id: LaneId) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.lane_id == lane_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.order);
        tasks
    }

    pub fn get_task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == task_id)
    }

    /// Number of tasks currently in one lane.
    pub fn lane_len(&self, lane_id: LaneId) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.lane_id == lane_id)
            .count()
    }

    /// All tasks in storage order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Next counter value the ledger will issue.
    pub fn task_id_counter(&self) -> u64 {
        self.next_id
    }

    fn issue_id(&mut self) -> TaskId {
        let id = TaskId::from_counter(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    fn index_of(&self, task_id: &TaskId) -> Result<usize, TaskError> {
        self.tasks
            .iter()
            .position(|task| &task.id == task_id)
            .ok_or_else(|| TaskError::TaskNotFound(task_id.clone()))
    }

    fn tail_order(&self, lane_id: LaneId) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.lane_id == lane_id)
            .map(|task| task.order)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    // Only entries above the vacated slot shift, so no re-sort is needed.
    fn close_gap(&mut self, lane_id: LaneId, vacated_order: usize) {
        for task in &mut self.tasks {
            if task.lane_id == lane_id && task.order > vacated_order {
                task.order -= 1;
            }
        }
    }
}
