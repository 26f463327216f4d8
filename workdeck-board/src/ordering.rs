//! Ordering engine: turns a drag interaction into order/status mutations.
//!
//! Works in two steps. `resolve_drop` maps the drop target (another task or
//! a column) to a concrete `(status, index)` destination; `apply_move`
//! mutates the store. Same-group reorders renumber the whole group 0..N-1;
//! cross-group moves insert at the index and renumber the target group,
//! leaving the source group's relative order untouched. Date-grouped Gantt
//! lanes reuse this logic with the lane standing in for the column; status
//! remains the only persisted grouping key.

use crate::error::{BoardError, Result};
use crate::store::TaskStore;
use crate::types::{StatusId, TaskId};
use serde::{Deserialize, Serialize};

/// What the dragged task was dropped on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropTarget {
    /// Dropped on another task: insert at that task's position in its group.
    Task(TaskId),
    /// Dropped on a column body: append to that status group.
    Column(StatusId),
}

/// A concrete move destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTarget {
    pub status: StatusId,
    pub index: usize,
}

/// What a move changed, for the sync controller's remote calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub status_changed: bool,
    pub source_status: StatusId,
    pub target: MoveTarget,
    /// Ordered ids of the target group after the move.
    pub target_order: Vec<TaskId>,
}

/// Resolve a drop target to a `(status, index)` destination.
///
/// Returns `Ok(None)` for the no-op guard: dropping a task on itself.
pub fn resolve_drop(
    store: &TaskStore,
    dragged: &TaskId,
    target: &DropTarget,
) -> Result<Option<MoveTarget>> {
    store.require(dragged)?;

    match target {
        DropTarget::Task(on) => {
            if on == dragged {
                return Ok(None);
            }
            let on_task = store.require(on)?;
            let status = on_task.status_id.clone();
            let index = store
                .group(&status)
                .iter()
                .position(|t| &t.id == on)
                .ok_or_else(|| {
                    BoardError::invalid_target(format!("task {on} is not in a top-level group"))
                })?;
            Ok(Some(MoveTarget { status, index }))
        }
        DropTarget::Column(status) => {
            let index = store.group(status).len();
            Ok(Some(MoveTarget {
                status: status.clone(),
                index,
            }))
        }
    }
}

/// Apply a move to the store and report what changed.
///
/// Subtasks cannot be moved through the ordering engine; they are excluded
/// from top-level ordering.
pub fn apply_move(
    store: &mut TaskStore,
    dragged: &TaskId,
    target: &MoveTarget,
) -> Result<MoveOutcome> {
    let task = store.require(dragged)?;
    if task.is_subtask() {
        return Err(BoardError::invalid_target(format!(
            "task {dragged} is a subtask and cannot be reordered"
        )));
    }
    let source_status = task.status_id.clone();

    if source_status == target.status {
        reorder_within(store, dragged, &target.status, target.index);
    } else {
        move_across(store, dragged, target);
    }

    Ok(MoveOutcome {
        status_changed: source_status != target.status,
        source_status,
        target: target.clone(),
        target_order: store.group_ids(&target.status),
    })
}

/// Pure reorder: remove from the current index, reinsert at the target
/// index, renumber the whole group 0..N-1.
fn reorder_within(store: &mut TaskStore, dragged: &TaskId, status: &StatusId, index: usize) {
    let mut ids = store.group_ids(status);
    ids.retain(|id| id != dragged);
    let index = index.min(ids.len());
    ids.insert(index, dragged.clone());
    for (i, id) in ids.iter().enumerate() {
        if let Some(task) = store.get_mut(id) {
            task.order = i;
        }
    }
}

/// Cross-group move: change status, insert at the index, renumber the
/// whole target group 0..N-1. Renumbering keeps orders unique even when
/// earlier moves out of the group left gaps in its numbering. The source
/// group keeps relative order (gaps there are legal).
fn move_across(store: &mut TaskStore, dragged: &TaskId, target: &MoveTarget) {
    let mut ids = store.group_ids(&target.status);
    let index = target.index.min(ids.len());
    ids.insert(index, dragged.clone());

    if let Some(task) = store.get_mut(dragged) {
        task.status_id = target.status.clone();
    }
    for (i, id) in ids.iter().enumerate() {
        if let Some(task) = store.get_mut(id) {
            task.order = i;
        }
    }
}
