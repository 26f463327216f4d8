//! MoveTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::ordering::{apply_move, resolve_drop, DropTarget, MoveTarget};
use crate::sync::PendingMutation;
use crate::types::{ScopeLevel, StatusId, TaskId, TaskPatch};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Where a move is headed: a raw drop target from a drag gesture, or an
/// explicit `(status, index)` destination from the keyboard/API surface.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Drop(DropTarget),
    At(MoveTarget),
}

/// Move a task to a new position and/or status group, optimistically, with
/// the remote reorder protocol behind it.
#[derive(Debug, Deserialize)]
pub struct MoveTask {
    /// The task to move
    pub id: TaskId,
    /// Where it goes
    pub destination: Destination,
}

impl MoveTask {
    /// Drag ended on another task.
    pub fn drop_on_task(id: impl Into<TaskId>, on: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            destination: Destination::Drop(DropTarget::Task(on.into())),
        }
    }

    /// Drag ended on a column body: append to that status group.
    pub fn drop_on_column(id: impl Into<TaskId>, status: impl Into<StatusId>) -> Self {
        Self {
            id: id.into(),
            destination: Destination::Drop(DropTarget::Column(status.into())),
        }
    }

    /// Move to an explicit index within a status group.
    pub fn to_index(id: impl Into<TaskId>, status: impl Into<StatusId>, index: usize) -> Self {
        Self {
            id: id.into(),
            destination: Destination::At(MoveTarget {
                status: status.into(),
                index,
            }),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for MoveTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut state = ctx.state().await;

        let target = match &self.destination {
            Destination::Drop(drop_target) => {
                match resolve_drop(&state.tasks, &self.id, drop_target)? {
                    Some(target) => target,
                    // Dropped on itself
                    None => return Ok(serde_json::json!({ "moved": false })),
                }
            }
            Destination::At(target) => {
                state.tasks.require(&self.id)?;
                target.clone()
            }
        };
        if !state.registry.contains(ScopeLevel::List, &target.status) {
            return Err(BoardError::StatusNotFound {
                id: target.status.to_string(),
            });
        }

        let pending = PendingMutation::begin(&*state);
        let outcome = apply_move(&mut state.tasks, &self.id, &target)?;
        let moved = state
            .tasks
            .require(&self.id)?
            .clone();
        drop(state);

        let list = ctx.scope().list.clone();
        let remote = ctx.remote();

        // Cross-column moves are two coordinated requests: the status
        // update, then the group reorder. Same-column reorders are one.
        if outcome.status_changed {
            let patch = TaskPatch::status(target.status.clone());
            if let Err(err) = remote.update_task(&self.id, &patch).await {
                // First step failed: the server saw nothing, rollback alone
                // restores agreement.
                debug!(task = %self.id, %err, "status update rejected, rolling back");
                pending.rollback(&mut *ctx.state().await);
                return Err(err.into());
            }
        }
        if let Err(err) = remote
            .reorder(&list, &target.status, &outcome.target_order)
            .await
        {
            // After a successful status update, partial success cannot be
            // reasoned about locally: roll back and resynchronize.
            if outcome.status_changed {
                warn!(task = %self.id, %err, "reorder failed after status update, refetching");
                pending.rollback(&mut *ctx.state().await);
                ctx.refetch_after_failure().await;
            } else {
                debug!(task = %self.id, %err, "reorder rejected, rolling back");
                pending.rollback(&mut *ctx.state().await);
            }
            return Err(err.into());
        }
        pending.commit();

        Ok(serde_json::json!({
            "moved": true,
            "status_changed": outcome.status_changed,
            "task": moved,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::board_context_with_tasks;
    use crate::types::Task;

    fn task(id: &str, status: &str, order: usize) -> Task {
        let mut t = Task::new(id.to_uppercase(), status, order);
        t.id = TaskId::from_string(id);
        t
    }

    async fn board() -> (crate::BoardContext, std::sync::Arc<crate::test_support::InMemoryRemote>)
    {
        board_context_with_tasks(vec![
            task("a", "todo", 0),
            task("b", "todo", 1),
            task("x", "in-progress", 0),
        ])
        .await
    }

    #[tokio::test]
    async fn test_drag_to_other_column_head() {
        // Statuses [todo, in-progress, complete]; A at todo:0, B at todo:1.
        // Drag A onto in-progress at index 0.
        let (ctx, _remote) = board().await;

        let result = MoveTask::to_index("a", "in-progress", 0)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["moved"], true);
        assert_eq!(result["status_changed"], true);
        assert_eq!(result["task"]["status_id"], "in-progress");
        assert_eq!(result["task"]["order"], 0);

        let state = ctx.snapshot().await;
        // B unaffected
        let b = state.tasks.get(&TaskId::from_string("b")).unwrap();
        assert_eq!(b.status_id.as_str(), "todo");
        assert_eq!(b.order, 1);
        // Pre-existing occupant shifted by +1
        let x = state.tasks.get(&TaskId::from_string("x")).unwrap();
        assert_eq!(x.order, 1);
    }

    #[tokio::test]
    async fn test_drop_on_task_lands_at_its_index() {
        let (ctx, _remote) = board().await;

        MoveTask::drop_on_task("b", "a").execute(&ctx).await.unwrap();
        let state = ctx.snapshot().await;
        let ids: Vec<String> = state
            .tasks
            .group_ids(&StatusId::from_string("todo"))
            .iter()
            .map(|i| i.to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_drop_on_self_is_noop() {
        let (ctx, remote) = board().await;

        let result = MoveTask::drop_on_task("a", "a").execute(&ctx).await.unwrap();
        assert_eq!(result["moved"], false);
        assert!(!remote.calls().iter().any(|c| c.starts_with("reorder")));
    }

    #[tokio::test]
    async fn test_reorder_failure_restores_snapshot_exactly() {
        let (ctx, remote) = board().await;
        let before = ctx.snapshot().await;
        remote.fail_on("reorder");

        let result = MoveTask::to_index("b", "todo", 0).execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::Remote(_))));

        let after = ctx.snapshot().await;
        assert_eq!(after.tasks, before.tasks);
        // Same-column failure does not force a refetch
        assert_eq!(
            remote
                .calls()
                .iter()
                .filter(|c| c.starts_with("fetch_tasks"))
                .count(),
            0
        );
    }

    #[tokio::test]
    async fn test_cross_column_reorder_failure_refetches() {
        let (ctx, remote) = board().await;
        remote.fail_on("reorder");

        let result = MoveTask::to_index("a", "in-progress", 0).execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::Remote(_))));

        // Rolled back, then replaced with server truth
        assert!(remote.calls().iter().any(|c| c.starts_with("fetch_tasks")));
        let state = ctx.snapshot().await;
        // The fake applied the status update server-side before the
        // reorder failed, so the refetched truth has A in in-progress.
        let a = state.tasks.get(&TaskId::from_string("a")).unwrap();
        assert_eq!(a.status_id.as_str(), "in-progress");
    }

    #[tokio::test]
    async fn test_move_to_unknown_status_rejected() {
        let (ctx, _remote) = board().await;
        let result = MoveTask::to_index("a", "bogus", 0).execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::StatusNotFound { .. })));
    }
}
