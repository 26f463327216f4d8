//! BulkSetStatus command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::types::{ScopeLevel, StatusId, TaskId, TaskPatch};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Move every selected task to one status. Each task gets its own remote
/// request; the requests run concurrently and every outcome is awaited
/// before the result is reported. Tasks whose request fails are reverted
/// and the selection narrows to exactly those, so a retry hits only them.
#[derive(Debug, Deserialize)]
pub struct BulkSetStatus {
    /// Tasks to move
    pub ids: Vec<TaskId>,
    /// Destination status
    pub status: StatusId,
}

impl BulkSetStatus {
    pub fn new(ids: impl IntoIterator<Item = TaskId>, status: impl Into<StatusId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            status: status.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for BulkSetStatus {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if self.ids.is_empty() {
            return Ok(json!({ "applied": 0, "attempted": 0 }));
        }

        let mut state = ctx.state().await;
        if !state.registry.contains(ScopeLevel::List, &self.status) {
            return Err(BoardError::StatusNotFound {
                id: self.status.to_string(),
            });
        }
        for id in &self.ids {
            state.tasks.require(id)?;
        }

        // Apply everything locally up front, remembering the pre-state of
        // each task so a failed request can be reverted on its own.
        let mut saved = Vec::with_capacity(self.ids.len());
        let mut pending = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            let before = state.tasks.get(id).expect("existence checked above").clone();
            if before.status_id != self.status {
                let order = state.tasks.next_order(&self.status);
                let task = state.tasks.get_mut(id).expect("existence checked above");
                task.status_id = self.status.clone();
                task.order = order;
                pending.push(id.clone());
            }
            saved.push(before);
        }
        drop(state);

        debug!(
            count = pending.len(),
            status = %self.status,
            "bulk status change dispatching"
        );

        let remote = ctx.remote();
        let outcomes = join_all(pending.iter().map(|id| {
            let remote = remote.clone();
            let patch = TaskPatch::status(self.status.clone());
            async move { (id.clone(), remote.update_task(id, &patch).await) }
        }))
        .await;

        let failed: Vec<TaskId> = outcomes
            .into_iter()
            .filter_map(|(id, result)| result.err().map(|_| id))
            .collect();

        let attempted = self.ids.len();
        let applied = attempted - failed.len();

        let mut state = ctx.state().await;
        for before in saved {
            if failed.contains(&before.id) {
                state.tasks.insert(before);
            }
        }
        if failed.is_empty() {
            Ok(json!({
                "applied": applied,
                "attempted": attempted,
                "status": self.status,
            }))
        } else {
            warn!(
                failed = failed.len(),
                attempted, "bulk status change partially failed"
            );
            state.selection.replace(failed.iter().cloned());
            Err(BoardError::PartialBulk {
                applied,
                attempted,
                failed,
            })
        }
    }
}
