//! DeleteTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::sync::PendingMutation;
use crate::types::TaskId;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Delete a task, cascading to its subtasks.
#[derive(Debug, Deserialize)]
pub struct DeleteTask {
    /// The task to delete
    pub id: TaskId,
}

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut state = ctx.state().await;
        state.tasks.require(&self.id)?;

        let pending = PendingMutation::begin(&*state);
        let removed = state.tasks.remove_with_subtasks(&self.id);
        for id in &removed {
            state.selection.remove(id);
        }
        drop(state);

        // The server cascades subtask deletion from the one request.
        if let Err(err) = ctx.remote().delete_task(&self.id).await {
            debug!(task = %self.id, %err, "delete_task rejected, rolling back");
            pending.rollback(&mut *ctx.state().await);
            return Err(err.into());
        }
        pending.commit();

        Ok(serde_json::json!({
            "deleted": true,
            "id": self.id.to_string(),
            "cascaded": removed.len() - 1,
        }))
    }
}
