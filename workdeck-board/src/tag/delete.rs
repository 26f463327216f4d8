//! DeleteTag command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::sync::PendingMutation;
use crate::types::TagId;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Delete a tag, removing the reference from every task that carries it.
#[derive(Debug, Deserialize)]
pub struct DeleteTag {
    /// The tag to delete
    pub id: TagId,
}

impl DeleteTag {
    pub fn new(id: impl Into<TagId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteTag {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut state = ctx.state().await;
        if !state.tags.iter().any(|t| t.id == self.id) {
            return Err(BoardError::TagNotFound {
                id: self.id.to_string(),
            });
        }

        let pending = PendingMutation::begin(&*state);
        state.tags.retain(|t| t.id != self.id);
        let stripped = state.tasks.remove_tag_refs(&self.id);
        drop(state);

        // The server strips task references from the one request.
        if let Err(err) = ctx.remote().delete_tag(&self.id).await {
            debug!(tag = %self.id, %err, "delete_tag rejected, rolling back");
            pending.rollback(&mut *ctx.state().await);
            return Err(err.into());
        }
        pending.commit();

        Ok(serde_json::json!({
            "deleted": true,
            "id": self.id.to_string(),
            "stripped_from": stripped.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulk::{BulkTag, TagAction};
    use crate::tag::AddTag;
    use crate::task::AddTask;
    use crate::test_support::board_context;
    use crate::types::TaskId;

    #[tokio::test]
    async fn test_delete_strips_references() {
        let (ctx, _remote) = board_context().await;
        let tag = AddTag::new("bug").execute(&ctx).await.unwrap();
        let tag_id = TagId::from_string(tag["id"].as_str().unwrap());
        let task = AddTask::new("Task").execute(&ctx).await.unwrap();
        let task_id = TaskId::from_string(task["id"].as_str().unwrap());

        BulkTag::new(vec![task_id.clone()], tag_id.clone(), TagAction::Add)
            .execute(&ctx)
            .await
            .unwrap();

        let result = DeleteTag::new(tag_id).execute(&ctx).await.unwrap();
        assert_eq!(result["stripped_from"], 1);

        let state = ctx.snapshot().await;
        assert!(state.tags.is_empty());
        assert!(state.tasks.get(&task_id).unwrap().tags.is_empty());
    }

    #[tokio::test]
    async fn test_remote_rejection_restores_references() {
        let (ctx, remote) = board_context().await;
        let tag = AddTag::new("bug").execute(&ctx).await.unwrap();
        let tag_id = TagId::from_string(tag["id"].as_str().unwrap());

        remote.fail_on("delete_tag");
        let result = DeleteTag::new(tag_id).execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::Remote(_))));
        assert_eq!(ctx.snapshot().await.tags.len(), 1);
    }
}
