//! BulkTag command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::types::{TagId, TaskId, TaskPatch};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

/// Whether the bulk operation adds or strips the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagAction {
    Add,
    Remove,
}

/// Add or remove one tag across the selected tasks. Idempotent per task:
/// a task that already carries (or lacks) the tag counts as applied
/// without a remote round trip, so retrying after a partial failure only
/// touches the tasks that still need the change.
#[derive(Debug, Deserialize)]
pub struct BulkTag {
    pub ids: Vec<TaskId>,
    pub tag: TagId,
    pub action: TagAction,
}

impl BulkTag {
    pub fn new(
        ids: impl IntoIterator<Item = TaskId>,
        tag: impl Into<TagId>,
        action: TagAction,
    ) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            tag: tag.into(),
            action,
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for BulkTag {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if self.ids.is_empty() {
            return Ok(json!({ "applied": 0, "attempted": 0 }));
        }

        let mut state = ctx.state().await;
        if !state.tags.iter().any(|t| t.id == self.tag) {
            return Err(BoardError::TagNotFound {
                id: self.tag.to_string(),
            });
        }
        for id in &self.ids {
            state.tasks.require(id)?;
        }

        let mut saved = Vec::with_capacity(self.ids.len());
        let mut pending = Vec::new();
        for id in &self.ids {
            let before = state.tasks.get(id).expect("existence checked above").clone();
            let task = state.tasks.get_mut(id).expect("existence checked above");
            let changed = match self.action {
                TagAction::Add => task.tags.insert(self.tag.clone()),
                TagAction::Remove => task.tags.remove(&self.tag),
            };
            if changed {
                pending.push((id.clone(), task.tags.clone()));
            }
            saved.push(before);
        }
        drop(state);

        let remote = ctx.remote();
        let outcomes = join_all(pending.into_iter().map(|(id, tags)| {
            let remote = remote.clone();
            async move {
                let result = remote.update_task(&id, &TaskPatch::tags(tags)).await;
                (id, result)
            }
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
                "tag": self.tag,
            }))
        } else {
            warn!(failed = failed.len(), attempted, "bulk tag partially failed");
            state.selection.replace(failed.iter().cloned());
            Err(BoardError::PartialBulk {
                applied,
                attempted,
                failed,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::AddTag;
    use crate::test_support::board_context_with_tasks;
    use crate::types::Task;

    async fn tagged_board() -> (
        crate::context::BoardContext,
        std::sync::Arc<crate::test_support::InMemoryRemote>,
        Vec<TaskId>,
        TagId,
    ) {
        let tasks: Vec<Task> = (0..3).map(|i| Task::new(format!("T{i}"), "todo", i)).collect();
        let ids: Vec<TaskId> = tasks.iter().map(|t| t.id.clone()).collect();
        let (ctx, remote) = board_context_with_tasks(tasks).await;
        let created = AddTag::new("urgent").execute(&ctx).await.unwrap();
        let tag = TagId::from_string(created["id"].as_str().unwrap());
        (ctx, remote, ids, tag)
    }

    #[tokio::test]
    async fn test_add_tag_to_all() {
        let (ctx, _remote, ids, tag) = tagged_board().await;

        let result = BulkTag::new(ids.clone(), tag.clone(), TagAction::Add)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["applied"], 3);

        let state = ctx.snapshot().await;
        for id in &ids {
            assert!(state.tasks.get(id).unwrap().tags.contains(&tag));
        }
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let (ctx, _remote, ids, tag) = tagged_board().await;

        BulkTag::new(ids.clone(), tag.clone(), TagAction::Add)
            .execute(&ctx)
            .await
            .unwrap();
        // Second pass changes nothing remotely but still reports success
        let result = BulkTag::new(ids.clone(), tag.clone(), TagAction::Add)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["applied"], 3);

        let state = ctx.snapshot().await;
        for id in &ids {
            assert_eq!(state.tasks.get(id).unwrap().tags.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_remove_tag() {
        let (ctx, _remote, ids, tag) = tagged_board().await;
        BulkTag::new(ids.clone(), tag.clone(), TagAction::Add)
            .execute(&ctx)
            .await
            .unwrap();

        BulkTag::new(ids.clone(), tag.clone(), TagAction::Remove)
            .execute(&ctx)
            .await
            .unwrap();

        let state = ctx.snapshot().await;
        for id in &ids {
            assert!(state.tasks.get(id).unwrap().tags.is_empty());
        }
    }

    #[tokio::test]
    async fn test_partial_failure_narrows_selection() {
        let (ctx, remote, ids, tag) = tagged_board().await;
        let unlucky = ids[1].clone();
        remote.fail_for_task(&unlucky);

        let result = BulkTag::new(ids.clone(), tag.clone(), TagAction::Add)
            .execute(&ctx)
            .await;
        match result {
            Err(BoardError::PartialBulk { applied, failed, .. }) => {
                assert_eq!(applied, 2);
                assert_eq!(failed, vec![unlucky.clone()]);
            }
            other => panic!("expected PartialBulk, got {other:?}"),
        }

        let state = ctx.snapshot().await;
        assert!(!state.tasks.get(&unlucky).unwrap().tags.contains(&tag));
        assert_eq!(state.selection.ids(), vec![unlucky]);
    }

    #[tokio::test]
    async fn test_unknown_tag_rejected() {
        let tasks = vec![Task::new("T", "todo", 0)];
        let ids = vec![tasks[0].id.clone()];
        let (ctx, _remote) = board_context_with_tasks(tasks).await;

        let result = BulkTag::new(ids, "missing", TagAction::Add).execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::TagNotFound { .. })));
    }
}
