//! SetCustomStatuses command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::sync::PendingMutation;
use crate::types::{ScopeLevel, Status};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Replace a scope's status set atomically and mark it custom. Statuses
/// are renumbered 0..N-1 in submitted order.
#[derive(Debug, Deserialize)]
pub struct SetCustomStatuses {
    /// The scope level to customize
    pub level: ScopeLevel,
    /// The new set, in display order
    pub statuses: Vec<Status>,
}

impl SetCustomStatuses {
    pub fn new(level: ScopeLevel, statuses: Vec<Status>) -> Self {
        Self { level, statuses }
    }

    /// Append a status to the submitted set.
    pub fn with_status(mut self, status: Status) -> Self {
        self.statuses.push(status);
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for SetCustomStatuses {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if self.statuses.is_empty() {
            return Err(BoardError::EmptySet);
        }
        for status in &self.statuses {
            if status.name.trim().is_empty() {
                return Err(BoardError::empty_name("status name"));
            }
        }

        let mut state = ctx.state().await;
        let pending = PendingMutation::begin(&*state);
        state.registry.set_custom(self.level, self.statuses.clone());
        let effective = state.registry.resolve(self.level);
        drop(state);

        let scope = ctx.scope().at(self.level);
        if let Err(err) = ctx
            .remote()
            .put_statuses(&scope, &effective.statuses)
            .await
        {
            debug!(%scope, %err, "put_statuses rejected, rolling back");
            pending.rollback(&mut *ctx.state().await);
            return Err(err.into());
        }
        pending.commit();

        Ok(serde_json::to_value(&effective)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ResolveStatuses;
    use crate::test_support::board_context;

    fn named(names: &[&str]) -> Vec<Status> {
        names.iter().map(|n| Status::new(*n)).collect()
    }

    #[tokio::test]
    async fn test_set_custom_round_trip() {
        let (ctx, _remote) = board_context().await;

        let submitted = named(&["Triage", "Fixing", "Shipped"]);
        let result = SetCustomStatuses::new(ScopeLevel::List, submitted.clone())
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["is_custom"], true);

        // Resolve returns the same statuses, renumbered, marked custom
        let resolved = ResolveStatuses::new(ScopeLevel::List)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(resolved["is_custom"], true);
        let statuses = resolved["statuses"].as_array().unwrap();
        assert_eq!(statuses.len(), 3);
        for (i, (got, sent)) in statuses.iter().zip(&submitted).enumerate() {
            assert_eq!(got["id"], sent.id.as_str());
            assert_eq!(got["order"], i);
        }
    }

    #[tokio::test]
    async fn test_empty_set_rejected() {
        let (ctx, remote) = board_context().await;

        let result = SetCustomStatuses::new(ScopeLevel::List, Vec::new())
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::EmptySet)));
        // Validation failures never reach the remote
        assert!(!remote.calls().iter().any(|c| c.starts_with("put_statuses")));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (ctx, _remote) = board_context().await;

        let result = SetCustomStatuses::new(ScopeLevel::List, named(&["Ok", "  "]))
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::EmptyName { .. })));
    }

    #[tokio::test]
    async fn test_remote_rejection_rolls_back() {
        let (ctx, remote) = board_context().await;
        remote.fail_on("put_statuses");

        let result = SetCustomStatuses::new(ScopeLevel::List, named(&["Only"]))
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::Remote(_))));

        // Registry still resolves to the inherited workspace set
        let resolved = ResolveStatuses::new(ScopeLevel::List)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(resolved["is_custom"], false);
        assert_eq!(resolved["statuses"].as_array().unwrap().len(), 3);
    }
}
