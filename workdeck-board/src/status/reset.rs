//! ResetStatuses command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::sync::PendingMutation;
use crate::types::ScopeLevel;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Delete a scope's custom status set and fall back to inheritance.
/// Returns the now-effective inherited set.
#[derive(Debug, Deserialize)]
pub struct ResetStatuses {
    /// The scope level to reset
    pub level: ScopeLevel,
}

impl ResetStatuses {
    pub fn new(level: ScopeLevel) -> Self {
        Self { level }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ResetStatuses {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if self.level == ScopeLevel::Workspace {
            return Err(BoardError::InvalidScope {
                level: self.level,
                action: "reset to an inherited status set".into(),
            });
        }

        let mut state = ctx.state().await;
        let pending = PendingMutation::begin(&*state);
        let had_custom = state.registry.reset(self.level);
        let effective = state.registry.resolve(self.level);
        drop(state);

        // Nothing to delete remotely when the scope was already inheriting.
        if had_custom {
            let scope = ctx.scope().at(self.level);
            if let Err(err) = ctx.remote().delete_statuses(&scope).await {
                debug!(%scope, %err, "delete_statuses rejected, rolling back");
                pending.rollback(&mut *ctx.state().await);
                return Err(err.into());
            }
        }
        pending.commit();

        Ok(serde_json::to_value(&effective)?)
    }
}
