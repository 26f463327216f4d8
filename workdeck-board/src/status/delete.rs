//! DeleteStatus command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::sync::PendingMutation;
use crate::types::{ScopeLevel, StatusId};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Delete a status from the set effective at a scope.
///
/// Rejected when it is the last status in the set, or when tasks reference
/// it and no `reassign_to` is given. With `reassign_to`, all referencing
/// tasks are moved to the other status first.
#[derive(Debug, Deserialize)]
pub struct DeleteStatus {
    /// The scope level whose effective set is edited
    pub level: ScopeLevel,
    /// The status to remove
    pub id: StatusId,
    /// Where to move referencing tasks, if any
    #[serde(default)]
    pub reassign_to: Option<StatusId>,
}

impl DeleteStatus {
    pub fn new(level: ScopeLevel, id: impl Into<StatusId>) -> Self {
        Self {
            level,
            id: id.into(),
            reassign_to: None,
        }
    }

    /// Reassign referencing tasks to another status in the same set.
    pub fn with_reassign_to(mut self, to: impl Into<StatusId>) -> Self {
        self.reassign_to = Some(to.into());
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteStatus {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut state = ctx.state().await;

        let effective = state.registry.resolve(self.level);
        if !effective.statuses.iter().any(|s| s.id == self.id) {
            return Err(BoardError::StatusNotFound {
                id: self.id.to_string(),
            });
        }
        if effective.statuses.len() == 1 {
            return Err(BoardError::LastStatus);
        }
        if let Some(to) = &self.reassign_to {
            if to == &self.id {
                return Err(BoardError::invalid_target(
                    "cannot reassign tasks to the status being deleted",
                ));
            }
            if !effective.statuses.iter().any(|s| &s.id == to) {
                return Err(BoardError::StatusNotFound { id: to.to_string() });
            }
        }

        let local_count = state.tasks.count_with_status(&self.id);
        if local_count > 0 && self.reassign_to.is_none() {
            return Err(BoardError::StatusInUse {
                id: self.id.to_string(),
                count: local_count,
            });
        }

        let owner = state.registry.owning_level(self.level);
        let scope = ctx.scope().at(owner);

        // No local references and no reassignment requested: double-check
        // with the server in case another session still has tasks here.
        if local_count == 0 && self.reassign_to.is_none() {
            drop(state);
            let remote_count = ctx.remote().status_task_count(&scope, &self.id).await?;
            if remote_count > 0 {
                return Err(BoardError::StatusInUse {
                    id: self.id.to_string(),
                    count: remote_count,
                });
            }
            state = ctx.state().await;
        }

        let pending = PendingMutation::begin(&*state);
        let reassigned = match &self.reassign_to {
            Some(to) => state.tasks.reassign_status(&self.id, to),
            None => 0,
        };
        state.registry.remove_status(self.level, &self.id);
        let statuses = state.registry.resolve(self.level).statuses;
        drop(state);

        // Two coordinated requests: reassign first, then replace the set.
        // Partial success cannot be reasoned about locally, so any failure
        // rolls back and resynchronizes from the server.
        if let Some(to) = &self.reassign_to {
            if let Err(err) = ctx.remote().reassign_status(&scope, &self.id, to).await {
                debug!(%scope, %err, "reassign_status rejected, rolling back");
                pending.rollback(&mut *ctx.state().await);
                return Err(err.into());
            }
        }
        if let Err(err) = ctx.remote().put_statuses(&scope, &statuses).await {
            warn!(%scope, %err, "put_statuses failed after reassign, rolling back and refetching");
            pending.rollback(&mut *ctx.state().await);
            if self.reassign_to.is_some() {
                ctx.refetch_after_failure().await;
            }
            return Err(err.into());
        }
        pending.commit();

        Ok(serde_json::json!({
            "deleted": true,
            "id": self.id.to_string(),
            "reassigned": reassigned,
            "statuses": statuses,
        }))
    }
}
