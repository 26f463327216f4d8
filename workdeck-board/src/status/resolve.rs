//! ResolveStatuses command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::types::ScopeLevel;
use serde::Deserialize;
use serde_json::Value;

/// Resolve the effective ordered status set for a scope, honoring
/// inheritance.
#[derive(Debug, Deserialize)]
pub struct ResolveStatuses {
    /// The scope level to resolve at
    pub level: ScopeLevel,
}

impl ResolveStatuses {
    pub fn new(level: ScopeLevel) -> Self {
        Self { level }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ResolveStatuses {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let state = ctx.state().await;
        let effective = state.registry.resolve(self.level);
        Ok(serde_json::to_value(&effective)?)
    }
}
