//! ListTags command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use serde::Deserialize;
use serde_json::Value;

/// List the workspace's tags.
#[derive(Debug, Default, Deserialize)]
pub struct ListTags {}

impl ListTags {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListTags {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let state = ctx.state().await;
        Ok(serde_json::to_value(&state.tags)?)
    }
}
