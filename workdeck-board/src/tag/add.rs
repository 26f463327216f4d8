//! AddTag command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::sync::PendingMutation;
use crate::types::Tag;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Create a workspace-scoped tag. Color defaults to the deterministic
/// auto-color for the name.
#[derive(Debug, Deserialize)]
pub struct AddTag {
    /// The tag name
    pub name: String,
    /// Explicit color (6-char hex without #)
    pub color: Option<String>,
}

impl AddTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddTag {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if self.name.trim().is_empty() {
            return Err(BoardError::empty_name("tag name"));
        }

        let mut state = ctx.state().await;
        if state.tags.iter().any(|t| t.name == self.name) {
            return Err(BoardError::duplicate("tag", &self.name));
        }

        let mut tag = Tag::new(&self.name);
        if let Some(color) = &self.color {
            tag = tag.with_color(color);
        }

        let pending = PendingMutation::begin(&*state);
        state.tags.push(tag.clone());
        drop(state);

        if let Err(err) = ctx.remote().create_tag(&tag).await {
            debug!(tag = %tag.id, %err, "create_tag rejected, rolling back");
            pending.rollback(&mut *ctx.state().await);
            return Err(err.into());
        }
        pending.commit();

        Ok(serde_json::to_value(&tag)?)
    }
}
