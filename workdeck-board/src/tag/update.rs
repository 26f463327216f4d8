//! UpdateTag command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::sync::PendingMutation;
use crate::types::TagId;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Rename or recolor a tag.
#[derive(Debug, Deserialize)]
pub struct UpdateTag {
    /// The tag to edit
    pub id: TagId,
    pub name: Option<String>,
    pub color: Option<String>,
}

impl UpdateTag {
    pub fn new(id: impl Into<TagId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            color: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateTag {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(BoardError::empty_name("tag name"));
            }
        }

        let mut state = ctx.state().await;
        let Some(pos) = state.tags.iter().position(|t| t.id == self.id) else {
            return Err(BoardError::TagNotFound {
                id: self.id.to_string(),
            });
        };

        let pending = PendingMutation::begin(&*state);
        if let Some(name) = &self.name {
            state.tags[pos].name = name.clone();
        }
        if let Some(color) = &self.color {
            state.tags[pos].color = color.clone();
        }
        let updated = state.tags[pos].clone();
        drop(state);

        if let Err(err) = ctx.remote().update_tag(&updated).await {
            debug!(tag = %self.id, %err, "update_tag rejected, rolling back");
            pending.rollback(&mut *ctx.state().await);
            return Err(err.into());
        }
        pending.commit();

        Ok(serde_json::to_value(&updated)?)
    }
}
