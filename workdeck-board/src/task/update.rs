//! UpdateTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::sync::PendingMutation;
use crate::types::{ActorId, Priority, TaskId, TaskPatch};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Edit a task's fields. Only the supplied fields change; status and order
/// are the ordering engine's business and go through `MoveTask`.
#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    /// The task to edit
    pub id: TaskId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub assigned_to: Option<ActorId>,
}

impl UpdateTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            priority: None,
            start_date: None,
            due_date: None,
            assigned_to: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, due: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.due_date = due;
        self
    }

    pub fn with_assignee(mut self, actor: impl Into<ActorId>) -> Self {
        self.assigned_to = Some(actor.into());
        self
    }

    fn patch(&self) -> TaskPatch {
        TaskPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            start_date: self.start_date,
            due_date: self.due_date,
            assigned_to: self.assigned_to.clone(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(BoardError::empty_name("task title"));
            }
        }

        let patch = self.patch();
        let mut state = ctx.state().await;
        state.tasks.require(&self.id)?;

        let pending = PendingMutation::begin(&*state);
        let task = state
            .tasks
            .get_mut(&self.id)
            .expect("existence checked above");
        patch.apply_to(task);
        let updated = task.clone();
        drop(state);

        if patch.is_empty() {
            pending.commit();
            return Ok(serde_json::to_value(&updated)?);
        }

        if let Err(err) = ctx.remote().update_task(&self.id, &patch).await {
            debug!(task = %self.id, %err, "update_task rejected, rolling back");
            pending.rollback(&mut *ctx.state().await);
            return Err(err.into());
        }
        pending.commit();

        Ok(serde_json::to_value(&updated)?)
    }
}
