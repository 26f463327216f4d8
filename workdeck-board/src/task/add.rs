//! AddTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::sync::PendingMutation;
use crate::types::{ActorId, Priority, ScopeLevel, StatusId, TagId, Task, TaskId};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Create a new task on the board. Defaults to the first status of the
/// list's effective set, appended at the end of that group.
#[derive(Debug, Deserialize)]
pub struct AddTask {
    /// The task title (required)
    pub title: String,
    /// Detailed task description
    pub description: Option<String>,
    /// Initial status; defaults to the first status of the effective set
    pub status_id: Option<StatusId>,
    /// Task priority
    pub priority: Option<Priority>,
    /// Start date
    pub start_date: Option<NaiveDate>,
    /// Due date
    pub due_date: Option<NaiveDate>,
    /// Assignee
    pub assigned_to: Option<ActorId>,
    /// Tags to apply
    #[serde(default)]
    pub tags: Vec<TagId>,
    /// Parent task, making this a subtask
    pub parent_task_id: Option<TaskId>,
}

impl AddTask {
    /// Create a new AddTask command with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status_id: None,
            priority: None,
            start_date: None,
            due_date: None,
            assigned_to: None,
            tags: Vec::new(),
            parent_task_id: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the initial status
    pub fn with_status(mut self, status: impl Into<StatusId>) -> Self {
        self.status_id = Some(status.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set start and due dates
    pub fn with_dates(mut self, start: Option<NaiveDate>, due: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.due_date = due;
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, actor: impl Into<ActorId>) -> Self {
        self.assigned_to = Some(actor.into());
        self
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<TagId>) -> Self {
        self.tags = tags;
        self
    }

    /// Create as a subtask of the given parent
    pub fn with_parent(mut self, parent: impl Into<TaskId>) -> Self {
        self.parent_task_id = Some(parent.into());
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if self.title.trim().is_empty() {
            return Err(BoardError::empty_name("task title"));
        }

        let mut state = ctx.state().await;

        let status_id = match &self.status_id {
            Some(id) => {
                if !state.registry.contains(ScopeLevel::List, id) {
                    return Err(BoardError::StatusNotFound { id: id.to_string() });
                }
                id.clone()
            }
            None => state.registry.first_status(ScopeLevel::List).id.clone(),
        };
        for tag in &self.tags {
            if !state.tags.iter().any(|t| &t.id == tag) {
                return Err(BoardError::TagNotFound { id: tag.to_string() });
            }
        }
        if let Some(parent) = &self.parent_task_id {
            let parent_task = state.tasks.require(parent)?;
            // Subtasks nest one level only
            if parent_task.is_subtask() {
                return Err(BoardError::invalid_target(format!(
                    "task {parent} is itself a subtask"
                )));
            }
        }

        let order = match &self.parent_task_id {
            Some(parent) => state.tasks.subtasks_of(parent).len(),
            None => state.tasks.next_order(&status_id),
        };

        let mut task = Task::new(&self.title, status_id, order);
        task.description = self.description.clone().unwrap_or_default();
        task.priority = self.priority.unwrap_or_default();
        task.start_date = self.start_date;
        task.due_date = self.due_date;
        task.assigned_to = self.assigned_to.clone();
        task.tags = self.tags.iter().cloned().collect();
        task.parent_task_id = self.parent_task_id.clone();

        let pending = PendingMutation::begin(&*state);
        state.tasks.insert(task.clone());
        drop(state);

        if let Err(err) = ctx.remote().create_task(&ctx.scope().list, &task).await {
            debug!(task = %task.id, %err, "create_task rejected, rolling back");
            pending.rollback(&mut *ctx.state().await);
            return Err(err.into());
        }
        pending.commit();

        Ok(serde_json::to_value(&task)?)
    }
}
