//! Task types: Task, TaskPatch, Priority

use super::ids::{ActorId, StatusId, TagId, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Task priority. Ordered so views can sort urgent-first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// A task on the board.
///
/// Tasks are stored flat; a subtask carries `parent_task_id` and is excluded
/// from top-level ordering but included in the parent's progress aggregation.
/// `order` is unique within the task's status group; the ordering engine
/// keeps top-level groups renumbered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status_id: StatusId,
    pub order: usize,
    #[serde(default)]
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<ActorId>,
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<TaskId>,
}

impl Task {
    /// Create a new task in the given status at the given order.
    pub fn new(title: impl Into<String>, status_id: impl Into<StatusId>, order: usize) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            status_id: status_id.into(),
            order,
            priority: Priority::default(),
            start_date: None,
            due_date: None,
            assigned_to: None,
            tags: BTreeSet::new(),
            parent_task_id: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set start and due dates
    pub fn with_dates(mut self, start: Option<NaiveDate>, due: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.due_date = due;
        self
    }

    /// Assign the task
    pub fn with_assignee(mut self, actor: impl Into<ActorId>) -> Self {
        self.assigned_to = Some(actor.into());
        self
    }

    /// Make this task a subtask of `parent`
    pub fn with_parent(mut self, parent: impl Into<TaskId>) -> Self {
        self.parent_task_id = Some(parent.into());
        self
    }

    /// Whether this task is a subtask.
    pub fn is_subtask(&self) -> bool {
        self.parent_task_id.is_some()
    }

    /// Whether the task has at least one of start/due date set.
    pub fn has_dates(&self) -> bool {
        self.start_date.is_some() || self.due_date.is_some()
    }
}

/// Partial update sent to `PUT task`. Absent fields are left untouched by
/// the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<StatusId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<ActorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<TagId>>,
}

impl TaskPatch {
    /// A patch that only changes the status.
    pub fn status(status_id: StatusId) -> Self {
        Self {
            status_id: Some(status_id),
            ..Default::default()
        }
    }

    /// A patch that only changes the tag set.
    pub fn tags(tags: BTreeSet<TagId>) -> Self {
        Self {
            tags: Some(tags),
            ..Default::default()
        }
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the patch to a task in place.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status_id) = &self.status_id {
            task.status_id = status_id.clone();
        }
        if let Some(order) = self.order {
            task.order = order;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(start) = self.start_date {
            task.start_date = Some(start);
        }
        if let Some(due) = self.due_date {
            task.due_date = Some(due);
        }
        if let Some(actor) = &self.assigned_to {
            task.assigned_to = Some(actor.clone());
        }
        if let Some(tags) = &self.tags {
            task.tags = tags.clone();
        }
    }
}
