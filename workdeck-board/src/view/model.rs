//! View model types
//!
//! A closed set of tagged variants, one per board layout. Each consumer
//! dispatches once on the variant instead of inspecting task shapes at
//! runtime.

use crate::types::{Status, StatusId, Task, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Requested board layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    List,
    Kanban,
    Gantt,
}

/// A top-level task as a view shows it, with derived progress attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCard {
    #[serde(flatten)]
    pub task: Task,
    /// Completed subtasks over total subtasks, 0 when there are none
    pub progress: f64,
    pub subtask_count: usize,
}

/// One status column or section with its tasks in stored order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusGroup {
    pub status: Status,
    pub tasks: Vec<TaskCard>,
}

/// A task bar on the Gantt timeline. Tasks with a single date render as a
/// one-day bar on that date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GanttRow {
    pub id: TaskId,
    pub title: String,
    pub status_id: StatusId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub progress: f64,
}

/// Visible date range of the Gantt timeline, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// What the projector hands each layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewModel {
    /// Sections in status order, empty sections omitted
    List { groups: Vec<StatusGroup> },
    /// One column per effective status, empty columns included
    Kanban { columns: Vec<StatusGroup> },
    /// Dated tasks only, inside the computed window
    Gantt { window: DateWindow, rows: Vec<GanttRow> },
}

impl ViewModel {
    pub fn mode(&self) -> ViewMode {
        match self {
            ViewModel::List { .. } => ViewMode::List,
            ViewModel::Kanban { .. } => ViewMode::Kanban,
            ViewModel::Gantt { .. } => ViewMode::Gantt,
        }
    }
}
