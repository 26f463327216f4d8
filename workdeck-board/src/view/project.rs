//! ProjectView command and the pure projector behind it

use super::filter::ViewFilters;
use super::gantt::gantt_window;
use super::model::{GanttRow, StatusGroup, TaskCard, ViewMode, ViewModel};
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::operation::{async_trait, Execute};
use crate::store::TaskStore;
use crate::types::{ScopeLevel, Status, Task};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

/// Derive a view model from the store. Reads only; stored order is never
/// touched, so projecting is safe at any point, including while optimistic
/// mutations are in flight.
pub fn project(
    tasks: &TaskStore,
    statuses: &[Status],
    filters: &ViewFilters,
    mode: ViewMode,
    today: NaiveDate,
) -> ViewModel {
    match mode {
        ViewMode::List => ViewModel::List {
            groups: status_groups(tasks, statuses, filters)
                .into_iter()
                .filter(|g| !g.tasks.is_empty())
                .collect(),
        },
        ViewMode::Kanban => ViewModel::Kanban {
            columns: status_groups(tasks, statuses, filters),
        },
        ViewMode::Gantt => {
            let dated: Vec<&Task> = statuses
                .iter()
                .flat_map(|status| tasks.group(&status.id))
                .filter(|t| t.has_dates() && filters.matches(t))
                .collect();
            let window = gantt_window(today, dated.iter().copied());
            let mut rows: Vec<GanttRow> = dated
                .into_iter()
                .filter_map(|task| {
                    let start = task.start_date.or(task.due_date)?;
                    let end = task.due_date.or(task.start_date).unwrap_or(start);
                    Some(GanttRow {
                        id: task.id.clone(),
                        title: task.title.clone(),
                        status_id: task.status_id.clone(),
                        start,
                        end,
                        progress: tasks.progress_of(&task.id, statuses),
                    })
                })
                .collect();
            rows.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
            ViewModel::Gantt { window, rows }
        }
    }
}

fn status_groups(tasks: &TaskStore, statuses: &[Status], filters: &ViewFilters) -> Vec<StatusGroup> {
    statuses
        .iter()
        .map(|status| StatusGroup {
            status: status.clone(),
            tasks: tasks
                .group(&status.id)
                .into_iter()
                .filter(|t| filters.matches(t))
                .map(|t| card(tasks, statuses, t))
                .collect(),
        })
        .collect()
}

fn card(tasks: &TaskStore, statuses: &[Status], task: &Task) -> TaskCard {
    TaskCard {
        progress: tasks.progress_of(&task.id, statuses),
        subtask_count: tasks.subtasks_of(&task.id).len(),
        task: task.clone(),
    }
}

/// Project the board into the requested layout.
#[derive(Debug, Deserialize)]
pub struct ProjectView {
    pub mode: ViewMode,
    #[serde(default)]
    pub filters: ViewFilters,
}

impl ProjectView {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            filters: ViewFilters::none(),
        }
    }

    pub fn with_filters(mut self, filters: ViewFilters) -> Self {
        self.filters = filters;
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ProjectView {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let state = ctx.state().await;
        let effective = state.registry.resolve(ScopeLevel::List);
        let today = chrono::Local::now().date_naive();
        let view = project(
            &state.tasks,
            &effective.statuses,
            &self.filters,
            self.mode,
            today,
        );
        Ok(serde_json::to_value(&view)?)
    }
}
