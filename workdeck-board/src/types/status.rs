//! Status types: the workflow states tasks move through.

use super::ids::StatusId;
use serde::{Deserialize, Serialize};

/// A workflow status. Statuses are defined per scope (workspace, project or
/// list) and ordered; `order` values within an effective set are unique and
/// contiguous from 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Status {
    pub id: StatusId,
    pub name: String,
    /// 6-character hex color code without #
    pub color: String,
    /// Terminal marker: tasks in this status count as completed for
    /// progress aggregation.
    #[serde(default)]
    pub is_final: bool,
    pub order: usize,
}

impl Status {
    /// Create a new status with a ULID id and auto-color based on the name.
    ///
    /// `order` is provisional; effective sets are renumbered on submission.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let color = crate::auto_color::auto_color(&name).to_string();
        Self {
            id: StatusId::new(),
            name,
            color,
            is_final: false,
            order: 0,
        }
    }

    /// Set an explicit color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Mark this status as terminal.
    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    /// The stock status set a fresh workspace starts with.
    pub fn defaults() -> Vec<Status> {
        vec![
            Status {
                id: StatusId::from_string("todo"),
                name: "To Do".into(),
                color: "bfd4f2".into(),
                is_final: false,
                order: 0,
            },
            Status {
                id: StatusId::from_string("in-progress"),
                name: "In Progress".into(),
                color: "1d76db".into(),
                is_final: false,
                order: 1,
            },
            Status {
                id: StatusId::from_string("complete"),
                name: "Complete".into(),
                color: "0e8a16".into(),
                is_final: true,
                order: 2,
            },
        ]
    }
}

/// Renumber a status slice so `order` runs 0..N-1 in slice order.
pub fn renumber(statuses: &mut [Status]) {
    for (i, status) in statuses.iter_mut().enumerate() {
        status.order = i;
    }
}
