//! View filters

use crate::types::{StatusId, TagId, Task};
use serde::{Deserialize, Serialize};

/// Which tasks a view shows. Empty filter fields mean "everything"; the
/// tag filter uses OR semantics, so a task needs at least one of the
/// requested tags, not all of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewFilters {
    /// Case-insensitive title substring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Statuses to show; empty shows all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<StatusId>,
    /// Tags to match (OR); empty shows all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagId>,
}

impl ViewFilters {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = StatusId>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.statuses.is_empty() && self.tags.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            if !needle.is_empty() && !task.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&task.status_id) {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|t| task.tags.contains(t)) {
            return false;
        }
        true
    }
}
