//! Selection set: the ephemeral, client-only set of task ids bulk
//! operations act on. Never persisted, never sent to the server.

use super::ids::TaskId;
use serde::Serialize;
use std::collections::BTreeSet;

/// The current multi-select of tasks.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<TaskId>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TaskId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: &TaskId) -> bool {
        self.0.remove(id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.0.contains(id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Replace the whole selection. Bulk operations use this to narrow the
    /// selection to the tasks whose remote update failed.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = TaskId>) {
        self.0 = ids.into_iter().collect();
    }

    pub fn ids(&self) -> Vec<TaskId> {
        self.0.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TaskId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = TaskId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
