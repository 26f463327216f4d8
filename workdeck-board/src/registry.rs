//! StatusRegistry - resolves the effective status set for a scope.
//!
//! A scope either inherits its parent's set or owns an independent,
//! explicitly ordered one. The registry holds the sets for the single
//! workspace → project → list chain the board context is opened on;
//! resolution walks list → project → workspace.

use crate::types::{renumber, ScopeLevel, Status, StatusId};
use serde::Serialize;

/// The effective status set for a scope after resolving inheritance.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EffectiveStatuses {
    pub statuses: Vec<Status>,
    pub is_custom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<ScopeLevel>,
}

/// Per-scope status sets with inheritance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRegistry {
    workspace: Vec<Status>,
    workspace_custom: bool,
    project: Option<Vec<Status>>,
    list: Option<Vec<Status>>,
}

impl StatusRegistry {
    /// Create a registry with the given workspace root set. An empty root
    /// set falls back to the stock defaults; the workspace always has at
    /// least one status.
    pub fn new(workspace: Vec<Status>, workspace_custom: bool) -> Self {
        let mut workspace = if workspace.is_empty() {
            Status::defaults()
        } else {
            workspace
        };
        workspace.sort_by_key(|s| s.order);
        renumber(&mut workspace);
        Self {
            workspace,
            workspace_custom,
            project: None,
            list: None,
        }
    }

    /// Install a custom set for a level (used while loading fetched state).
    pub fn with_custom(mut self, level: ScopeLevel, statuses: Vec<Status>) -> Self {
        self.set_custom(level, statuses);
        self
    }

    /// Resolve the effective ordered status set for a scope. If the scope
    /// has no custom set, walk up the hierarchy until a defined set is
    /// found and tag the result with where it came from.
    pub fn resolve(&self, level: ScopeLevel) -> EffectiveStatuses {
        let owner = self.owning_level(level);
        EffectiveStatuses {
            statuses: self.set_at(owner).to_vec(),
            is_custom: match level {
                ScopeLevel::Workspace => self.workspace_custom,
                _ => owner == level,
            },
            inherited_from: (owner != level).then_some(owner),
        }
    }

    /// The level whose set is effective for the given scope.
    pub fn owning_level(&self, level: ScopeLevel) -> ScopeLevel {
        match level {
            ScopeLevel::List if self.list.is_some() => ScopeLevel::List,
            ScopeLevel::List | ScopeLevel::Project if self.project.is_some() => {
                ScopeLevel::Project
            }
            _ => ScopeLevel::Workspace,
        }
    }

    /// Whether a status id is in the effective set at a scope.
    pub fn contains(&self, level: ScopeLevel, id: &StatusId) -> bool {
        self.set_at(self.owning_level(level)).iter().any(|s| &s.id == id)
    }

    /// First status of the effective set at a scope (the default for new
    /// tasks).
    pub fn first_status(&self, level: ScopeLevel) -> &Status {
        // Sets are never empty: the workspace root is seeded with defaults
        // and SetCustomStatuses rejects empty submissions.
        &self.set_at(self.owning_level(level))[0]
    }

    /// Replace a level's set atomically, renumbering 0..N-1 in submitted
    /// order and marking the level custom.
    pub fn set_custom(&mut self, level: ScopeLevel, mut statuses: Vec<Status>) {
        renumber(&mut statuses);
        match level {
            ScopeLevel::Workspace => {
                self.workspace = statuses;
                self.workspace_custom = true;
            }
            ScopeLevel::Project => self.project = Some(statuses),
            ScopeLevel::List => self.list = Some(statuses),
        }
    }

    /// Delete a level's custom set, falling back to inheritance. Returns
    /// whether there was a set to delete. The workspace root cannot reset.
    pub fn reset(&mut self, level: ScopeLevel) -> bool {
        match level {
            ScopeLevel::Workspace => false,
            ScopeLevel::Project => self.project.take().is_some(),
            ScopeLevel::List => self.list.take().is_some(),
        }
    }

    /// Remove a status from the set owning the given scope, renumbering the
    /// remainder. Returns whether the status was present.
    pub(crate) fn remove_status(&mut self, level: ScopeLevel, id: &StatusId) -> bool {
        let owner = self.owning_level(level);
        let set = match owner {
            ScopeLevel::Workspace => &mut self.workspace,
            ScopeLevel::Project => self.project.as_mut().expect("owning set exists"),
            ScopeLevel::List => self.list.as_mut().expect("owning set exists"),
        };
        let before = set.len();
        set.retain(|s| &s.id != id);
        let removed = set.len() < before;
        if removed {
            renumber(set);
        }
        removed
    }

    fn set_at(&self, level: ScopeLevel) -> &[Status] {
        match level {
            ScopeLevel::Workspace => &self.workspace,
            ScopeLevel::Project => self.project.as_deref().unwrap_or(&self.workspace),
            ScopeLevel::List => self
                .list
                .as_deref()
                .unwrap_or_else(|| self.project.as_deref().unwrap_or(&self.workspace)),
        }
    }
}

impl Default for StatusRegistry {
    fn default() -> Self {
        Self::new(Status::defaults(), false)
    }
}
