//! Scope types: the workspace → project → list hierarchy status sets live in.

use super::ids::{ListId, ProjectId, WorkspaceId};
use serde::{Deserialize, Serialize};

/// The hierarchy level at which a status set is defined or inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeLevel {
    Workspace,
    Project,
    List,
}

impl ScopeLevel {
    /// The next level up, or `None` at the workspace root.
    pub fn parent(&self) -> Option<ScopeLevel> {
        match self {
            ScopeLevel::Workspace => None,
            ScopeLevel::Project => Some(ScopeLevel::Workspace),
            ScopeLevel::List => Some(ScopeLevel::Project),
        }
    }
}

impl std::fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeLevel::Workspace => write!(f, "workspace"),
            ScopeLevel::Project => write!(f, "project"),
            ScopeLevel::List => write!(f, "list"),
        }
    }
}

/// The one workspace → project → list chain a board context is opened on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardScope {
    pub workspace: WorkspaceId,
    pub project: ProjectId,
    pub list: ListId,
}

impl BoardScope {
    pub fn new(
        workspace: impl Into<WorkspaceId>,
        project: impl Into<ProjectId>,
        list: impl Into<ListId>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            project: project.into(),
            list: list.into(),
        }
    }

    /// The scope reference for a given level of this chain, as sent to the
    /// remote service.
    pub fn at(&self, level: ScopeLevel) -> ScopeRef {
        let id = match level {
            ScopeLevel::Workspace => self.workspace.as_str(),
            ScopeLevel::Project => self.project.as_str(),
            ScopeLevel::List => self.list.as_str(),
        };
        ScopeRef {
            level,
            id: id.to_string(),
        }
    }
}

/// A concrete (level, id) pair identifying a scope on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeRef {
    pub level: ScopeLevel,
    pub id: String,
}

impl std::fmt::Display for ScopeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.level, self.id)
    }
}
