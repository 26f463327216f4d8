//! BoardContext - shared state and remote access for board commands.
//!
//! The context owns the task store, status registry, tag list and selection
//! set for one open list, behind a single async mutex. Commands do all the
//! work; the context provides access, not logic. Views never get mutable
//! access; they read cloned snapshots and derived projections.

use crate::error::Result;
use crate::registry::StatusRegistry;
use crate::remote::RemoteApi;
use crate::store::TaskStore;
use crate::types::{BoardScope, ScopeLevel, SelectionSet, Tag, TaskId};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// The mutable client-side state for one open list.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub tasks: TaskStore,
    pub registry: StatusRegistry,
    pub tags: Vec<Tag>,
    pub selection: SelectionSet,
}

/// Context passed to every command.
pub struct BoardContext {
    scope: BoardScope,
    remote: Arc<dyn RemoteApi>,
    state: Mutex<BoardState>,
}

impl BoardContext {
    /// Create a context over already-loaded state (tests and embedders that
    /// manage their own fetch).
    pub fn new(scope: BoardScope, remote: Arc<dyn RemoteApi>, state: BoardState) -> Self {
        Self {
            scope,
            remote,
            state: Mutex::new(state),
        }
    }

    /// Open a board: fetch the status sets for the scope chain, the list's
    /// tasks and the workspace tags.
    pub async fn load(scope: BoardScope, remote: Arc<dyn RemoteApi>) -> Result<Self> {
        let workspace = remote.fetch_statuses(&scope.at(ScopeLevel::Workspace)).await?;
        let mut registry = StatusRegistry::new(workspace.statuses, workspace.is_custom);

        let project = remote.fetch_statuses(&scope.at(ScopeLevel::Project)).await?;
        if project.is_custom {
            registry = registry.with_custom(ScopeLevel::Project, project.statuses);
        }
        let list = remote.fetch_statuses(&scope.at(ScopeLevel::List)).await?;
        if list.is_custom {
            registry = registry.with_custom(ScopeLevel::List, list.statuses);
        }

        let tasks = remote.fetch_tasks(&scope.list).await?;
        let tags = remote.fetch_tags().await?;
        debug!(
            list = %scope.list,
            tasks = tasks.len(),
            tags = tags.len(),
            "board loaded"
        );

        Ok(Self {
            scope,
            remote,
            state: Mutex::new(BoardState {
                tasks: TaskStore::from_tasks(tasks),
                registry,
                tags,
                selection: SelectionSet::new(),
            }),
        })
    }

    /// The scope chain this context is opened on.
    pub fn scope(&self) -> &BoardScope {
        &self.scope
    }

    /// The remote service handle.
    pub fn remote(&self) -> Arc<dyn RemoteApi> {
        Arc::clone(&self.remote)
    }

    /// Lock the state for mutation. Commands only; views use `snapshot`.
    pub(crate) async fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().await
    }

    /// A point-in-time clone of the whole state, for reads and rendering.
    pub async fn snapshot(&self) -> BoardState {
        self.state.lock().await.clone()
    }

    /// The current selection, oldest-id first.
    pub async fn selection(&self) -> Vec<TaskId> {
        self.state.lock().await.selection.ids()
    }

    /// Add tasks to the selection set.
    pub async fn select(&self, ids: impl IntoIterator<Item = TaskId>) {
        let mut state = self.state.lock().await;
        for id in ids {
            state.selection.insert(id);
        }
    }

    /// Empty the selection set.
    pub async fn clear_selection(&self) {
        self.state.lock().await.selection.clear();
    }

    /// Replace the task store with fresh server truth.
    ///
    /// Used after a multi-step remote protocol fails partway, where rolling
    /// back locally cannot tell us what the server actually kept.
    pub async fn refetch_tasks(&self) -> Result<()> {
        let tasks = self.remote.fetch_tasks(&self.scope.list).await?;
        let mut state = self.state.lock().await;
        debug!(count = tasks.len(), "task store refetched");
        state.tasks = TaskStore::from_tasks(tasks);
        Ok(())
    }

    /// Best-effort refetch after a failed multi-step mutation. A refetch
    /// failure is logged, not surfaced; the caller already has the original
    /// error to report.
    pub(crate) async fn refetch_after_failure(&self) {
        if let Err(err) = self.refetch_tasks().await {
            warn!(%err, "refetch after failed mutation also failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryRemote;
    use crate::types::Task;

    fn scope() -> BoardScope {
        BoardScope::new("ws-1", "proj-1", "list-1")
    }

    #[tokio::test]
    async fn test_load_pulls_statuses_tasks_and_tags() {
        let remote = Arc::new(
            InMemoryRemote::new()
                .with_task(Task::new("Seeded", "todo", 0))
                .with_tag(Tag::new("bug")),
        );

        let ctx = BoardContext::load(scope(), remote).await.unwrap();
        let state = ctx.snapshot().await;

        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tags.len(), 1);
        assert_eq!(state.registry.resolve(ScopeLevel::List).statuses.len(), 3);
        assert!(state.selection.is_empty());
    }

    #[tokio::test]
    async fn test_selection_round_trip() {
        let remote = Arc::new(InMemoryRemote::new());
        let ctx = BoardContext::load(scope(), remote).await.unwrap();

        let id = TaskId::from_string("t1");
        ctx.select([id.clone()]).await;
        assert_eq!(ctx.selection().await, vec![id]);

        ctx.clear_selection().await;
        assert!(ctx.selection().await.is_empty());
    }

    #[tokio::test]
    async fn test_refetch_replaces_store() {
        let remote = Arc::new(InMemoryRemote::new());
        let ctx = BoardContext::load(scope(), remote.clone()).await.unwrap();
        assert_eq!(ctx.snapshot().await.tasks.len(), 0);

        remote.seed_task(Task::new("Server-side", "todo", 0));
        ctx.refetch_tasks().await.unwrap();
        assert_eq!(ctx.snapshot().await.tasks.len(), 1);
    }
}
