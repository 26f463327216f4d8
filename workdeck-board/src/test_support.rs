//! In-memory fake remote and context builders for tests.
//!
//! `InMemoryRemote` implements [`RemoteApi`] against plain maps behind a
//! mutex and applies mutations server-side the way the real service would:
//! patches land on stored tasks, reassignment rewrites task statuses, tag
//! deletion strips references. Tests inject failures per method name or per
//! task id and inspect the recorded call log.

use crate::context::BoardContext;
use crate::error::Result;
use crate::remote::{RemoteApi, RemoteError, RemoteResult, StatusPayload};
use crate::types::{
    BoardScope, ListId, ScopeLevel, ScopeRef, Status, StatusId, Tag, TagId, Task, TaskId,
    TaskPatch,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct RemoteState {
    /// Custom status sets per scope level; workspace is always present
    statuses: HashMap<ScopeLevel, Vec<Status>>,
    tasks: BTreeMap<TaskId, Task>,
    tags: Vec<Tag>,
    fail_methods: HashSet<String>,
    fail_tasks: HashSet<TaskId>,
    calls: Vec<String>,
}

/// Fake remote service for tests. Cheap to construct; every board gets its
/// own instance.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    state: Mutex<RemoteState>,
}

impl InMemoryRemote {
    /// A remote whose workspace carries the default status set and owns no
    /// custom sets below it.
    pub fn new() -> Self {
        let remote = Self::default();
        {
            let mut state = remote.lock();
            state
                .statuses
                .insert(ScopeLevel::Workspace, Status::defaults());
        }
        remote
    }

    pub fn with_task(self, task: Task) -> Self {
        self.lock().tasks.insert(task.id.clone(), task);
        self
    }

    pub fn with_tag(self, tag: Tag) -> Self {
        self.lock().tags.push(tag);
        self
    }

    /// Add a task server-side without going through the API, as if another
    /// session created it.
    pub fn seed_task(&self, task: Task) {
        self.lock().tasks.insert(task.id.clone(), task);
    }

    /// Make every call to the named method fail with a rejection.
    pub fn fail_on(&self, method: &str) {
        self.lock().fail_methods.insert(method.to_string());
    }

    /// Make `update_task` fail for one task id only.
    pub fn fail_for_task(&self, id: &TaskId) {
        self.lock().fail_tasks.insert(id.clone());
    }

    /// Let previously failing tasks succeed again.
    pub fn clear_task_failures(&self) {
        self.lock().fail_tasks.clear();
    }

    /// The recorded calls, oldest first. Each entry starts with the method
    /// name.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Drop the recorded calls; the context builders use this so tests only
    /// see calls made after setup.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// The task as the server currently stores it.
    pub fn stored_task(&self, id: &TaskId) -> Option<Task> {
        self.lock().tasks.get(id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RemoteState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: String) -> RemoteResult<()> {
        let mut state = self.lock();
        let method = call.split('(').next().unwrap_or(&call).to_string();
        state.calls.push(call);
        if state.fail_methods.contains(&method) {
            return Err(RemoteError::rejected(format!("{method} failed by test")));
        }
        Ok(())
    }

    fn tasks_sorted(state: &RemoteState) -> Vec<Task> {
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| {
            a.status_id
                .cmp(&b.status_id)
                .then(a.order.cmp(&b.order))
                .then(a.id.cmp(&b.id))
        });
        tasks
    }
}

#[async_trait]
impl RemoteApi for InMemoryRemote {
    async fn fetch_statuses(&self, scope: &ScopeRef) -> RemoteResult<StatusPayload> {
        self.record(format!("fetch_statuses({})", scope.level))?;
        let state = self.lock();
        let mut level = scope.level;
        loop {
            if let Some(statuses) = state.statuses.get(&level) {
                return Ok(StatusPayload {
                    statuses: statuses.clone(),
                    is_custom: level == scope.level,
                    inherited_from: (level != scope.level).then_some(level),
                });
            }
            match level.parent() {
                Some(parent) => level = parent,
                None => {
                    return Ok(StatusPayload {
                        statuses: Status::defaults(),
                        is_custom: false,
                        inherited_from: None,
                    })
                }
            }
        }
    }

    async fn put_statuses(&self, scope: &ScopeRef, statuses: &[Status]) -> RemoteResult<()> {
        self.record(format!("put_statuses({}, {})", scope.level, statuses.len()))?;
        self.lock().statuses.insert(scope.level, statuses.to_vec());
        Ok(())
    }

    async fn delete_statuses(&self, scope: &ScopeRef) -> RemoteResult<()> {
        self.record(format!("delete_statuses({})", scope.level))?;
        if scope.level != ScopeLevel::Workspace {
            self.lock().statuses.remove(&scope.level);
        }
        Ok(())
    }

    async fn status_task_count(&self, scope: &ScopeRef, status: &StatusId) -> RemoteResult<usize> {
        self.record(format!("status_task_count({}, {status})", scope.level))?;
        let state = self.lock();
        Ok(state
            .tasks
            .values()
            .filter(|t| t.status_id == *status)
            .count())
    }

    async fn reassign_status(
        &self,
        scope: &ScopeRef,
        from: &StatusId,
        to: &StatusId,
    ) -> RemoteResult<()> {
        self.record(format!("reassign_status({}, {from}, {to})", scope.level))?;
        let mut state = self.lock();
        for task in state.tasks.values_mut() {
            if task.status_id == *from {
                task.status_id = to.clone();
            }
        }
        Ok(())
    }

    async fn fetch_tasks(&self, list: &ListId) -> RemoteResult<Vec<Task>> {
        self.record(format!("fetch_tasks({list})"))?;
        Ok(Self::tasks_sorted(&self.lock()))
    }

    async fn create_task(&self, list: &ListId, task: &Task) -> RemoteResult<()> {
        self.record(format!("create_task({list}, {})", task.id))?;
        self.lock().tasks.insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> RemoteResult<()> {
        self.record(format!("update_task({id})"))?;
        let mut state = self.lock();
        if state.fail_tasks.contains(id) {
            return Err(RemoteError::rejected(format!("{id} failed by test")));
        }
        if let Some(task) = state.tasks.get_mut(id) {
            patch.apply_to(task);
        }
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> RemoteResult<()> {
        self.record(format!("delete_task({id})"))?;
        let mut state = self.lock();
        state.tasks.remove(id);
        let orphans: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|t| t.parent_task_id.as_ref() == Some(id))
            .map(|t| t.id.clone())
            .collect();
        for orphan in orphans {
            state.tasks.remove(&orphan);
        }
        Ok(())
    }

    async fn reorder(
        &self,
        list: &ListId,
        status: &StatusId,
        ordered: &[TaskId],
    ) -> RemoteResult<()> {
        self.record(format!("reorder({list}, {status}, {})", ordered.len()))?;
        let mut state = self.lock();
        for (index, id) in ordered.iter().enumerate() {
            if let Some(task) = state.tasks.get_mut(id) {
                task.status_id = status.clone();
                task.order = index;
            }
        }
        Ok(())
    }

    async fn fetch_tags(&self) -> RemoteResult<Vec<Tag>> {
        self.record("fetch_tags()".to_string())?;
        Ok(self.lock().tags.clone())
    }

    async fn create_tag(&self, tag: &Tag) -> RemoteResult<()> {
        self.record(format!("create_tag({})", tag.id))?;
        self.lock().tags.push(tag.clone());
        Ok(())
    }

    async fn update_tag(&self, tag: &Tag) -> RemoteResult<()> {
        self.record(format!("update_tag({})", tag.id))?;
        let mut state = self.lock();
        if let Some(existing) = state.tags.iter_mut().find(|t| t.id == tag.id) {
            *existing = tag.clone();
        }
        Ok(())
    }

    async fn delete_tag(&self, id: &TagId) -> RemoteResult<()> {
        self.record(format!("delete_tag({id})"))?;
        let mut state = self.lock();
        state.tags.retain(|t| t.id != *id);
        for task in state.tasks.values_mut() {
            task.tags.remove(id);
        }
        Ok(())
    }
}

/// Scope chain shared by the context builders.
pub fn test_scope() -> BoardScope {
    BoardScope::new("ws-1", "proj-1", "list-1")
}

/// A loaded context over an empty board with default statuses. The call log
/// starts empty so tests only see their own traffic.
pub async fn board_context() -> (BoardContext, Arc<InMemoryRemote>) {
    board_context_with_tasks(Vec::new()).await
}

/// A loaded context whose remote and local store both hold the given tasks.
pub async fn board_context_with_tasks(tasks: Vec<Task>) -> (BoardContext, Arc<InMemoryRemote>) {
    let remote = Arc::new(InMemoryRemote::new());
    for task in tasks {
        remote.seed_task(task);
    }
    let ctx = load_context(remote.clone()).await.expect("load fake board");
    remote.clear_calls();
    (ctx, remote)
}

async fn load_context(remote: Arc<InMemoryRemote>) -> Result<BoardContext> {
    BoardContext::load(test_scope(), remote).await
}
