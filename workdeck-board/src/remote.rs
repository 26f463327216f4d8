//! Remote persistence contracts.
//!
//! The engine never talks HTTP directly; it consumes the remote service
//! through this trait. Every mutating command applies its change to local
//! state first, then calls the corresponding method here and rolls back if
//! the call fails. The in-memory implementation used by tests lives in
//! [`crate::test_support`].

use crate::types::{
    ListId, ScopeLevel, ScopeRef, Status, StatusId, Tag, TagId, Task, TaskId, TaskPatch,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for remote calls
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Failure of a remote call. A request that hangs until its transport gives
/// up surfaces here as `Transport` once the future resolves; the engine
/// defines no timeouts of its own.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The server processed the request and said no
    #[error("request rejected: {message}")]
    Rejected { message: String },

    /// The request never completed
    #[error("transport failure: {message}")]
    Transport { message: String },
}

impl RemoteError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Response of `GET effective-statuses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusPayload {
    pub statuses: Vec<Status>,
    pub is_custom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<ScopeLevel>,
}

/// The remote operations the board engine consumes, transport-agnostic.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// `GET effective-statuses(scope)`
    async fn fetch_statuses(&self, scope: &ScopeRef) -> RemoteResult<StatusPayload>;

    /// `PUT statuses(scope, statuses)` — replaces the scope's custom set
    async fn put_statuses(&self, scope: &ScopeRef, statuses: &[Status]) -> RemoteResult<()>;

    /// `DELETE statuses(scope)` — resets the scope to inheritance
    async fn delete_statuses(&self, scope: &ScopeRef) -> RemoteResult<()>;

    /// `GET status-task-count(scope, statusId)`
    async fn status_task_count(&self, scope: &ScopeRef, status: &StatusId) -> RemoteResult<usize>;

    /// `POST reassign-status(scope, from, to)` — moves all tasks
    async fn reassign_status(
        &self,
        scope: &ScopeRef,
        from: &StatusId,
        to: &StatusId,
    ) -> RemoteResult<()>;

    /// `GET tasks(listId)`
    async fn fetch_tasks(&self, list: &ListId) -> RemoteResult<Vec<Task>>;

    /// `POST task(listId, fields)` — the client generates the id
    async fn create_task(&self, list: &ListId, task: &Task) -> RemoteResult<()>;

    /// `PUT task(taskId, partialFields)`
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> RemoteResult<()>;

    /// `DELETE task(taskId)` — cascades subtask deletion server-side
    async fn delete_task(&self, id: &TaskId) -> RemoteResult<()>;

    /// `POST reorder(listId, statusId, orderedTaskIds)`
    async fn reorder(
        &self,
        list: &ListId,
        status: &StatusId,
        ordered: &[TaskId],
    ) -> RemoteResult<()>;

    /// `GET tags`
    async fn fetch_tags(&self) -> RemoteResult<Vec<Tag>>;

    /// `POST tag`
    async fn create_tag(&self, tag: &Tag) -> RemoteResult<()>;

    /// `PUT tag`
    async fn update_tag(&self, tag: &Tag) -> RemoteResult<()>;

    /// `DELETE tag(tagId)` — the server strips references from all tasks
    async fn delete_tag(&self, id: &TagId) -> RemoteResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::rejected("stale order");
        assert_eq!(err.to_string(), "request rejected: stale order");
        let err = RemoteError::transport("connection reset");
        assert_eq!(err.to_string(), "transport failure: connection reset");
    }

    #[test]
    fn test_status_payload_serialization() {
        let payload = StatusPayload {
            statuses: Status::defaults(),
            is_custom: false,
            inherited_from: Some(ScopeLevel::Workspace),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["is_custom"], false);
        assert_eq!(json["inherited_from"], "workspace");
        assert_eq!(json["statuses"].as_array().unwrap().len(), 3);
    }
}
