//! Task board state and ordering engine
//!
//! This crate is the client-side core of a work-tracking board: an in-memory
//! task store grouped by an inheritable status workflow, an ordering engine
//! for drag moves across list and kanban layouts, and an optimistic sync
//! layer that mirrors every mutation to a remote service and rolls back on
//! failure.
//!
//! ## Overview
//!
//! - **Inherited statuses** - a list inherits its status set from its
//!   project or workspace until it sets a custom one
//! - **Optimistic mutations** - every edit lands locally first; the matching
//!   remote call either confirms it or rolls it back
//! - **Integer ordering** - task order is a plain index, unique within each
//!   status group, renumbered on reorder
//! - **Partial bulk failure** - bulk operations keep their successes and
//!   narrow the selection to the failures
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workdeck_board::{BoardContext, BoardScope, Execute, RemoteApi};
//! use workdeck_board::task::{AddTask, MoveTask};
//!
//! # async fn example(remote: Arc<dyn RemoteApi>) -> Result<(), Box<dyn std::error::Error>> {
//! let scope = BoardScope::new("workspace-1", "project-1", "list-1");
//! let ctx = BoardContext::load(scope, remote).await?;
//!
//! let created = AddTask::new("Draft launch brief").execute(&ctx).await?;
//! let id = created["id"].as_str().unwrap_or_default();
//!
//! // Drag it onto another column at the top
//! MoveTask::drop_on_column(id, "in-progress").execute(&ctx).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Commands return `serde_json::Value` so embedders can forward results to
//! their UI layer without another mapping step.

pub mod auto_color;
mod context;
mod error;
mod operation;
pub mod ordering;
mod registry;
mod remote;
pub mod store;
pub mod sync;
pub mod types;

// Command modules
pub mod bulk;
pub mod status;
pub mod tag;
pub mod task;
pub mod view;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use context::{BoardContext, BoardState};
pub use error::{BoardError, Result};
pub use operation::{async_trait, Execute};
pub use registry::{EffectiveStatuses, StatusRegistry};
pub use remote::{RemoteApi, RemoteError, RemoteResult, StatusPayload};
pub use store::TaskStore;
pub use sync::PendingMutation;

// Re-export commonly used types
pub use ordering::{DropTarget, MoveOutcome, MoveTarget};
pub use types::{
    ActorId, BoardScope, ListId, Priority, ProjectId, ScopeLevel, ScopeRef, SelectionSet, Status,
    StatusId, Tag, TagId, Task, TaskId, TaskPatch, WorkspaceId,
};
pub use view::{ViewFilters, ViewMode, ViewModel};
