//! Core types for the board engine

mod ids;
mod scope;
mod selection;
mod status;
mod tag;
mod task;

// Re-export all types
pub use ids::{ActorId, ListId, ProjectId, StatusId, TagId, TaskId, WorkspaceId};
pub use scope::{BoardScope, ScopeLevel, ScopeRef};
pub use selection::SelectionSet;
pub use status::{renumber, Status};
pub use tag::Tag;
pub use task::{Priority, Task, TaskPatch};
