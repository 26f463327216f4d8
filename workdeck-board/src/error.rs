//! Error types for the board engine

use crate::remote::RemoteError;
use crate::types::{ScopeLevel, TaskId};
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations.
///
/// Validation errors are surfaced synchronously before any remote call, so a
/// validation failure never leaves optimistic state behind. Remote failures
/// are surfaced after the local state has been rolled back. All variants are
/// recoverable; none are fatal to the application.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A required name field was empty
    #[error("{field} must not be empty")]
    EmptyName { field: String },

    /// A status set must contain at least one status
    #[error("a status set must contain at least one status")]
    EmptySet,

    /// The last status in a set cannot be deleted
    #[error("cannot delete the last status in a set")]
    LastStatus,

    /// A referenced status cannot be deleted without reassignment
    #[error("status '{id}' is referenced by {count} tasks and cannot be deleted without reassignment")]
    StatusInUse { id: String, count: usize },

    /// Status not found in the effective set
    #[error("status not found: {id}")]
    StatusNotFound { id: String },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Tag not found
    #[error("tag not found: {id}")]
    TagNotFound { id: String },

    /// Duplicate name
    #[error("duplicate {item_type}: {name}")]
    Duplicate { item_type: String, name: String },

    /// The operation is not valid at this scope level
    #[error("the {level} scope cannot {action}")]
    InvalidScope { level: ScopeLevel, action: String },

    /// The drop target or move destination is invalid
    #[error("invalid move target: {message}")]
    InvalidTarget { message: String },

    /// Some per-task requests of a bulk operation failed; successes were
    /// kept and the selection now holds the failed ids.
    #[error("bulk operation partially failed: {applied} of {attempted} applied, {} failed", .failed.len())]
    PartialBulk {
        applied: usize,
        attempted: usize,
        failed: Vec<TaskId>,
    },

    /// The remote service rejected a mutation; local state was rolled back
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create an empty-name validation error
    pub fn empty_name(field: impl Into<String>) -> Self {
        Self::EmptyName {
            field: field.into(),
        }
    }

    /// Create an invalid-target error
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            message: message.into(),
        }
    }

    /// Create a duplicate-name error
    pub fn duplicate(item_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            item_type: item_type.into(),
            name: name.into(),
        }
    }

}
