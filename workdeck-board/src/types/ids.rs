//! ID wrapper types for type-safe identifiers.
//!
//! Entity ids (tasks, statuses, tags) are ULID strings generated client-side
//! so optimistic creates never wait on the server for an id. Scope ids
//! (workspace, project, list) are opaque strings assigned by the remote
//! service and only ever wrapped with `from_string`.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new ULID-backed id.
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an existing id string.
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// The id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_string(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifies a task.
    TaskId
);
string_id!(
    /// Identifies a status (workflow state) within a status set.
    StatusId
);
string_id!(
    /// Identifies a workspace-scoped tag.
    TagId
);
string_id!(
    /// Identifies a person a task can be assigned to.
    ActorId
);
string_id!(
    /// Identifies a workspace.
    WorkspaceId
);
string_id!(
    /// Identifies a project within a workspace.
    ProjectId
);
string_id!(
    /// Identifies a list within a project.
    ListId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_ulids() {
        let id = TaskId::new();
        // ULID string form is 26 Crockford Base32 characters
        assert_eq!(id.as_str().len(), 26);
        assert_ne!(id, TaskId::new());
    }

    #[test]
    fn test_from_string_round_trip() {
        let id = StatusId::from_string("todo");
        assert_eq!(id.as_str(), "todo");
        assert_eq!(id.to_string(), "todo");
    }

    #[test]
    fn test_serde_transparent() {
        let id = TagId::from_string("bug");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bug\"");
        let parsed: TagId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
