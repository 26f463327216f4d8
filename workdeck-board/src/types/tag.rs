//! Tag type: workspace-scoped labels referenced by id from tasks.

use super::ids::TagId;
use serde::{Deserialize, Serialize};

/// A tag categorizes tasks across the whole workspace.
///
/// Color defaults to a deterministic auto-color based on the name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// 6-character hex color code without #
    pub color: String,
}

impl Tag {
    /// Create a new tag with a ULID and auto-color based on name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let color = crate::auto_color::auto_color(&name).to_string();
        Self {
            id: TagId::new(),
            name,
            color,
        }
    }

    /// Create a new tag with an explicit color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}
