//! The `Execute` trait for board commands.
//!
//! Commands are structs where the fields ARE the parameters - no
//! duplication. Each command implements `Execute` against the board context
//! and returns its result as JSON, which is what the surrounding UI layer
//! consumes.

use serde_json::Value;

// Re-export for use in implementations
pub use async_trait::async_trait;

/// Execute a command against a context.
#[async_trait]
pub trait Execute<C, E> {
    async fn execute(&self, ctx: &C) -> std::result::Result<Value, E>;
}
