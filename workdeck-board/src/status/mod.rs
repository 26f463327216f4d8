//! Status commands: resolve, customize, reset and delete status sets.

mod delete;
mod reset;
mod resolve;
mod set_custom;

pub use delete::DeleteStatus;
pub use reset::ResetStatuses;
pub use resolve::ResolveStatuses;
pub use set_custom::SetCustomStatuses;
