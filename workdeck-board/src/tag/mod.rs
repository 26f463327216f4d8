//! Tag commands: workspace-scoped label CRUD.

mod add;
mod delete;
mod list;
mod update;

pub use add::AddTag;
pub use delete::DeleteTag;
pub use list::ListTags;
pub use update::UpdateTag;
