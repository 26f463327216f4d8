//! Read-side projections of the board.
//!
//! Everything here is derived. The projector reads the task store and the
//! effective status set and produces a view model without touching stored
//! order, so any number of views can be rebuilt from the same state.

mod filter;
mod gantt;
mod model;
mod project;

pub use filter::ViewFilters;
pub use gantt::gantt_window;
pub use model::{DateWindow, GanttRow, StatusGroup, TaskCard, ViewMode, ViewModel};
pub use project::{project, ProjectView};
