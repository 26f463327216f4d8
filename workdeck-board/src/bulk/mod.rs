//! Bulk operations over the selection set.
//!
//! Per-task remote requests fan out concurrently; the coordinator waits for
//! every outcome before reporting. Successes stay applied, failures are
//! reverted individually, and the selection set narrows to the failures so
//! the user can retry just those.

mod set_status;
mod tag;

pub use set_status::BulkSetStatus;
pub use tag::{BulkTag, TagAction};
