//! Optimistic two-phase commit: local apply, remote confirm or rollback.
//!
//! Every mutating command follows the same protocol: snapshot the state,
//! apply the mutation locally so views re-render immediately, issue the
//! remote request, and either commit (drop the snapshot) or roll the state
//! back to exactly the snapshot. Concurrent in-flight mutations each hold
//! their own snapshot; rollback and commit are independent per mutation.

/// Snapshot-holding handle for one optimistic mutation.
///
/// `begin` before the local apply; `commit` on remote success; `rollback`
/// on remote failure to restore the pre-mutation state.
#[derive(Debug)]
pub struct PendingMutation<T: Clone> {
    snapshot: T,
}

impl<T: Clone> PendingMutation<T> {
    /// Snapshot the current state before applying the mutation.
    pub fn begin(state: &T) -> Self {
        Self {
            snapshot: state.clone(),
        }
    }

    /// The remote confirmed; local state is already correct.
    pub fn commit(self) {}

    /// The remote rejected; restore the pre-mutation state exactly.
    pub fn rollback(self, state: &mut T) {
        *state = self.snapshot;
    }

    /// Read access to the held snapshot.
    pub fn snapshot(&self) -> &T {
        &self.snapshot
    }
}
