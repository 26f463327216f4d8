//! TaskStore - the in-memory task collection for the active list.
//!
//! Tasks are held flat, keyed by id. Only the ordering engine, the sync
//! controller and the bulk coordinator mutate the store; views read derived
//! projections. The store is `Clone` so a whole-store snapshot is the unit
//! of optimistic rollback.

use crate::error::{BoardError, Result};
use crate::types::{Status, StatusId, TagId, Task, TaskId};
use std::collections::HashMap;

/// In-memory collection of the active list's tasks (subtasks included).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: HashMap<TaskId, Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a fetched task list.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: tasks.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Fetch a task or fail with `TaskNotFound`.
    pub fn require(&self, id: &TaskId) -> Result<&Task> {
        self.tasks.get(id).ok_or_else(|| BoardError::TaskNotFound {
            id: id.to_string(),
        })
    }

    pub(crate) fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    pub(crate) fn insert(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    /// Remove a task and all of its subtasks. Returns the removed ids, the
    /// task itself first.
    pub(crate) fn remove_with_subtasks(&mut self, id: &TaskId) -> Vec<TaskId> {
        let mut removed = Vec::new();
        if self.tasks.remove(id).is_some() {
            removed.push(id.clone());
            let children: Vec<TaskId> = self
                .tasks
                .values()
                .filter(|t| t.parent_task_id.as_ref() == Some(id))
                .map(|t| t.id.clone())
                .collect();
            for child in children {
                self.tasks.remove(&child);
                removed.push(child);
            }
        }
        removed
    }

    /// All tasks, unordered.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Direct subtasks of a task, sorted by order.
    pub fn subtasks_of(&self, id: &TaskId) -> Vec<&Task> {
        let mut subs: Vec<&Task> = self
            .tasks
            .values()
            .filter(|t| t.parent_task_id.as_ref() == Some(id))
            .collect();
        subs.sort_by_key(|t| t.order);
        subs
    }

    /// Top-level tasks of one status group, sorted by order ascending.
    pub fn group(&self, status: &StatusId) -> Vec<&Task> {
        let mut group: Vec<&Task> = self
            .tasks
            .values()
            .filter(|t| !t.is_subtask() && &t.status_id == status)
            .collect();
        group.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        group
    }

    /// Ordered ids of one status group.
    pub fn group_ids(&self, status: &StatusId) -> Vec<TaskId> {
        self.group(status).into_iter().map(|t| t.id.clone()).collect()
    }

    /// The canonical grouping used by every view: status id to that group's
    /// tasks, sorted by order ascending. Subtasks are excluded.
    pub fn group_by_status(&self) -> HashMap<StatusId, Vec<&Task>> {
        let mut groups: HashMap<StatusId, Vec<&Task>> = HashMap::new();
        for task in self.tasks.values().filter(|t| !t.is_subtask()) {
            groups.entry(task.status_id.clone()).or_default().push(task);
        }
        for group in groups.values_mut() {
            group.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        }
        groups
    }

    /// Progress of a task: completed subtasks / total subtasks, 0 when it
    /// has none. A subtask counts as completed when its status is terminal.
    /// Pure derived value, never stored.
    pub fn progress_of(&self, id: &TaskId, statuses: &[Status]) -> f64 {
        let subs = self.subtasks_of(id);
        if subs.is_empty() {
            return 0.0;
        }
        let completed = subs
            .iter()
            .filter(|t| {
                statuses
                    .iter()
                    .any(|s| s.id == t.status_id && s.is_final)
            })
            .count();
        completed as f64 / subs.len() as f64
    }

    /// Order for a task appended to the end of a group.
    pub fn next_order(&self, status: &StatusId) -> usize {
        self.group(status)
            .last()
            .map(|t| t.order + 1)
            .unwrap_or(0)
    }

    /// Renumber a group's orders to 0..N-1, preserving relative order.
    pub(crate) fn renumber_group(&mut self, status: &StatusId) {
        let ids = self.group_ids(status);
        for (i, id) in ids.iter().enumerate() {
            if let Some(task) = self.tasks.get_mut(id) {
                task.order = i;
            }
        }
    }

    /// Move every task referencing `from` to `to`, appending at the end of
    /// the target group in the source group's order. Returns how many tasks
    /// moved (subtasks included).
    pub(crate) fn reassign_status(&mut self, from: &StatusId, to: &StatusId) -> usize {
        let mut moved: Vec<(usize, TaskId)> = self
            .tasks
            .values()
            .filter(|t| &t.status_id == from)
            .map(|t| (t.order, t.id.clone()))
            .collect();
        moved.sort();

        let mut next = self.next_order(to);
        for (_, id) in &moved {
            if let Some(task) = self.tasks.get_mut(id) {
                task.status_id = to.clone();
                task.order = next;
                next += 1;
            }
        }
        moved.len()
    }

    /// Count tasks (subtasks included) referencing a status.
    pub fn count_with_status(&self, status: &StatusId) -> usize {
        self.tasks.values().filter(|t| &t.status_id == status).count()
    }

    /// Strip a deleted tag from every task. Returns affected task ids.
    pub(crate) fn remove_tag_refs(&mut self, tag: &TagId) -> Vec<TaskId> {
        let mut affected = Vec::new();
        for task in self.tasks.values_mut() {
            if task.tags.remove(tag) {
                affected.push(task.id.clone());
            }
        }
        affected.sort();
        affected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn store_with(tasks: Vec<Task>) -> TaskStore {
        TaskStore::from_tasks(tasks)
    }

    #[test]
    fn test_group_sorted_by_order() {
        let mut b = Task::new("B", "todo", 1);
        b.id = TaskId::from_string("b");
        let mut a = Task::new("A", "todo", 0);
        a.id = TaskId::from_string("a");
        let store = store_with(vec![b, a]);

        let group = store.group(&StatusId::from_string("todo"));
        let titles: Vec<&str> = group.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_group_excludes_subtasks() {
        let parent = Task::new("Parent", "todo", 0);
        let sub = Task::new("Sub", "todo", 0).with_parent(parent.id.clone());
        let store = store_with(vec![parent.clone(), sub]);

        let group = store.group(&StatusId::from_string("todo"));
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].id, parent.id);
        assert_eq!(store.subtasks_of(&parent.id).len(), 1);
    }

    #[test]
    fn test_progress_of() {
        let statuses = Status::defaults();
        let parent = Task::new("Parent", "todo", 0);
        let s1 = Task::new("S1", "complete", 0).with_parent(parent.id.clone());
        let s2 = Task::new("S2", "todo", 1).with_parent(parent.id.clone());
        let store = store_with(vec![parent.clone(), s1, s2]);

        assert_eq!(store.progress_of(&parent.id, &statuses), 0.5);

        // No subtasks -> 0
        let lone = Task::new("Lone", "todo", 1);
        let store = store_with(vec![lone.clone()]);
        assert_eq!(store.progress_of(&lone.id, &statuses), 0.0);
    }

    #[test]
    fn test_remove_with_subtasks_cascades() {
        let parent = Task::new("Parent", "todo", 0);
        let sub = Task::new("Sub", "todo", 0).with_parent(parent.id.clone());
        let other = Task::new("Other", "todo", 1);
        let mut store = store_with(vec![parent.clone(), sub.clone(), other.clone()]);

        let removed = store.remove_with_subtasks(&parent.id);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0], parent.id);
        assert!(!store.contains(&sub.id));
        assert!(store.contains(&other.id));
    }

    #[test]
    fn test_next_order() {
        let todo = StatusId::from_string("todo");
        let mut store = store_with(vec![]);
        assert_eq!(store.next_order(&todo), 0);

        store.insert(Task::new("A", "todo", 0));
        store.insert(Task::new("B", "todo", 1));
        assert_eq!(store.next_order(&todo), 2);
    }

    #[test]
    fn test_renumber_group_closes_gaps() {
        let todo = StatusId::from_string("todo");
        let mut a = Task::new("A", "todo", 2);
        a.id = TaskId::from_string("a");
        let mut b = Task::new("B", "todo", 5);
        b.id = TaskId::from_string("b");
        let mut store = store_with(vec![a, b]);

        store.renumber_group(&todo);
        let orders: Vec<usize> = store.group(&todo).iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn test_reassign_status_appends() {
        let from = StatusId::from_string("todo");
        let to = StatusId::from_string("doing");
        let mut store = store_with(vec![
            Task::new("A", "todo", 0),
            Task::new("B", "todo", 1),
            Task::new("Existing", "doing", 0),
        ]);

        let moved = store.reassign_status(&from, &to);
        assert_eq!(moved, 2);
        assert_eq!(store.count_with_status(&from), 0);
        let group = store.group(&to);
        assert_eq!(group.len(), 3);
        assert_eq!(group[0].title, "Existing");
    }

    #[test]
    fn test_reassign_status_preserves_source_order() {
        let from = StatusId::from_string("todo");
        let to = StatusId::from_string("doing");
        let mut tasks = Vec::new();
        for i in 0..8usize {
            let mut task = Task::new(format!("T{i}"), "todo", i);
            task.id = TaskId::from_string(format!("t-{i}"));
            tasks.push(task);
        }
        let mut store = store_with(tasks);

        store.reassign_status(&from, &to);
        let titles: Vec<String> = store.group(&to).iter().map(|t| t.title.clone()).collect();
        let expected: Vec<String> = (0..8).map(|i| format!("T{i}")).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_remove_tag_refs() {
        let tag = TagId::from_string("bug");
        let mut a = Task::new("A", "todo", 0);
        a.tags.insert(tag.clone());
        let b = Task::new("B", "todo", 1);
        let mut store = store_with(vec![a.clone(), b]);

        let affected = store.remove_tag_refs(&tag);
        assert_eq!(affected, vec![a.id.clone()]);
        assert!(store.get(&a.id).unwrap().tags.is_empty());
    }
}
