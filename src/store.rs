// File: src/store.rs
use crate::model::Task;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use uuid::Uuid;

/// In-memory collection of tasks. Insertion order is the baseline display
/// order until a reconciliation pass installs a new ordering via
/// [`TaskStore::replace_all`]. Identifiers are unique within the store.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a loaded collection, dropping any duplicate ids
    /// (first occurrence wins) so the uniqueness invariant holds even for a
    /// hand-edited task file.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut store = Self::new();
        for task in tasks {
            if !store.add(task) {
                log::warn!("dropping task with duplicate id while loading");
            }
        }
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a task. Refuses a duplicate id and returns false.
    pub fn add(&mut self, task: Task) -> bool {
        if self.get(&task.id).is_some() {
            return false;
        }
        self.tasks.push(task);
        true
    }

    pub fn get(&self, id: &Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Whole-record replacement keyed by id. Returns false when the id is
    /// not present.
    pub fn update(&mut self, task: Task) -> bool {
        if let Some(idx) = self.tasks.iter().position(|t| t.id == task.id) {
            self.tasks[idx] = task;
            true
        } else {
            false
        }
    }

    pub fn toggle_completed(&mut self, id: &Uuid) -> Option<&Task> {
        let idx = self.tasks.iter().position(|t| t.id == *id)?;
        self.tasks[idx].completed = !self.tasks[idx].completed;
        Some(&self.tasks[idx])
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == *id)?;
        Some(self.tasks.remove(idx))
    }

    /// Finds the single task whose id starts with `prefix` (case-insensitive,
    /// hyphens ignored). `None` when nothing matches or the prefix is
    /// ambiguous.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Task> {
        let needle = prefix.replace('-', "").to_lowercase();
        if needle.is_empty() {
            return None;
        }
        let mut found: Option<&Task> = None;
        for task in &self.tasks {
            if task.id.simple().to_string().starts_with(&needle) {
                if found.is_some() {
                    return None;
                }
                found = Some(task);
            }
        }
        found
    }

    /// Installs a reconciled collection wholesale. The caller guarantees it
    /// came from this store's snapshot, so ids are already unique.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Incomplete tasks, the advisor's input.
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Tasks bucketed by their local planning day, buckets ascending.
    /// Within a bucket, store order is kept.
    pub fn grouped_by_day(&self) -> Vec<(NaiveDate, Vec<&Task>)> {
        let mut groups: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
        for task in &self.tasks {
            groups.entry(task.planning_day()).or_default().push(task);
        }
        groups.into_iter().collect()
    }
}
