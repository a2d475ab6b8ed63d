//! Dependency graph construction.

use crate::interner::{TaskIdInterner, TaskIdx};
use crate::models::{Task, TaskId};

/// Forward and reverse adjacency for one scheduling scope.
///
/// Built once per computation; all per-task data is indexed by the dense
/// index handed out by `index`, in first-seen input order.
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    /// Task ID <-> dense index mapping.
    pub index: TaskIdInterner,
    /// Task records indexed by dense index.
    pub tasks: Vec<&'a Task>,
    /// Scheduling durations indexed by dense index.
    pub durations: Vec<i64>,
    /// predecessor -> successors
    pub successors: Vec<Vec<TaskIdx>>,
    /// successor -> predecessors
    pub predecessors: Vec<Vec<TaskIdx>>,
}

impl<'a> DependencyGraph<'a> {
    /// Build the graph from a task snapshot.
    ///
    /// Dependencies on IDs outside `tasks` are dropped. If an ID occurs more
    /// than once, the last record wins.
    pub fn build(tasks: &'a [Task]) -> Self {
        let mut index = TaskIdInterner::with_capacity(tasks.len());
        let mut records: Vec<&'a Task> = Vec::with_capacity(tasks.len());

        for task in tasks {
            let idx = index.intern(task.id) as usize;
            if idx == records.len() {
                records.push(task);
            } else {
                records[idx] = task;
            }
        }

        let n = records.len();
        let durations: Vec<i64> = records.iter().map(|t| t.duration_days()).collect();
        let mut successors: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];
        let mut predecessors: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];

        for (idx, task) in records.iter().enumerate() {
            for &dep_id in &task.dependencies {
                let Some(dep_idx) = index.get(dep_id) else {
                    continue;
                };
                successors[dep_idx as usize].push(idx as TaskIdx);
                predecessors[idx].push(dep_idx);
            }
        }

        Self {
            index,
            tasks: records,
            durations,
            successors,
            predecessors,
        }
    }

    /// Order every adjacency list by task ID so traversals are reproducible.
    pub fn sort_by_id(&mut self) {
        let index = &self.index;
        for list in self
            .successors
            .iter_mut()
            .chain(self.predecessors.iter_mut())
        {
            list.sort_by_key(|&idx| index.resolve(idx));
        }
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of in-scope dependency edges.
    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    #[inline]
    pub fn task_id(&self, idx: TaskIdx) -> TaskId {
        self.index.resolve(idx)
    }

    #[inline]
    pub fn task(&self, idx: TaskIdx) -> &'a Task {
        self.tasks[idx as usize]
    }

    #[inline]
    pub fn duration(&self, idx: TaskIdx) -> i64 {
        self.durations[idx as usize]
    }

    #[inline]
    pub fn successors(&self, idx: TaskIdx) -> &[TaskIdx] {
        &self.successors[idx as usize]
    }

    #[inline]
    pub fn predecessors(&self, idx: TaskIdx) -> &[TaskIdx] {
        &self.predecessors[idx as usize]
    }

    /// All dense indices, in input order.
    pub fn nodes(&self) -> impl Iterator<Item = TaskIdx> {
        0..self.len() as TaskIdx
    }
}
