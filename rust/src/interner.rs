//! Dense indexing of task IDs.
//!
//! Maps caller-supplied task IDs to contiguous integers so the scheduling
//! passes can use plain `Vec` storage instead of hash lookups.

use rustc_hash::FxHashMap;

use crate::models::TaskId;

/// Dense task index (u32 for compact storage).
pub type TaskIdx = u32;

/// Bidirectional mapping between task IDs and dense indices.
#[derive(Debug, Clone)]
pub struct TaskIdInterner {
    to_idx: FxHashMap<TaskId, TaskIdx>,
    from_idx: Vec<TaskId>,
}

impl TaskIdInterner {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_idx: Vec::with_capacity(capacity),
        }
    }

    /// Intern a task ID, returning its dense index.
    /// If already interned, returns the existing index.
    pub fn intern(&mut self, id: TaskId) -> TaskIdx {
        if let Some(&idx) = self.to_idx.get(&id) {
            return idx;
        }
        let idx = self.from_idx.len() as TaskIdx;
        self.from_idx.push(id);
        self.to_idx.insert(id, idx);
        idx
    }

    /// Get the dense index for a task ID, if it exists.
    #[inline]
    pub fn get(&self, id: TaskId) -> Option<TaskIdx> {
        self.to_idx.get(&id).copied()
    }

    /// Get the task ID for a dense index.
    #[inline]
    pub fn resolve(&self, idx: TaskIdx) -> TaskId {
        self.from_idx[idx as usize]
    }

    /// Number of interned IDs.
    pub fn len(&self) -> usize {
        self.from_idx.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.from_idx.is_empty()
    }
}

impl Default for TaskIdInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
