//! Persistence seam between the engine and the caller's task storage.
//!
//! The engine itself is pure. Storage is reached only through [`TaskStore`]:
//! one read of the whole scope before computing and, when requested, one
//! batch write of the computed fields afterwards.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::info;

use crate::config::CpmConfig;
use crate::critical_path::{calculate_critical_path, CpmError};
use crate::models::{apply_schedules, CriticalPathResult, Task, TaskSchedule};

/// Identifier of a scheduling scope (e.g. one project).
pub type ScopeId = i64;

/// Errors from loading, computing or persisting a scope.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Scheduling scope not found: {0}")]
    ScopeNotFound(ScopeId),
    #[error("Storage backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Engine(#[from] CpmError),
}

/// Storage collaborator providing task snapshots and accepting computed fields.
pub trait TaskStore {
    /// All tasks of `scope`, each with its predecessor IDs.
    fn load_scope(&self, scope: ScopeId) -> Result<Vec<Task>, StoreError>;

    /// Persist computed fields for `scope` in a single batch.
    fn write_schedules(
        &mut self,
        scope: ScopeId,
        schedules: &[TaskSchedule],
    ) -> Result<(), StoreError>;
}

/// Compute the schedule for `scope` without writing anything back.
pub fn preview<S: TaskStore + ?Sized>(
    store: &S,
    scope: ScopeId,
    config: &CpmConfig,
) -> Result<CriticalPathResult, StoreError> {
    let tasks = store.load_scope(scope)?;
    Ok(calculate_critical_path(&tasks, config)?)
}

/// Compute the schedule for `scope` and persist it in one batch write.
///
/// Nothing is written if the computation fails.
pub fn compute_and_persist<S: TaskStore + ?Sized>(
    store: &mut S,
    scope: ScopeId,
    config: &CpmConfig,
) -> Result<CriticalPathResult, StoreError> {
    let result = preview(&*store, scope, config)?;
    store.write_schedules(scope, &result.schedules)?;
    info!(
        scope,
        tasks = result.total_tasks,
        project_duration = result.project_duration,
        "persisted critical path schedule"
    );
    Ok(result)
}

/// Task storage held in memory, keyed by scope.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    scopes: FxHashMap<ScopeId, Vec<Task>>,
    batch_writes: usize,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tasks of `scope`.
    pub fn insert_scope(&mut self, scope: ScopeId, tasks: Vec<Task>) {
        self.scopes.insert(scope, tasks);
    }

    pub fn tasks(&self, scope: ScopeId) -> Option<&[Task]> {
        self.scopes.get(&scope).map(Vec::as_slice)
    }

    /// Number of successful `write_schedules` calls.
    pub fn batch_writes(&self) -> usize {
        self.batch_writes
    }
}

impl TaskStore for InMemoryTaskStore {
    fn load_scope(&self, scope: ScopeId) -> Result<Vec<Task>, StoreError> {
        self.scopes
            .get(&scope)
            .cloned()
            .ok_or(StoreError::ScopeNotFound(scope))
    }

    fn write_schedules(
        &mut self,
        scope: ScopeId,
        schedules: &[TaskSchedule],
    ) -> Result<(), StoreError> {
        let tasks = self
            .scopes
            .get_mut(&scope)
            .ok_or(StoreError::ScopeNotFound(scope))?;
        apply_schedules(schedules, tasks);
        self.batch_writes += 1;
        Ok(())
    }
}
