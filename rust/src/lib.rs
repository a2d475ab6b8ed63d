//! Critical Path Method scheduling engine.
//!
//! Given a snapshot of tasks and their predecessor links, computes early and
//! late start/finish offsets, total float, criticality and every critical
//! path. The engine is a pure function of its input; writing computed fields
//! back to storage is a separate, explicit step (see [`store`]).

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use rustc_hash::FxHashMap;

mod config;
pub mod critical_path;
pub mod interner;
pub mod logging;
mod models;
pub mod store;

pub use config::CpmConfig;
pub use critical_path::{
    analyze_float, calculate_critical_path, CpmError, CriticalPathEngine, FloatCategory, RiskLevel,
};
pub use models::{
    apply_schedules, CriticalPathResult, FloatAnalysis, FloatEntry, FloatSummary, Task, TaskId,
    TaskSchedule, TaskSummary,
};
pub use store::{compute_and_persist, preview, InMemoryTaskStore, ScopeId, StoreError, TaskStore};

/// Run the critical path calculation over one scheduling scope.
///
/// # Arguments
/// * `tasks` - All tasks in scope, each with its predecessor IDs
/// * `config` - Engine configuration (defaults if omitted)
///
/// # Returns
/// * CriticalPathResult with per-task timings, critical paths and project metrics
///
/// # Raises
/// * ValueError if a circular dependency is detected
#[pyfunction]
#[pyo3(name = "calculate_critical_path", signature = (tasks, config=None))]
fn py_calculate_critical_path(
    tasks: Vec<Task>,
    config: Option<CpmConfig>,
) -> PyResult<CriticalPathResult> {
    let config = config.unwrap_or_default();
    calculate_critical_path(&tasks, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Bucket tasks into critical, near-critical and normal float bands.
///
/// # Raises
/// * ValueError if a circular dependency is detected
#[pyfunction]
#[pyo3(name = "float_analysis", signature = (tasks, config=None))]
fn py_float_analysis(tasks: Vec<Task>, config: Option<CpmConfig>) -> PyResult<FloatAnalysis> {
    let config = config.unwrap_or_default();
    analyze_float(&tasks, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Compute the schedule and write it back onto the given task objects.
///
/// Fields are written only after the whole computation succeeds.
///
/// # Raises
/// * ValueError if a circular dependency is detected
#[pyfunction]
#[pyo3(name = "calculate_and_apply", signature = (tasks, config=None))]
fn py_calculate_and_apply(
    py: Python<'_>,
    tasks: Vec<Py<Task>>,
    config: Option<CpmConfig>,
) -> PyResult<CriticalPathResult> {
    let config = config.unwrap_or_default();
    let snapshot: Vec<Task> = tasks.iter().map(|t| t.borrow(py).clone()).collect();
    let result = calculate_critical_path(&snapshot, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;

    let by_id: FxHashMap<TaskId, &TaskSchedule> =
        result.schedules.iter().map(|s| (s.task_id, s)).collect();
    for task in &tasks {
        let mut task = task.borrow_mut(py);
        if let Some(&schedule) = by_id.get(&task.id) {
            apply_schedules(std::slice::from_ref(schedule), std::slice::from_mut(&mut *task));
        }
    }
    Ok(result)
}

/// Install a stderr log subscriber. Returns False if one was already installed.
#[pyfunction]
#[pyo3(name = "enable_logging", signature = (level=None))]
fn py_enable_logging(level: Option<String>) -> bool {
    logging::init_logging(level.as_deref())
}

/// The cpm_engine Python module.
#[pymodule]
fn cpm_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Task>()?;
    m.add_class::<TaskSummary>()?;
    m.add_class::<TaskSchedule>()?;
    m.add_class::<CriticalPathResult>()?;
    m.add_class::<FloatEntry>()?;
    m.add_class::<FloatSummary>()?;
    m.add_class::<FloatAnalysis>()?;

    // Config types
    m.add_class::<CpmConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_calculate_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(py_float_analysis, m)?)?;
    m.add_function(wrap_pyfunction!(py_calculate_and_apply, m)?)?;
    m.add_function(wrap_pyfunction!(py_enable_logging, m)?)?;

    Ok(())
}
