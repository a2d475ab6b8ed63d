//! Core data types for the CPM engine.

use chrono::NaiveDate;
use pyo3::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::critical_path::{FloatCategory, RiskLevel};

/// Opaque task identifier supplied by the caller.
pub type TaskId = i64;

/// A task to be scheduled.
///
/// The `early_*`, `late_*`, `total_float` and `is_critical` fields are outputs.
/// The engine never reads them; they are only written by
/// [`CriticalPathResult::apply_to`].
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: TaskId,
    #[pyo3(get, set)]
    pub title: String,
    /// Duration in days. `None` is scheduled as zero.
    #[pyo3(get, set)]
    pub duration: Option<u32>,
    #[pyo3(get, set)]
    pub start_date: Option<NaiveDate>,
    /// Predecessor task IDs. IDs outside the scheduling scope are ignored.
    #[pyo3(get, set)]
    pub dependencies: Vec<TaskId>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub early_start_day: Option<i64>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub early_finish_day: Option<i64>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub late_start_day: Option<i64>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub late_finish_day: Option<i64>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub total_float: Option<i64>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub is_critical: bool,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (id, title=String::new(), duration=None, start_date=None, dependencies=None))]
    pub fn new(
        id: TaskId,
        title: String,
        duration: Option<u32>,
        start_date: Option<NaiveDate>,
        dependencies: Option<Vec<TaskId>>,
    ) -> Self {
        Self {
            id,
            title,
            duration,
            start_date,
            dependencies: dependencies.unwrap_or_default(),
            early_start_day: None,
            early_finish_day: None,
            late_start_day: None,
            late_finish_day: None,
            total_float: None,
            is_critical: false,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={}, title={:?}, duration={:?}, deps={:?})",
            self.id, self.title, self.duration, self.dependencies
        )
    }
}

impl Task {
    /// Duration used for scheduling (missing duration counts as zero days).
    #[inline]
    pub fn duration_days(&self) -> i64 {
        i64::from(self.duration.unwrap_or(0))
    }
}

/// Compact view of a task as it appears in critical task lists and paths.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    #[pyo3(get)]
    pub id: TaskId,
    #[pyo3(get)]
    pub title: String,
    #[pyo3(get)]
    pub duration: i64,
    #[pyo3(get)]
    pub early_start: i64,
    #[pyo3(get)]
    pub early_finish: i64,
}

#[pymethods]
impl TaskSummary {
    fn __repr__(&self) -> String {
        format!(
            "TaskSummary(id={}, title={:?}, es={}, ef={})",
            self.id, self.title, self.early_start, self.early_finish
        )
    }
}

/// Computed CPM fields for one task. Offsets are days from project day 0.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSchedule {
    #[pyo3(get)]
    pub task_id: TaskId,
    #[pyo3(get)]
    pub early_start: i64,
    #[pyo3(get)]
    pub early_finish: i64,
    #[pyo3(get)]
    pub late_start: i64,
    #[pyo3(get)]
    pub late_finish: i64,
    #[pyo3(get)]
    pub total_float: i64,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl TaskSchedule {
    /// Reporting band for this task's float.
    #[getter]
    fn category(&self) -> &'static str {
        self.float_category().as_str()
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskSchedule(task_id={}, es={}, ef={}, ls={}, lf={}, float={})",
            self.task_id,
            self.early_start,
            self.early_finish,
            self.late_start,
            self.late_finish,
            self.total_float
        )
    }
}

impl TaskSchedule {
    pub fn float_category(&self) -> FloatCategory {
        FloatCategory::from_float(self.total_float)
    }
}

/// Result of one CPM computation over a scheduling scope.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathResult {
    /// Computed fields for every task in scope, in input order.
    #[pyo3(get)]
    pub schedules: Vec<TaskSchedule>,
    #[pyo3(get)]
    pub critical_tasks: Vec<TaskSummary>,
    #[pyo3(get)]
    pub critical_paths: Vec<Vec<TaskSummary>>,
    #[pyo3(get)]
    pub project_duration: i64,
    #[pyo3(get)]
    pub earliest_completion: Option<NaiveDate>,
    #[pyo3(get)]
    pub latest_completion: Option<NaiveDate>,
    #[pyo3(get)]
    pub total_tasks: usize,
    #[pyo3(get)]
    pub critical_tasks_count: usize,
    pub risk_level: RiskLevel,
}

#[pymethods]
impl CriticalPathResult {
    #[getter(risk_level)]
    fn py_risk_level(&self) -> &'static str {
        self.risk_level.as_str()
    }

    #[pyo3(name = "schedule_for")]
    fn py_schedule_for(&self, task_id: TaskId) -> Option<TaskSchedule> {
        self.schedule_for(task_id).cloned()
    }

    fn __repr__(&self) -> String {
        format!(
            "CriticalPathResult(project_duration={}, total_tasks={}, critical={}, paths={}, risk={})",
            self.project_duration,
            self.total_tasks,
            self.critical_tasks_count,
            self.critical_paths.len(),
            self.risk_level.as_str()
        )
    }
}

impl CriticalPathResult {
    /// Result for a scope with no tasks.
    pub fn empty() -> Self {
        Self {
            schedules: Vec::new(),
            critical_tasks: Vec::new(),
            critical_paths: Vec::new(),
            project_duration: 0,
            earliest_completion: None,
            latest_completion: None,
            total_tasks: 0,
            critical_tasks_count: 0,
            risk_level: RiskLevel::Low,
        }
    }

    /// Look up the computed fields for a task.
    pub fn schedule_for(&self, task_id: TaskId) -> Option<&TaskSchedule> {
        self.schedules.iter().find(|s| s.task_id == task_id)
    }

    /// Write computed fields back onto the caller's task records.
    ///
    /// Tasks not covered by this result are left untouched. Returns the number
    /// of tasks updated.
    pub fn apply_to(&self, tasks: &mut [Task]) -> usize {
        apply_schedules(&self.schedules, tasks)
    }
}

/// Copy computed fields onto every task whose ID has a schedule.
pub fn apply_schedules(schedules: &[TaskSchedule], tasks: &mut [Task]) -> usize {
    let by_id: FxHashMap<TaskId, &TaskSchedule> =
        schedules.iter().map(|s| (s.task_id, s)).collect();

    let mut updated = 0;
    for task in tasks.iter_mut() {
        let Some(schedule) = by_id.get(&task.id) else {
            continue;
        };
        task.early_start_day = Some(schedule.early_start);
        task.early_finish_day = Some(schedule.early_finish);
        task.late_start_day = Some(schedule.late_start);
        task.late_finish_day = Some(schedule.late_finish);
        task.total_float = Some(schedule.total_float);
        task.is_critical = schedule.is_critical;
        updated += 1;
    }
    updated
}

/// One row of the float analysis report.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatEntry {
    #[pyo3(get)]
    pub id: TaskId,
    #[pyo3(get)]
    pub title: String,
    #[pyo3(get)]
    pub duration: i64,
    #[pyo3(get)]
    pub total_float: i64,
}

/// Task counts per float band.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatSummary {
    #[pyo3(get)]
    pub critical: usize,
    #[pyo3(get)]
    pub near_critical: usize,
    #[pyo3(get)]
    pub normal: usize,
}

/// Tasks bucketed into critical, near-critical and normal float bands.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatAnalysis {
    #[pyo3(get)]
    pub critical: Vec<FloatEntry>,
    #[pyo3(get)]
    pub near_critical: Vec<FloatEntry>,
    #[pyo3(get)]
    pub normal: Vec<FloatEntry>,
    #[pyo3(get)]
    pub summary: FloatSummary,
}

#[pymethods]
impl FloatAnalysis {
    fn __repr__(&self) -> String {
        format!(
            "FloatAnalysis(critical={}, near_critical={}, normal={})",
            self.summary.critical, self.summary.near_critical, self.summary.normal
        )
    }
}
