//! Critical path engine: the full CPM pipeline over one scheduling scope.

use thiserror::Error;

use crate::config::CpmConfig;
use crate::interner::TaskIdx;
use crate::models::{CriticalPathResult, FloatAnalysis, FloatEntry, Task, TaskId, TaskSchedule};
use crate::{log_changes, log_checks, log_debug};

use super::classify::{bucket_by_float, compute_float};
use super::cycles::find_cycle;
use super::graph::DependencyGraph;
use super::passes::{backward_pass, forward_pass};
use super::paths::{completion_date, critical_paths, summarize};
use super::topo::topological_sort;
use super::types::{RiskLevel, TaskTiming};

/// Errors that can occur during a critical path computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpmError {
    #[error("cannot schedule: circular dependency involving tasks {cycle:?}")]
    CyclicDependency { cycle: Vec<TaskId> },
    #[error("internal scheduling error: {0}")]
    Internal(String),
}

/// Timings for every task of an acyclic scope.
struct Timings {
    order: Vec<TaskIdx>,
    timings: Vec<TaskTiming>,
    project_duration: i64,
    critical_count: usize,
}

/// Runs the CPM pipeline over a task snapshot.
///
/// Graph building happens once in [`CriticalPathEngine::new`]; each call to
/// [`calculate`](Self::calculate) recomputes everything from scratch and
/// never reads the computed fields already stored on the tasks.
pub struct CriticalPathEngine<'a> {
    graph: DependencyGraph<'a>,
    config: CpmConfig,
}

impl<'a> CriticalPathEngine<'a> {
    pub fn new(tasks: &'a [Task], config: CpmConfig) -> Self {
        let mut graph = DependencyGraph::build(tasks);
        if config.stable_order {
            graph.sort_by_id();
        }
        log_checks!(
            config.verbosity,
            tasks = graph.len(),
            edges = graph.edge_count(),
            "built dependency graph"
        );
        Self { graph, config }
    }

    /// Compute timings, float, criticality and critical paths.
    pub fn calculate(&self) -> Result<CriticalPathResult, CpmError> {
        if self.graph.is_empty() {
            log_changes!(self.config.verbosity, "empty scope, nothing to schedule");
            return Ok(CriticalPathResult::empty());
        }

        let Timings {
            order,
            timings,
            project_duration,
            critical_count,
        } = self.compute_timings()?;

        let graph = &self.graph;
        let critical: Vec<bool> = timings.iter().map(TaskTiming::is_critical).collect();

        let schedules: Vec<TaskSchedule> = graph
            .nodes()
            .map(|idx| {
                let t = &timings[idx as usize];
                TaskSchedule {
                    task_id: graph.task_id(idx),
                    early_start: t.early_start,
                    early_finish: t.early_finish,
                    late_start: t.late_start,
                    late_finish: t.late_finish,
                    total_float: t.total_float,
                    is_critical: t.is_critical(),
                }
            })
            .collect();

        let critical_order: Vec<TaskIdx> = if self.config.stable_order {
            order.iter().copied().filter(|&idx| critical[idx as usize]).collect()
        } else {
            graph.nodes().filter(|&idx| critical[idx as usize]).collect()
        };
        let critical_tasks = critical_order
            .iter()
            .map(|&idx| summarize(graph, &timings, idx))
            .collect();

        let critical_paths: Vec<Vec<_>> =
            critical_paths(graph, &critical, self.config.stable_order)
                .into_iter()
                .map(|path| {
                    path.into_iter()
                        .map(|idx| summarize(graph, &timings, idx))
                        .collect()
                })
                .collect();

        let earliest_completion = completion_date(graph, project_duration);
        let total_tasks = graph.len();
        let risk_level = RiskLevel::from_counts(critical_count, total_tasks);

        log_changes!(
            self.config.verbosity,
            project_duration,
            critical_count,
            paths = critical_paths.len(),
            risk = risk_level.as_str(),
            "critical path calculated"
        );

        Ok(CriticalPathResult {
            schedules,
            critical_tasks,
            critical_paths,
            project_duration,
            earliest_completion,
            // No separate late-schedule calendar is modelled.
            latest_completion: earliest_completion,
            total_tasks,
            critical_tasks_count: critical_count,
            risk_level,
        })
    }

    /// Bucket every task by float band for reporting.
    pub fn float_analysis(&self) -> Result<FloatAnalysis, CpmError> {
        if self.graph.is_empty() {
            return Ok(FloatAnalysis::default());
        }
        let Timings { timings, .. } = self.compute_timings()?;

        let graph = &self.graph;
        Ok(bucket_by_float(graph.nodes().map(|idx| {
            let task = graph.task(idx);
            FloatEntry {
                id: task.id,
                title: task.title.clone(),
                duration: graph.duration(idx),
                total_float: timings[idx as usize].total_float,
            }
        })))
    }

    fn compute_timings(&self) -> Result<Timings, CpmError> {
        let graph = &self.graph;
        let verbosity = self.config.verbosity;

        if let Some(cycle) = find_cycle(graph) {
            let cycle: Vec<TaskId> = cycle.into_iter().map(|idx| graph.task_id(idx)).collect();
            log_changes!(verbosity, ?cycle, "circular dependency detected");
            return Err(CpmError::CyclicDependency { cycle });
        }

        let order = topological_sort(graph, self.config.stable_order)?;
        let (mut timings, project_duration) = forward_pass(graph, &order);
        backward_pass(graph, &order, project_duration, &mut timings);
        let critical_count = compute_float(&mut timings);

        for &idx in &order {
            let t = &timings[idx as usize];
            log_debug!(
                verbosity,
                task = graph.task_id(idx),
                es = t.early_start,
                ef = t.early_finish,
                ls = t.late_start,
                lf = t.late_finish,
                float = t.total_float,
                "task timing"
            );
        }
        log_checks!(
            verbosity,
            project_duration,
            critical_count,
            "forward and backward passes complete"
        );

        Ok(Timings {
            order,
            timings,
            project_duration,
            critical_count,
        })
    }
}

/// Run the CPM pipeline over `tasks`.
pub fn calculate_critical_path(
    tasks: &[Task],
    config: &CpmConfig,
) -> Result<CriticalPathResult, CpmError> {
    CriticalPathEngine::new(tasks, config.clone()).calculate()
}

/// Bucket `tasks` into critical, near-critical and normal float bands.
pub fn analyze_float(tasks: &[Task], config: &CpmConfig) -> Result<FloatAnalysis, CpmError> {
    CriticalPathEngine::new(tasks, config.clone()).float_analysis()
}
