//! Property-based tests for critical path invariants.
//!
//! - Topological order covers every task and respects every edge
//! - Timing identities hold for every task
//! - Project duration is reached by a zero-float task and by the late finishes
//! - Recomputation is idempotent
//! - Any back edge makes the computation fail

use cpm_engine::critical_path::{find_cycle, topological_sort, DependencyGraph};
use cpm_engine::{calculate_critical_path, CpmConfig, CpmError, Task, TaskId};
use proptest::prelude::*;
use std::collections::HashMap;

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Map a position to a task ID that is not simply the position.
fn id_for(position: usize) -> TaskId {
    (position as TaskId) * 7 + 3
}

/// Generate a DAG of tasks.
///
/// Dependencies only point at tasks with lower positions, which rules out
/// cycles. Some dependencies reference IDs outside the scope.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<Task>> {
    (1..=max_tasks).prop_flat_map(|count| {
        let tasks = (0..count)
            .map(|pos| {
                let deps = proptest::collection::vec(0..pos.max(1) + 1, 0..=pos.min(4));
                (0u32..10, deps, any::<bool>())
            })
            .collect::<Vec<_>>();
        tasks.prop_map(|drafts| {
            drafts
                .into_iter()
                .enumerate()
                .map(|(pos, (duration, deps, dangling))| {
                    let mut dep_ids: Vec<TaskId> = deps
                        .into_iter()
                        .filter(|&d| d < pos)
                        .map(id_for)
                        .collect();
                    dep_ids.sort_unstable();
                    dep_ids.dedup();
                    if dangling {
                        dep_ids.push(-1);
                    }
                    Task::new(id_for(pos), format!("t{pos}"), Some(duration), None, Some(dep_ids))
                })
                .collect::<Vec<Task>>()
        })
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn topological_order_respects_edges(tasks in dag_strategy(25), stable in any::<bool>()) {
        let graph = DependencyGraph::build(&tasks);
        prop_assert!(find_cycle(&graph).is_none());

        let order = topological_sort(&graph, stable).unwrap();
        prop_assert_eq!(order.len(), tasks.len());

        let position: HashMap<TaskId, usize> = order
            .iter()
            .enumerate()
            .map(|(pos, &idx)| (graph.task_id(idx), pos))
            .collect();
        for task in &tasks {
            for dep in &task.dependencies {
                if let Some(&dep_pos) = position.get(dep) {
                    prop_assert!(dep_pos < position[&task.id]);
                }
            }
        }
    }

    #[test]
    fn timing_identities_hold(tasks in dag_strategy(25)) {
        let result = calculate_critical_path(&tasks, &CpmConfig::default()).unwrap();
        prop_assert_eq!(result.schedules.len(), tasks.len());

        for task in &tasks {
            let s = result.schedule_for(task.id).unwrap();
            let duration = task.duration_days();
            prop_assert_eq!(s.early_finish, s.early_start + duration);
            prop_assert_eq!(s.late_finish, s.late_start + duration);
            prop_assert!(s.total_float >= 0);
            prop_assert_eq!(s.total_float, s.late_start - s.early_start);
            prop_assert_eq!(s.total_float, s.late_finish - s.early_finish);
            prop_assert_eq!(s.is_critical, s.total_float == 0);
        }
    }

    #[test]
    fn project_duration_is_bounded_by_critical_work(tasks in dag_strategy(25)) {
        let result = calculate_critical_path(&tasks, &CpmConfig::default()).unwrap();

        let max_ef = result.schedules.iter().map(|s| s.early_finish).max().unwrap();
        prop_assert_eq!(result.project_duration, max_ef);

        // Some zero-float task finishes exactly at project end.
        prop_assert!(result
            .schedules
            .iter()
            .any(|s| s.is_critical && s.early_finish == result.project_duration));

        // Late finish of every sink equals project duration.
        let has_successor: Vec<TaskId> = tasks
            .iter()
            .flat_map(|t| t.dependencies.iter().copied())
            .collect();
        let sink_max_lf = tasks
            .iter()
            .filter(|t| !has_successor.contains(&t.id))
            .map(|t| result.schedule_for(t.id).unwrap().late_finish)
            .max()
            .unwrap();
        prop_assert_eq!(result.project_duration, sink_max_lf);

        prop_assert!(!result.critical_paths.is_empty());
        prop_assert_eq!(result.critical_tasks_count, result.critical_tasks.len());
        for path in &result.critical_paths {
            for summary in path {
                prop_assert!(result.schedule_for(summary.id).unwrap().is_critical);
            }
        }
    }

    #[test]
    fn recomputation_is_idempotent(tasks in dag_strategy(20)) {
        let config = CpmConfig::default();
        let first = calculate_critical_path(&tasks, &config).unwrap();

        let mut applied = tasks.clone();
        first.apply_to(&mut applied);
        let second = calculate_critical_path(&applied, &config).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn back_edge_is_rejected(tasks in dag_strategy(15)) {
        // First and last task depend on each other (a self-loop for one task).
        let mut tasks = tasks;
        let last_id = tasks[tasks.len() - 1].id;
        let first_id = tasks[0].id;
        tasks[0].dependencies.push(last_id);
        if tasks.len() > 1 {
            let last = tasks.len() - 1;
            tasks[last].dependencies.push(first_id);
        }

        let err = calculate_critical_path(&tasks, &CpmConfig::default()).unwrap_err();
        let is_cycle = matches!(err, CpmError::CyclicDependency { ref cycle } if !cycle.is_empty());
        prop_assert!(is_cycle);
    }
}
