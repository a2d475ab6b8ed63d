//! Forward and backward scheduling passes.

use crate::interner::TaskIdx;

use super::graph::DependencyGraph;
use super::types::TaskTiming;

/// Forward pass: compute early start/finish for every task.
///
/// `order` must be topological, so each predecessor is final before its
/// successors are visited. Returns the timings (indexed by dense index) and
/// the project duration, the largest early finish.
pub fn forward_pass(graph: &DependencyGraph<'_>, order: &[TaskIdx]) -> (Vec<TaskTiming>, i64) {
    let mut timings = vec![TaskTiming::default(); graph.len()];
    let mut project_duration = 0;

    for &idx in order {
        // Early start = max of all predecessor finish times
        let early_start = graph
            .predecessors(idx)
            .iter()
            .map(|&pred| timings[pred as usize].early_finish)
            .max()
            .unwrap_or(0);

        let early_finish = early_start + graph.duration(idx);
        let timing = &mut timings[idx as usize];
        timing.early_start = early_start;
        timing.early_finish = early_finish;

        project_duration = project_duration.max(early_finish);
    }

    (timings, project_duration)
}

/// Backward pass: compute late start/finish for every task.
///
/// Visits `order` in reverse so each successor is final first. Tasks with no
/// successors must finish by `project_duration`.
pub fn backward_pass(
    graph: &DependencyGraph<'_>,
    order: &[TaskIdx],
    project_duration: i64,
    timings: &mut [TaskTiming],
) {
    for &idx in order.iter().rev() {
        // Late finish = min of all successor late starts
        let late_finish = graph
            .successors(idx)
            .iter()
            .map(|&succ| timings[succ as usize].late_start)
            .min()
            .unwrap_or(project_duration);

        let timing = &mut timings[idx as usize];
        timing.late_finish = late_finish;
        timing.late_start = late_finish - graph.duration(idx);
    }
}
