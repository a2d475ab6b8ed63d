//! Critical path enumeration and completion dates.

use chrono::{Days, NaiveDate};

use crate::interner::TaskIdx;
use crate::models::TaskSummary;

use super::graph::DependencyGraph;
use super::types::TaskTiming;

/// Enumerate every maximal path through the critical subgraph.
///
/// The critical subgraph holds the tasks flagged in `critical` and only the
/// edges between two such tasks. Each path runs from a critical task with no
/// critical predecessor to one with no critical successor. Diverging and
/// converging branches each yield their own path, so the output can grow
/// combinatorially with branching.
///
/// With `stable`, roots are taken in task-ID order; successor order follows
/// the graph's adjacency lists.
pub fn critical_paths(
    graph: &DependencyGraph<'_>,
    critical: &[bool],
    stable: bool,
) -> Vec<Vec<TaskIdx>> {
    let is_critical = |idx: TaskIdx| critical[idx as usize];

    let mut roots: Vec<TaskIdx> = graph
        .nodes()
        .filter(|&idx| is_critical(idx))
        .filter(|&idx| !graph.predecessors(idx).iter().any(|&p| is_critical(p)))
        .collect();
    if stable {
        roots.sort_by_key(|&idx| graph.task_id(idx));
    }

    let mut paths: Vec<Vec<TaskIdx>> = Vec::new();
    let mut path: Vec<TaskIdx> = Vec::new();
    // Per path position: where to resume scanning that node's successors.
    let mut cursors: Vec<usize> = Vec::new();

    for root in roots {
        path.push(root);
        cursors.push(0);

        while let Some(&node) = path.last() {
            let depth = path.len() - 1;
            let successors = graph.successors(node);
            let start = cursors[depth];
            let next = successors[start..]
                .iter()
                .position(|&s| is_critical(s))
                .map(|offset| start + offset);

            match next {
                Some(pos) => {
                    cursors[depth] = pos + 1;
                    path.push(successors[pos]);
                    cursors.push(0);
                }
                None => {
                    // Nothing found from the first successor on: a leaf.
                    if start == 0 {
                        paths.push(path.clone());
                    }
                    path.pop();
                    cursors.pop();
                }
            }
        }
    }

    paths
}

/// Summary of one task for critical task lists and paths.
pub fn summarize(graph: &DependencyGraph<'_>, timings: &[TaskTiming], idx: TaskIdx) -> TaskSummary {
    let task = graph.task(idx);
    let timing = &timings[idx as usize];
    TaskSummary {
        id: task.id,
        title: task.title.clone(),
        duration: graph.duration(idx),
        early_start: timing.early_start,
        early_finish: timing.early_finish,
    }
}

/// Anchor date (earliest task start date) plus the project duration.
///
/// `None` if no task carries a start date.
pub fn completion_date(graph: &DependencyGraph<'_>, project_duration: i64) -> Option<NaiveDate> {
    let anchor = graph.tasks.iter().filter_map(|t| t.start_date).min()?;
    let days = u64::try_from(project_duration).ok()?;
    anchor.checked_add_days(Days::new(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TaskId};

    fn make_task(id: TaskId, deps: Vec<TaskId>) -> Task {
        Task::new(id, format!("t{id}"), Some(1), None, Some(deps))
    }

    fn path_ids(tasks: &[Task], critical_ids: &[TaskId]) -> Vec<Vec<TaskId>> {
        let mut graph = DependencyGraph::build(tasks);
        graph.sort_by_id();
        let critical: Vec<bool> = graph
            .nodes()
            .map(|idx| critical_ids.contains(&graph.task_id(idx)))
            .collect();
        critical_paths(&graph, &critical, true)
            .into_iter()
            .map(|p| p.into_iter().map(|i| graph.task_id(i)).collect())
            .collect()
    }

    #[test]
    fn test_single_chain() {
        let tasks = vec![make_task(1, vec![]), make_task(2, vec![1]), make_task(3, vec![2])];
        assert_eq!(path_ids(&tasks, &[1, 2, 3]), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_non_critical_branch_excluded() {
        // 1 -> 2 -> 4 and 1 -> 3 -> 4, only 3 has float
        let tasks = vec![
            make_task(1, vec![]),
            make_task(2, vec![1]),
            make_task(3, vec![1]),
            make_task(4, vec![2, 3]),
        ];
        assert_eq!(path_ids(&tasks, &[1, 2, 4]), vec![vec![1, 2, 4]]);
    }

    #[test]
    fn test_diverging_and_converging_paths() {
        // 1 -> {2, 3} -> 4, all critical: two paths
        let tasks = vec![
            make_task(1, vec![]),
            make_task(2, vec![1]),
            make_task(3, vec![1]),
            make_task(4, vec![2, 3]),
        ];
        assert_eq!(
            path_ids(&tasks, &[1, 2, 3, 4]),
            vec![vec![1, 2, 4], vec![1, 3, 4]]
        );
    }

    #[test]
    fn test_disjoint_critical_components() {
        let tasks = vec![
            make_task(5, vec![]),
            make_task(6, vec![5]),
            make_task(1, vec![]),
        ];
        assert_eq!(path_ids(&tasks, &[1, 5, 6]), vec![vec![1], vec![5, 6]]);
    }

    #[test]
    fn test_no_critical_tasks() {
        let tasks = vec![make_task(1, vec![])];
        assert!(path_ids(&tasks, &[]).is_empty());
    }

    #[test]
    fn test_completion_date_uses_earliest_start() {
        let mut tasks = vec![make_task(1, vec![]), make_task(2, vec![]), make_task(3, vec![])];
        tasks[1].start_date = NaiveDate::from_ymd_opt(2025, 3, 10);
        tasks[2].start_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        let graph = DependencyGraph::build(&tasks);

        assert_eq!(
            completion_date(&graph, 8),
            NaiveDate::from_ymd_opt(2025, 3, 9)
        );
    }

    #[test]
    fn test_completion_date_without_start_dates() {
        let tasks = vec![make_task(1, vec![])];
        let graph = DependencyGraph::build(&tasks);
        assert_eq!(completion_date(&graph, 3), None);
    }
}
