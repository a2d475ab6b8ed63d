//! Topological ordering (Kahn's algorithm).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::interner::TaskIdx;
use crate::models::TaskId;

use super::engine::CpmError;
use super::graph::DependencyGraph;

/// Ready set for Kahn's algorithm.
///
/// FIFO when order does not matter; a min-heap on task ID when the caller
/// wants a reproducible order among simultaneously-ready tasks.
enum ReadyQueue {
    Fifo(VecDeque<TaskIdx>),
    ById(BinaryHeap<Reverse<(TaskId, TaskIdx)>>),
}

impl ReadyQueue {
    fn new(stable: bool) -> Self {
        if stable {
            Self::ById(BinaryHeap::new())
        } else {
            Self::Fifo(VecDeque::new())
        }
    }

    fn push(&mut self, graph: &DependencyGraph<'_>, idx: TaskIdx) {
        match self {
            Self::Fifo(queue) => queue.push_back(idx),
            Self::ById(heap) => heap.push(Reverse((graph.task_id(idx), idx))),
        }
    }

    fn pop(&mut self) -> Option<TaskIdx> {
        match self {
            Self::Fifo(queue) => queue.pop_front(),
            Self::ById(heap) => heap.pop().map(|Reverse((_, idx))| idx),
        }
    }
}

/// Order all tasks so every predecessor precedes its successors.
///
/// Must only be called on a graph that passed cycle detection; a short order
/// is reported as an internal error.
pub fn topological_sort(
    graph: &DependencyGraph<'_>,
    stable: bool,
) -> Result<Vec<TaskIdx>, CpmError> {
    let mut in_degree: Vec<usize> = graph.predecessors.iter().map(Vec::len).collect();

    let mut ready = ReadyQueue::new(stable);
    for idx in graph.nodes() {
        if in_degree[idx as usize] == 0 {
            ready.push(graph, idx);
        }
    }

    let mut order: Vec<TaskIdx> = Vec::with_capacity(graph.len());

    while let Some(idx) = ready.pop() {
        order.push(idx);

        for &succ in graph.successors(idx) {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                ready.push(graph, succ);
            }
        }
    }

    if order.len() != graph.len() {
        return Err(CpmError::Internal(format!(
            "topological order covers {} of {} tasks",
            order.len(),
            graph.len()
        )));
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    fn make_task(id: TaskId, deps: Vec<TaskId>) -> Task {
        Task::new(id, String::new(), Some(1), None, Some(deps))
    }

    fn sorted_ids(tasks: &[Task], stable: bool) -> Vec<TaskId> {
        let graph = DependencyGraph::build(tasks);
        topological_sort(&graph, stable)
            .unwrap()
            .into_iter()
            .map(|i| graph.task_id(i))
            .collect()
    }

    fn position(order: &[TaskId], id: TaskId) -> usize {
        order.iter().position(|&x| x == id).unwrap()
    }

    #[test]
    fn test_edges_respected() {
        let tasks = vec![
            make_task(4, vec![2, 3]),
            make_task(3, vec![1]),
            make_task(2, vec![1]),
            make_task(1, vec![]),
        ];
        for stable in [false, true] {
            let order = sorted_ids(&tasks, stable);
            assert_eq!(order.len(), 4);
            assert!(position(&order, 1) < position(&order, 2));
            assert!(position(&order, 1) < position(&order, 3));
            assert!(position(&order, 2) < position(&order, 4));
            assert!(position(&order, 3) < position(&order, 4));
        }
    }

    #[test]
    fn test_stable_order_breaks_ties_by_id() {
        let tasks = vec![
            make_task(30, vec![]),
            make_task(10, vec![]),
            make_task(20, vec![10]),
            make_task(5, vec![]),
        ];
        assert_eq!(sorted_ids(&tasks, true), vec![5, 10, 20, 30]);
    }

    #[test]
    fn test_disconnected_components() {
        let tasks = vec![
            make_task(1, vec![]),
            make_task(2, vec![1]),
            make_task(3, vec![]),
            make_task(4, vec![3]),
        ];
        let order = sorted_ids(&tasks, false);
        assert_eq!(order.len(), 4);
        assert!(position(&order, 1) < position(&order, 2));
        assert!(position(&order, 3) < position(&order, 4));
    }

    #[test]
    fn test_cycle_reported_as_internal_error() {
        let tasks = vec![make_task(1, vec![2]), make_task(2, vec![1])];
        let graph = DependencyGraph::build(&tasks);
        assert!(matches!(
            topological_sort(&graph, true),
            Err(CpmError::Internal(_))
        ));
    }
}
