//! Cycle detection over the forward adjacency graph.

use crate::interner::TaskIdx;

use super::graph::DependencyGraph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Unvisited,
    /// On the current DFS path.
    OnStack,
    /// Fully explored.
    Done,
}

/// Find one directed cycle, if any.
///
/// Depth-first search with an explicit stack so deep dependency chains cannot
/// overflow the call stack. Every node is visited exactly once overall; the
/// search restarts from each unvisited node so disconnected components are
/// all checked. A successor still marked on-stack closes a cycle, which is
/// returned as the nodes from that successor to the current node, in
/// traversal order.
pub fn find_cycle(graph: &DependencyGraph<'_>) -> Option<Vec<TaskIdx>> {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    // (node, position of the next successor to explore)
    let mut stack: Vec<(TaskIdx, usize)> = Vec::new();

    for root in graph.nodes() {
        if marks[root as usize] != Mark::Unvisited {
            continue;
        }
        marks[root as usize] = Mark::OnStack;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let successors = graph.successors(node);

            if frame.1 >= successors.len() {
                marks[node as usize] = Mark::Done;
                stack.pop();
                continue;
            }

            let succ = successors[frame.1];
            frame.1 += 1;

            match marks[succ as usize] {
                Mark::Unvisited => {
                    marks[succ as usize] = Mark::OnStack;
                    stack.push((succ, 0));
                }
                Mark::OnStack => {
                    let start = stack.iter().position(|&(n, _)| n == succ).unwrap_or(0);
                    return Some(stack[start..].iter().map(|&(n, _)| n).collect());
                }
                Mark::Done => {}
            }
        }
    }

    None
}

/// Whether the graph contains any directed cycle.
pub fn has_cycle(graph: &DependencyGraph<'_>) -> bool {
    find_cycle(graph).is_some()
}
