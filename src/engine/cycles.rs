//! Dependency cycle detection.
//!
//! Tasks on a cycle are the strongly connected components with more than one
//! member, or a self-loop. Everything reachable from them sits downstream of
//! a cycle; the relaxation cannot settle that subgraph for positive durations.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

/// Positions on or downstream of a dependency cycle, ascending.
///
/// `dependencies[i]` lists the positions task `i` waits on.
pub fn unresolved_positions(dependencies: &[Vec<usize>]) -> Vec<usize> {
    let graph = dependency_graph(dependencies);
    let mut unresolved = vec![false; graph.node_count()];

    for component in tarjan_scc(&graph) {
        let cyclic = match component.as_slice() {
            [single] => graph.contains_edge(*single, *single),
            _ => true,
        };
        if !cyclic {
            continue;
        }
        for &start in &component {
            if unresolved[start.index()] {
                continue;
            }
            let mut dfs = Dfs::new(&graph, start);
            while let Some(node) = dfs.next(&graph) {
                unresolved[node.index()] = true;
            }
        }
    }

    unresolved
        .iter()
        .enumerate()
        .filter(|(_, flag)| **flag)
        .map(|(i, _)| i)
        .collect()
}

/// Node `i` is task position `i`; edges point from a dependency to the task
/// waiting on it.
fn dependency_graph(dependencies: &[Vec<usize>]) -> DiGraph<usize, ()> {
    let edges = dependencies.iter().map(Vec::len).sum();
    let mut graph = DiGraph::with_capacity(dependencies.len(), edges);
    for i in 0..dependencies.len() {
        graph.add_node(i);
    }
    for (task, deps) in dependencies.iter().enumerate() {
        for &dep in deps {
            graph.add_edge(NodeIndex::new(dep), NodeIndex::new(task), ());
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_has_no_unresolved_nodes() {
        let deps = vec![vec![], vec![0], vec![1], vec![0, 2]];
        assert!(unresolved_positions(&deps).is_empty());
    }

    #[test]
    fn cycle_and_downstream_are_reported() {
        // 0 -> 1 -> 2 -> 1, 3 waits on 2, 4 is independent
        let deps = vec![vec![], vec![0, 2], vec![1], vec![2], vec![]];
        assert_eq!(unresolved_positions(&deps), vec![1, 2, 3]);
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let deps = vec![vec![0], vec![]];
        assert_eq!(unresolved_positions(&deps), vec![0]);
    }

    #[test]
    fn two_separate_cycles_are_both_reported() {
        // 0 <-> 1, 2 independent, 3 <-> 4 with 5 downstream
        let deps = vec![vec![1], vec![0], vec![], vec![4], vec![3], vec![4]];
        assert_eq!(unresolved_positions(&deps), vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn upstream_of_a_cycle_is_not_reported() {
        // 0 feeds the 1 <-> 2 cycle
        let deps = vec![vec![], vec![0, 2], vec![1]];
        assert_eq!(unresolved_positions(&deps), vec![1, 2]);
    }

    #[test]
    fn repeated_dependency_is_counted_per_edge() {
        let deps = vec![vec![], vec![0, 0]];
        assert!(unresolved_positions(&deps).is_empty());
    }
}
