//! Lazy enumeration of the simple paths between two vertices.
//!
//! The search is an explicit-stack DFS: one neighbor frame per vertex on the current
//! path, so no recursion and no allocation beyond the frames and one clone per
//! yielded path.

use std::vec::IntoIter;

use crate::graph::access::visited::OnPath;
use crate::graph::{Graph, Vertex};

/// An iterator over every simple path from one vertex to another.
///
/// Yields each path as a vertex sequence starting at `from` and ending at `to`.
/// `from == to` yields the single one-vertex path.
///
/// # Panics
/// Iteration panics if `from` is not a vertex of the graph.
pub struct SimplePaths<'g, G> {
    graph: &'g G,
    target: Vertex,
    path: Vec<Vertex>,
    on_path: OnPath,
    stack: Vec<IntoIter<Vertex>>,
    trivial: Option<Vec<Vertex>>,
}

impl<'g, G: Graph> SimplePaths<'g, G> {
    /// Starts a search for paths `from → to`.
    pub fn new(graph: &'g G, from: Vertex, to: Vertex) -> Self {
        let max = graph.vertices().last().copied().unwrap_or(0).max(from).max(to);
        let mut paths = Self {
            graph,
            target: to,
            path: Vec::new(),
            on_path: OnPath::with_max(max),
            stack: Vec::new(),
            trivial: None,
        };

        if from == to {
            paths.trivial = Some(vec![from]);
        } else {
            paths.push(from);
        }
        paths
    }

    fn push(&mut self, vertex: Vertex) {
        let frame: Vec<Vertex> = self.graph.neighbors(vertex).collect();
        self.path.push(vertex);
        self.on_path.mark(vertex);
        self.stack.push(frame.into_iter());
    }

    fn pop(&mut self) {
        self.stack.pop();
        if let Some(vertex) = self.path.pop() {
            self.on_path.unmark(vertex);
        }
    }
}

impl<G: Graph> Iterator for SimplePaths<'_, G> {
    type Item = Vec<Vertex>;

    fn next(&mut self) -> Option<Vec<Vertex>> {
        if let Some(path) = self.trivial.take() {
            return Some(path);
        }

        loop {
            let next = self.stack.last_mut()?.next();
            match next {
                None => self.pop(),
                Some(n) if self.on_path.contains(n) => {}
                Some(n) if n == self.target => {
                    let mut path = self.path.clone();
                    path.push(n);
                    return Some(path);
                }
                Some(n) => self.push(n),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LabeledGraph;

    fn sorted(paths: impl Iterator<Item = Vec<Vertex>>) -> Vec<Vec<Vertex>> {
        let mut paths: Vec<_> = paths.collect();
        paths.sort();
        paths
    }

    #[test]
    fn simple_paths_in_a_four_cycle() {
        let graph = LabeledGraph::cycle(4);
        assert_eq!(
            sorted(graph.all_simple_paths(1, 3)),
            vec![vec![1, 2, 3], vec![1, 4, 3]]
        );
        assert_eq!(
            sorted(graph.all_simple_paths(1, 2)),
            vec![vec![1, 2], vec![1, 4, 3, 2]]
        );
    }

    #[test]
    fn simple_paths_in_complete_graph() {
        // K4: 1 direct, 2 via one vertex, 2 via both others.
        let graph = LabeledGraph::complete(4);
        let paths = sorted(graph.all_simple_paths(1, 4));
        assert_eq!(paths.len(), 5);
        assert!(paths.iter().all(|p| p.first() == Some(&1) && p.last() == Some(&4)));
    }

    #[test]
    fn simple_paths_unreachable_and_trivial() {
        let graph = LabeledGraph::from_edges(4, [(1, 2), (3, 4)]).unwrap();
        assert_eq!(graph.all_simple_paths(1, 4).count(), 0);
        assert_eq!(sorted(graph.all_simple_paths(2, 2)), vec![vec![2]]);
    }

    #[test]
    fn simple_paths_never_repeat_vertices() {
        let graph = LabeledGraph::complete(5);
        for path in graph.all_simple_paths(2, 5) {
            let mut seen = path.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), path.len(), "repeated vertex in {path:?}");
        }
    }
}
