//! Candidate paths and their enumeration.
//!
//! A candidate path is a simple path `a, c, b, v4, ..., d` of at least four vertices
//! with `a < b < c`, `d < c`, and every vertex strictly between `b` and `d` at least
//! `c`. In other words `d` is the first vertex after `b` that drops below `c`.
//!
//! [`CandidatePaths`] finds them by a pruned depth-first search from every admissible
//! `(a, c)` edge; [`oracle_candidate_paths`] filters every simple path of the graph and
//! exists to cross-check it.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::vec::IntoIter;

use serde::{Deserialize, Serialize};

use crate::error::{QpoError, Result};
use crate::graph::access::visited::OnPath;
use crate::graph::{Graph, Vertex};

/// Minimum number of vertices in a candidate path.
pub const MIN_CANDIDATE_LEN: usize = 4;

/// Decides whether `path` has the shape of a candidate path.
///
/// Adjacency is not checked; only the ordering constraints are.
///
/// # Errors
/// Returns [`QpoError::DuplicateVertex`] if a vertex occurs twice. Paths produced by
/// a search are always simple, so a repeat means the caller built the sequence wrong.
pub fn is_candidate_path(path: &[Vertex]) -> Result<bool> {
    let mut seen = HashSet::with_capacity(path.len());
    if let Some(&repeated) = path.iter().find(|&&v| !seen.insert(v)) {
        return Err(QpoError::DuplicateVertex(repeated));
    }

    let [a, c, b, tail @ ..] = path else {
        return Ok(false);
    };
    let Some((&d, between)) = tail.split_last() else {
        return Ok(false);
    };

    Ok(a < b && b < c && d < *c && between.iter().all(|v| v >= c))
}

/// A simple path `a, c, b, ..., d` satisfying the candidate-path ordering.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vertex>", into = "Vec<Vertex>")]
pub struct CandidatePath(Vec<Vertex>);

impl CandidatePath {
    /// Validates `vertices` as a candidate path.
    ///
    /// # Errors
    /// [`QpoError::DuplicateVertex`] for a repeated vertex,
    /// [`QpoError::NotCandidatePath`] for a sequence of the wrong shape.
    pub fn new(vertices: Vec<Vertex>) -> Result<Self> {
        if is_candidate_path(&vertices)? {
            Ok(Self(vertices))
        } else {
            Err(QpoError::NotCandidatePath(vertices))
        }
    }

    /// The first vertex.
    pub fn a(&self) -> Vertex {
        self.0[0]
    }

    /// The second vertex, the largest of `a, b, c, d`.
    pub fn c(&self) -> Vertex {
        self.0[1]
    }

    /// The third vertex, between `a` and `c`.
    pub fn b(&self) -> Vertex {
        self.0[2]
    }

    /// The last vertex, the only one after `b` below `c`.
    pub fn d(&self) -> Vertex {
        self.0[self.0.len() - 1]
    }

    /// Consumes the path, returning its vertices.
    pub fn into_vec(self) -> Vec<Vertex> {
        self.0
    }
}

impl Deref for CandidatePath {
    type Target = [Vertex];

    fn deref(&self) -> &[Vertex] {
        &self.0
    }
}

impl TryFrom<Vec<Vertex>> for CandidatePath {
    type Error = QpoError;

    fn try_from(vertices: Vec<Vertex>) -> Result<Self> {
        Self::new(vertices)
    }
}

impl From<CandidatePath> for Vec<Vertex> {
    fn from(path: CandidatePath) -> Self {
        path.0
    }
}

impl fmt::Display for CandidatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(")")
    }
}

/// Lazily enumerates every candidate path of a graph.
///
/// Each candidate path is yielded exactly once, in no particular order. The iterator
/// is single-pass; build a new one to enumerate again.
///
/// ### Search
/// Roots are edges `a - c` with `c > a`, where `a` is not one of the two largest
/// vertices and `c` exceeds the third smallest (it must outrank `a`, `b` and `d`).
/// From `c` the search places `b` with `a < b < c`, then walks through vertices
/// above `c`; every unvisited neighbor below `c` closes a path and is never
/// extended.
pub struct CandidatePaths<'g, G> {
    graph: &'g G,
    roots: IntoIter<(Vertex, Vertex)>,
    path: Vec<Vertex>,
    on_path: OnPath,
    // One frame per path vertex after `a`: its not-yet-tried neighbors.
    stack: Vec<IntoIter<Vertex>>,
}

impl<'g, G: Graph> CandidatePaths<'g, G> {
    /// Prepares the enumeration for `graph`.
    pub fn new(graph: &'g G) -> Self {
        let vertices = graph.vertices();
        let n = vertices.len();

        let roots: Vec<(Vertex, Vertex)> = if n < MIN_CANDIDATE_LEN {
            Vec::new()
        } else {
            let third_smallest = vertices[2];
            vertices[..n - 2]
                .iter()
                .flat_map(move |&a| {
                    graph
                        .neighbors(a)
                        .filter(move |&c| c > a && c > third_smallest)
                        .map(move |c| (a, c))
                })
                .collect()
        };

        Self {
            graph,
            roots: roots.into_iter(),
            path: Vec::with_capacity(n),
            on_path: OnPath::with_max(vertices.last().copied().unwrap_or(0)),
            stack: Vec::with_capacity(n),
        }
    }

    fn start(&mut self, a: Vertex, c: Vertex) {
        self.path.clear();
        self.on_path.clear();
        self.path.push(a);
        self.on_path.mark(a);
        self.extend(c);
    }

    fn extend(&mut self, vertex: Vertex) {
        let frame: Vec<Vertex> = self.graph.neighbors(vertex).collect();
        self.path.push(vertex);
        self.on_path.mark(vertex);
        self.stack.push(frame.into_iter());
    }

    fn backtrack(&mut self) {
        self.stack.pop();
        if let Some(v) = self.path.pop() {
            self.on_path.unmark(v);
        }
        // Leaving `c` also leaves the root.
        if self.stack.is_empty() {
            if let Some(a) = self.path.pop() {
                self.on_path.unmark(a);
            }
        }
    }
}

impl<G: Graph> Iterator for CandidatePaths<'_, G> {
    type Item = CandidatePath;

    fn next(&mut self) -> Option<CandidatePath> {
        loop {
            if self.stack.is_empty() {
                let (a, c) = self.roots.next()?;
                self.start(a, c);
            }

            let Some(n) = self.stack.last_mut().and_then(Iterator::next) else {
                self.backtrack();
                continue;
            };
            if self.on_path.contains(n) {
                continue;
            }

            let (a, c) = (self.path[0], self.path[1]);
            if self.path.len() == 2 {
                // Placing b.
                if a < n && n < c {
                    self.extend(n);
                }
            } else if n < c {
                let mut found = Vec::with_capacity(self.path.len() + 1);
                found.extend_from_slice(&self.path);
                found.push(n);
                return Some(CandidatePath(found));
            } else {
                self.extend(n);
            }
        }
    }
}

impl<G: Graph> std::iter::FusedIterator for CandidatePaths<'_, G> {}

/// Shorthand for [`CandidatePaths::new`].
pub fn candidate_paths<G: Graph>(graph: &G) -> CandidatePaths<'_, G> {
    CandidatePaths::new(graph)
}

/// Every candidate path, found by filtering all simple paths between all ordered
/// pairs of distinct vertices.
///
/// Exponential in the worst case; a reference for [`CandidatePaths`] on small graphs.
pub fn oracle_candidate_paths<G: Graph>(graph: &G) -> Vec<CandidatePath> {
    let vertices = graph.vertices();
    let mut found = Vec::new();
    for &u in &vertices {
        for &v in &vertices {
            if u == v {
                continue;
            }
            found.extend(
                graph
                    .all_simple_paths(u, v)
                    .filter(|path| matches!(is_candidate_path(path), Ok(true)))
                    .map(CandidatePath),
            );
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LabeledGraph;
    use crate::permutation::Permutations;
    use std::collections::BTreeSet;

    fn path_set(paths: impl IntoIterator<Item = CandidatePath>) -> BTreeSet<Vec<Vertex>> {
        paths.into_iter().map(CandidatePath::into_vec).collect()
    }

    fn expected(paths: &[&[Vertex]]) -> BTreeSet<Vec<Vertex>> {
        paths.iter().map(|p| p.to_vec()).collect()
    }

    #[test]
    fn predicate_accepts_candidate_shapes() {
        assert_eq!(is_candidate_path(&[1, 4, 2, 3]), Ok(true));
        assert_eq!(is_candidate_path(&[2, 5, 3, 1]), Ok(true));
        assert_eq!(is_candidate_path(&[1, 4, 3, 5, 2]), Ok(true));
        assert_eq!(is_candidate_path(&[3, 7, 5, 8, 9, 10, 1]), Ok(true));
    }

    #[test]
    fn predicate_rejects_wrong_shapes() {
        assert_eq!(is_candidate_path(&[]), Ok(false));
        assert_eq!(is_candidate_path(&[1, 3, 2]), Ok(false));
        // b not below c
        assert_eq!(is_candidate_path(&[1, 3, 4, 2]), Ok(false));
        // a not below b
        assert_eq!(is_candidate_path(&[3, 4, 2, 1]), Ok(false));
        // d not below c
        assert_eq!(is_candidate_path(&[1, 4, 2, 5]), Ok(false));
        // a tail vertex drops below c before d
        assert_eq!(is_candidate_path(&[1, 5, 3, 2, 4]), Ok(false));
    }

    #[test]
    fn predicate_rejects_repeated_vertices_loudly() {
        assert_eq!(
            is_candidate_path(&[1, 4, 2, 4, 3]),
            Err(QpoError::DuplicateVertex(4))
        );
        assert_eq!(is_candidate_path(&[2, 2]), Err(QpoError::DuplicateVertex(2)));
    }

    #[test]
    fn candidate_path_accessors_and_display() {
        let path = CandidatePath::new(vec![3, 7, 5, 8, 9, 10, 1]).unwrap();
        assert_eq!((path.a(), path.c(), path.b(), path.d()), (3, 7, 5, 1));
        assert_eq!(path.len(), 7);
        assert_eq!(path.to_string(), "(3, 7, 5, 8, 9, 10, 1)");
        assert_eq!(
            CandidatePath::new(vec![1, 2, 3, 4]),
            Err(QpoError::NotCandidatePath(vec![1, 2, 3, 4]))
        );
        assert_eq!(serde_json::to_string(&path).unwrap(), "[3,7,5,8,9,10,1]");
    }

    #[test]
    fn degenerate_graphs_have_no_candidate_paths() {
        let graphs = [
            LabeledGraph::new(0),
            LabeledGraph::new(1),
            LabeledGraph::path(2),
            LabeledGraph::path(3),
            LabeledGraph::complete(3),
        ];
        for graph in &graphs {
            assert_eq!(candidate_paths(graph).count(), 0, "{graph:?}");
        }
    }

    #[test]
    fn path_structure_yields_its_single_candidate() {
        // 1 - 4 - 2 - 3
        let graph = LabeledGraph::from_edges(4, [(1, 4), (4, 2), (2, 3)]).unwrap();
        let found: Vec<_> = candidate_paths(&graph).map(CandidatePath::into_vec).collect();
        assert_eq!(found, vec![vec![1, 4, 2, 3]]);
    }

    #[test]
    fn adjacency_without_a_high_edge_has_none() {
        let graph = LabeledGraph::from_adjacency([
            (1, vec![2]),
            (2, vec![3]),
            (3, vec![4]),
            (4, vec![2]),
        ])
        .unwrap();
        assert_eq!(candidate_paths(&graph).count(), 0);
    }

    #[test]
    fn complete_bipartite_two_three() {
        let graph = LabeledGraph::from_adjacency([(1, vec![2, 3, 4]), (5, vec![2, 3, 4])]).unwrap();
        assert_eq!(
            path_set(candidate_paths(&graph)),
            expected(&[&[3, 5, 4, 1], &[2, 5, 3, 1], &[2, 5, 4, 1]])
        );
    }

    #[test]
    fn vertex_glued_four_cycles() {
        let graph = LabeledGraph::from_adjacency([
            (1, vec![2, 4, 5, 7]),
            (3, vec![2, 4]),
            (6, vec![5, 7]),
        ])
        .unwrap();
        assert_eq!(
            path_set(candidate_paths(&graph)),
            expected(&[&[1, 4, 3, 2], &[1, 7, 6, 5]])
        );
    }

    #[test]
    fn edge_glued_four_cycles() {
        let graph = LabeledGraph::from_adjacency([
            (1, vec![2, 4, 5]),
            (2, vec![3, 6]),
            (3, vec![5]),
            (4, vec![6]),
        ])
        .unwrap();
        assert_eq!(
            path_set(candidate_paths(&graph)),
            expected(&[&[1, 5, 3, 2], &[2, 6, 4, 1]])
        );
    }

    #[test]
    fn long_tails_are_followed() {
        let graph = LabeledGraph::from_adjacency([
            (1, vec![4, 10]),
            (5, vec![2, 7, 8, 11, 6]),
            (7, vec![3]),
            (9, vec![4, 8, 10]),
            (11, vec![6]),
        ])
        .unwrap();
        assert_eq!(
            path_set(candidate_paths(&graph)),
            expected(&[
                &[1, 10, 9, 4],
                &[1, 10, 9, 8],
                &[3, 7, 5, 2],
                &[3, 7, 5, 6],
                &[3, 7, 5, 11, 6],
                &[3, 7, 5, 8, 9, 4],
                &[3, 7, 5, 8, 9, 10, 1],
                &[4, 9, 8, 5],
            ])
        );
    }

    #[test]
    fn no_duplicates_under_any_labeling() {
        // {a: [b, c], b: [c], c: [d], e: [a, b, c, d]}
        let base = LabeledGraph::from_edges(
            5,
            [(1, 2), (1, 3), (2, 3), (3, 4), (5, 1), (5, 2), (5, 3), (5, 4)],
        )
        .unwrap();
        for labeling in Permutations::new(5) {
            let graph = base.relabel(&labeling).unwrap();
            let found: Vec<_> = candidate_paths(&graph).collect();
            let distinct: HashSet<_> = found.iter().cloned().collect();
            assert_eq!(distinct.len(), found.len(), "duplicate under {labeling}");
        }
    }

    #[test]
    fn yields_only_simple_adjacent_candidates() {
        let graph = LabeledGraph::complete(6);
        for path in candidate_paths(&graph) {
            assert_eq!(is_candidate_path(&path), Ok(true), "{path}");
            assert!(path.windows(2).all(|w| graph.has_edge(w[0], w[1])), "{path}");
        }
    }

    #[test]
    fn matches_oracle_on_every_graph_with_five_vertices() {
        let pairs: Vec<(Vertex, Vertex)> = (1..=5)
            .flat_map(|u| (u + 1..=5).map(move |v| (u, v)))
            .collect();
        for mask in 0u32..1 << pairs.len() {
            let edges = pairs
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, &e)| e);
            let graph = LabeledGraph::from_edges(5, edges).unwrap();
            assert_eq!(
                path_set(candidate_paths(&graph)),
                path_set(oracle_candidate_paths(&graph)),
                "edge mask {mask:#b}"
            );
        }
    }
}
