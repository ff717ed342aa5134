//! A simple undirected graph stored as a fixed structure plus a labeling.
//!
//! The structure (which nodes are adjacent) never changes once built; relabeling only
//! swaps the node ↔ label maps, so each labeling trial gets its own cheap copy instead
//! of mutating a graph shared across trials.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{QpoError, Result};
use crate::graph::{Graph, Vertex};
use crate::permutation::Permutation;

/// An undirected simple graph on the labels `1..=n`.
///
/// Internally nodes are `0..n`; `label_of[node]` is the node's label and
/// `node_of[label - 1]` the inverse. Adjacency lists hold nodes and are kept sorted.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_edge` | \(O(\deg)\) | Sorted insert into both lists |
/// | `has_edge` | \(O(\log \deg)\) | Binary search |
/// | `neighbors` | \(O(1)\) to start | Maps nodes to labels lazily |
/// | `relabel` | \(O(n + m)\) | Clones structure, rebuilds label maps |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledGraph {
    adjacency: Vec<Vec<usize>>,
    label_of: Vec<Vertex>,
    node_of: Vec<usize>,
}

impl LabeledGraph {
    /// Creates an edgeless graph on `1..=order` with the natural labeling.
    pub fn new(order: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); order],
            label_of: (1..=order).collect(),
            node_of: (0..order).collect(),
        }
    }

    /// Creates a graph on `1..=order` from an edge list given in labels.
    ///
    /// Repeated edges are merged.
    ///
    /// # Errors
    /// Fails on a self loop or an endpoint outside `1..=order`.
    pub fn from_edges(order: usize, edges: impl IntoIterator<Item = (Vertex, Vertex)>) -> Result<Self> {
        let mut graph = Self::new(order);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Creates a graph from a dict-of-lists description, `{1: [2, 3], 2: [4], ...}`.
    ///
    /// Every label mentioned as a key or as a neighbor becomes a vertex, and together
    /// they must be exactly `1..=n`. Lists need not be symmetric.
    ///
    /// # Errors
    /// Fails on a self loop, a label of zero, or labels that skip a value.
    pub fn from_adjacency<I, N>(lists: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Vertex, N)>,
        N: IntoIterator<Item = Vertex>,
    {
        let mut labels = BTreeSet::new();
        let mut edges = Vec::new();
        for (u, nbrs) in lists {
            labels.insert(u);
            for v in nbrs {
                labels.insert(v);
                edges.push((u, v));
            }
        }

        let order = labels.len();
        if let Some(missing) = (1..=order).find(|v| !labels.contains(v)) {
            return Err(QpoError::NonContiguousLabels { order, missing });
        }

        Self::from_edges(order, edges)
    }

    /// Adds the edge `u – v`. Returns `false` if it was already present.
    ///
    /// # Errors
    /// Fails on a self loop or an endpoint outside `1..=order`.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<bool> {
        let a = self.checked_node(u)?;
        let b = self.checked_node(v)?;
        if a == b {
            return Err(QpoError::SelfLoop(u));
        }
        Ok(self.insert_node_edge(a, b))
    }

    /// Inserts `a – b` by node index; both ends must be valid and distinct.
    pub(crate) fn insert_node_edge(&mut self, a: usize, b: usize) -> bool {
        debug_assert!(a != b, "self loop on node {a}");
        match self.adjacency[a].binary_search(&b) {
            Ok(_) => false,
            Err(pos) => {
                self.adjacency[a].insert(pos, b);
                if let Err(pos) = self.adjacency[b].binary_search(&a) {
                    self.adjacency[b].insert(pos, a);
                }
                true
            }
        }
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns the degree of a vertex.
    ///
    /// # Panics
    /// Panics if `vertex` is not in `1..=order`.
    pub fn degree(&self, vertex: Vertex) -> usize {
        self.adjacency[self.node(vertex)].len()
    }

    /// The labeling applied to the structure: node `i` carries label `labeling()[i] + 1`.
    pub fn labeling(&self) -> Permutation {
        Permutation::new_unchecked(self.label_of.iter().map(|&label| label - 1).collect())
    }

    /// Every edge once, as `(u, v)` with `u < v`, sorted.
    pub fn edges(&self) -> Vec<(Vertex, Vertex)> {
        let mut edges: Vec<_> = self
            .adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, nbrs)| {
                nbrs.iter()
                    .map(move |&b| (self.label_of[a], self.label_of[b]))
                    .filter(|(u, v)| u < v)
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// The graph as a dict of sorted neighbor lists, keyed by label.
    pub fn to_adjacency(&self) -> BTreeMap<Vertex, Vec<Vertex>> {
        self.vertices()
            .into_iter()
            .map(|v| {
                let mut nbrs: Vec<_> = self.neighbors(v).collect();
                nbrs.sort_unstable();
                (v, nbrs)
            })
            .collect()
    }

    /// Computes basic degree statistics.
    pub fn statistics(&self) -> GraphStatistics {
        let degrees = self.adjacency.iter().map(Vec::len);
        GraphStatistics {
            vertex_count: self.order(),
            edge_count: self.edge_count(),
            min_degree: degrees.clone().min().unwrap_or(0),
            max_degree: degrees.max().unwrap_or(0),
        }
    }

    #[inline]
    fn node(&self, vertex: Vertex) -> usize {
        assert!(
            (1..=self.order()).contains(&vertex),
            "vertex {vertex} out of bounds for order {}",
            self.order()
        );
        self.node_of[vertex - 1]
    }

    fn checked_node(&self, vertex: Vertex) -> Result<usize> {
        if (1..=self.order()).contains(&vertex) {
            Ok(self.node_of[vertex - 1])
        } else {
            Err(QpoError::VertexOutOfRange {
                vertex,
                order: self.order(),
            })
        }
    }
}

impl Graph for LabeledGraph {
    fn order(&self) -> usize {
        self.adjacency.len()
    }

    fn vertices(&self) -> Vec<Vertex> {
        (1..=self.order()).collect()
    }

    fn neighbors(&self, vertex: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.adjacency[self.node(vertex)]
            .iter()
            .map(|&node| self.label_of[node])
    }

    fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        let (a, b) = (self.node(u), self.node(v));
        self.adjacency[a].binary_search(&b).is_ok()
    }

    fn relabel(&self, labeling: &Permutation) -> Result<Self> {
        if labeling.len() != self.order() {
            return Err(QpoError::LabelingSizeMismatch {
                expected: self.order(),
                found: labeling.len(),
            });
        }

        let label_of: Vec<Vertex> = self
            .label_of
            .iter()
            .map(|&label| labeling[label - 1] + 1)
            .collect();
        let mut node_of = vec![0; label_of.len()];
        for (node, &label) in label_of.iter().enumerate() {
            node_of[label - 1] = node;
        }

        Ok(Self {
            adjacency: self.adjacency.clone(),
            label_of,
            node_of,
        })
    }
}

/// Statistics about a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GraphStatistics {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Minimum degree over all vertices.
    pub min_degree: usize,
    /// Maximum degree over all vertices.
    pub max_degree: usize,
}
