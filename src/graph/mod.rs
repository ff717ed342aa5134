//! The graph abstraction consumed by the enumerator, the checker and the search driver.
//!
//! Vertices are their labels: positive integers whose natural order is the order the
//! QPO property is evaluated under. [`Graph`] is the narrow interface the algorithms
//! need; [`LabeledGraph`] is the concrete structure-plus-labeling implementation.

pub mod families;
pub mod labeled;
pub mod paths;
pub(crate) mod access;

pub use labeled::{GraphStatistics, LabeledGraph};
pub use paths::SimplePaths;

use crate::error::Result;
use crate::permutation::Permutation;

/// A vertex, identified by its label.
pub type Vertex = usize;

/// A finite simple undirected graph whose vertices carry a total order.
pub trait Graph {
    /// Number of vertices.
    fn order(&self) -> usize;

    /// All vertices in ascending label order.
    fn vertices(&self) -> Vec<Vertex>;

    /// The neighbors of `vertex`, each exactly once.
    ///
    /// # Panics
    /// Implementations may panic if `vertex` is not in the graph.
    fn neighbors(&self, vertex: Vertex) -> impl Iterator<Item = Vertex> + '_;

    /// Returns `true` iff `u` and `v` are adjacent.
    fn has_edge(&self, u: Vertex, v: Vertex) -> bool;

    /// Lazily enumerates every simple path from `from` to `to`.
    fn all_simple_paths(&self, from: Vertex, to: Vertex) -> SimplePaths<'_, Self>
    where
        Self: Sized,
    {
        SimplePaths::new(self, from, to)
    }

    /// Returns a graph with identical adjacency whose vertex labeled `v` is relabeled
    /// `labeling[v - 1] + 1`.
    ///
    /// # Errors
    /// Fails if `labeling` does not have exactly [`order`](Graph::order) entries.
    fn relabel(&self, labeling: &Permutation) -> Result<Self>
    where
        Self: Sized;
}
