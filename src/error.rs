//! Error type shared by graph construction, path validation and the search driver.

use thiserror::Error;

use crate::graph::Vertex;

/// Errors raised by `qpo`.
///
/// Negative results are not errors: a graph without the property yields
/// [`Verdict::Violated`](crate::Verdict::Violated), and a search that finds no
/// witness reports `achievable == false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QpoError {
    /// A vertex appears twice in a sequence handed to the candidate-path predicate.
    ///
    /// Candidate paths are simple by construction, so this is a caller bug.
    #[error("vertex {0} appears more than once in the path")]
    DuplicateVertex(Vertex),

    /// A sequence given to [`CandidatePath::new`](crate::CandidatePath::new) does not
    /// satisfy the candidate-path ordering constraints.
    #[error("sequence {0:?} is not a candidate path")]
    NotCandidatePath(Vec<Vertex>),

    /// An edge joins a vertex to itself.
    #[error("self loop on vertex {0}")]
    SelfLoop(Vertex),

    /// A vertex label outside `1..=order`.
    #[error("vertex {vertex} is outside 1..={order}")]
    VertexOutOfRange {
        /// Offending label.
        vertex: Vertex,
        /// Number of vertices in the graph.
        order: usize,
    },

    /// The vertex labels of an adjacency description do not form `1..=n`.
    #[error("vertex labels must be exactly 1..={order}; label {missing} is missing")]
    NonContiguousLabels {
        /// Number of distinct labels found.
        order: usize,
        /// Smallest label in `1..=order` that never appeared.
        missing: Vertex,
    },

    /// A labeling does not have one entry per vertex.
    #[error("labeling has {found} entries but the graph has {expected} vertices")]
    LabelingSizeMismatch {
        /// Vertex count of the graph.
        expected: usize,
        /// Length of the labeling.
        found: usize,
    },

    /// A sequence of ranks is not a bijection on `0..n`.
    #[error("{0:?} is not a permutation")]
    InvalidPermutation(Vec<usize>),

    /// `n!` does not fit in a `usize`.
    #[error("search space of {0}! labelings is too large")]
    SearchSpaceTooLarge(usize),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QpoError>;
