//! # `qpo` - Candidate Paths and QPO Labelings
//!
//! Decides, for a finite simple graph, whether some total order on its vertices
//! (a *labeling*) gives it the QPO property, and produces witnesses either way.
//!
//! ## The Property
//!
//! Vertices are labeled `1..=n` and compared by label. A **candidate path** is a
//! simple path
//!
//! ```text
//! a - c - b - v4 - ... - d
//! ```
//!
//! of at least four vertices with `a < b < c`, `d < c`, and every `v_i` strictly
//! between `b` and `d` at least `c`. A candidate path is **satisfied** when
//!
//! - `a - d` is an edge, or
//! - `d < b` and `c - d` is an edge.
//!
//! A labeled graph has the **QPO property** when every candidate path is satisfied.
//! Graphs with fewer than four vertices have no candidate paths and hold vacuously.
//!
//! ## Components
//!
//! 1. **Graph abstraction** ([`Graph`], [`LabeledGraph`]):
//!    - fixed adjacency structure plus a relabelable vertex order
//!    - lazy simple-path enumeration between two vertices
//!
//! 2. **Candidate path enumerator** ([`CandidatePaths`]):
//!    - pruned depth-first search from every admissible `a - c` edge
//!    - explicit frame stack, one path buffer, push/pop backtracking
//!    - [`oracle_candidate_paths`] as a brute-force reference
//!
//! 3. **Property checker** ([`has_property`]):
//!    - scans candidate paths, stops at the first unsatisfied one
//!
//! 4. **Labeling search** ([`LabelingSearch`]):
//!    - all `n!` labelings in lexicographic order
//!    - early exit on first success and/or failure, optional counting
//!    - optional rayon driver behind the `parallel` feature
//!
//! ## Example
//!
//! ```rust
//! use qpo::{has_property, LabelingSearch, LabeledGraph, SearchConfig};
//!
//! // The 5-cycle fails under its natural labeling...
//! let c5 = LabeledGraph::cycle(5);
//! assert!(!has_property(&c5).holds());
//!
//! // ...and under every other one.
//! let config = SearchConfig::exhaustive().count_successes(true);
//! let report = LabelingSearch::new(&c5, config).run().unwrap();
//! assert!(!report.achievable);
//! assert_eq!(report.examined, 120);
//! assert_eq!(report.success_count, Some(0));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod candidate;
pub mod checker;
pub mod error;
pub mod graph;
pub mod permutation;
pub mod search;

pub use candidate::{candidate_paths, is_candidate_path, oracle_candidate_paths, CandidatePath, CandidatePaths};
pub use checker::{has_property, is_satisfied, violations, Verdict};
pub use error::{QpoError, Result};
pub use graph::{Graph, GraphStatistics, LabeledGraph, SimplePaths, Vertex};
pub use permutation::{factorial, Permutation, Permutations};
pub use search::{find_labeling, Failure, LabelingSearch, SearchConfig, SearchReport};
