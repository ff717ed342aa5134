//! The QPO property check for one fixed labeling.
//!
//! A candidate path `a, c, b, ..., d` is satisfied when `a - d` is an edge, or when
//! `d < b` and `c - d` is an edge. The graph has the property when every candidate
//! path is satisfied; a graph without candidate paths has it vacuously.

use serde::Serialize;

use crate::candidate::{CandidatePath, CandidatePaths};
use crate::graph::Graph;

/// Outcome of checking one labeled graph.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "verdict", content = "witness", rename_all = "snake_case")]
pub enum Verdict {
    /// Every candidate path is satisfied.
    Holds,
    /// The first unsatisfied candidate path found.
    Violated(CandidatePath),
}

impl Verdict {
    /// Returns `true` for [`Verdict::Holds`].
    pub fn holds(&self) -> bool {
        matches!(self, Verdict::Holds)
    }

    /// The violating path, if any.
    pub fn witness(&self) -> Option<&CandidatePath> {
        match self {
            Verdict::Holds => None,
            Verdict::Violated(path) => Some(path),
        }
    }

    /// The verdict as a `(holds, witness)` pair.
    pub fn into_parts(self) -> (bool, Option<CandidatePath>) {
        match self {
            Verdict::Holds => (true, None),
            Verdict::Violated(path) => (false, Some(path)),
        }
    }
}

/// Returns `true` iff `path` is satisfied in `graph`.
pub fn is_satisfied<G: Graph>(graph: &G, path: &CandidatePath) -> bool {
    let (a, c, b, d) = (path.a(), path.c(), path.b(), path.d());
    graph.has_edge(a, d) || (d < b && graph.has_edge(c, d))
}

/// Decides the QPO property, stopping at the first unsatisfied candidate path.
pub fn has_property<G: Graph>(graph: &G) -> Verdict {
    violations(graph).next().map_or(Verdict::Holds, Verdict::Violated)
}

/// Lazily yields every unsatisfied candidate path.
pub fn violations<G: Graph>(graph: &G) -> impl Iterator<Item = CandidatePath> + '_ {
    CandidatePaths::new(graph).filter(move |path| !is_satisfied(graph, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::oracle_candidate_paths;
    use crate::graph::LabeledGraph;
    use crate::permutation::Permutations;

    #[test]
    fn empty_and_tiny_graphs_hold_vacuously() {
        for graph in [LabeledGraph::new(0), LabeledGraph::new(1), LabeledGraph::complete(3)] {
            assert_eq!(has_property(&graph).into_parts(), (true, None));
        }
    }

    #[test]
    fn complete_graphs_hold() {
        for n in 4..=10 {
            let verdict = has_property(&LabeledGraph::complete(n));
            assert!(verdict.holds(), "K{n}: {verdict:?}");
        }
    }

    #[test]
    fn path_structure_fails_until_closed() {
        // 1 - 4 - 2 - 3: neither 1 - 3 nor (3 < 2 and 4 - 3).
        let mut graph = LabeledGraph::from_edges(4, [(1, 4), (4, 2), (2, 3)]).unwrap();
        let verdict = has_property(&graph);
        assert_eq!(verdict.witness().map(|p| p.to_vec()), Some(vec![1, 4, 2, 3]));
        assert!(!verdict.holds());

        graph.add_edge(1, 3).unwrap();
        assert_eq!(has_property(&graph), Verdict::Holds);
    }

    #[test]
    fn second_disjunct_needs_d_below_b() {
        // 1 - 4 - 3 - 2 with 4 - 2: d = 2 < b = 3 and c - d holds.
        let graph = LabeledGraph::from_edges(4, [(1, 4), (4, 3), (3, 2), (4, 2)]).unwrap();
        let path = CandidatePath::new(vec![1, 4, 3, 2]).unwrap();
        assert!(is_satisfied(&graph, &path));

        // 1 - 4 - 2 - 3 with 4 - 3: c - d holds but d = 3 > b = 2.
        let graph = LabeledGraph::from_edges(4, [(1, 4), (4, 2), (2, 3), (4, 3)]).unwrap();
        let path = CandidatePath::new(vec![1, 4, 2, 3]).unwrap();
        assert!(!is_satisfied(&graph, &path));
    }

    #[test]
    fn five_cycle_fails_under_natural_labeling() {
        let graph = LabeledGraph::cycle(5);
        let verdict = has_property(&graph);
        let witness = verdict.witness().expect("C5 has a violating candidate path");
        assert!(!is_satisfied(&graph, witness));
    }

    #[test]
    fn verdict_agrees_with_oracle_scan() {
        let base = LabeledGraph::complete_bipartite(2, 3);
        for labeling in Permutations::new(5) {
            let graph = base.relabel(&labeling).unwrap();
            let any_violation = oracle_candidate_paths(&graph)
                .iter()
                .any(|p| !is_satisfied(&graph, p));
            let verdict = has_property(&graph);
            assert_eq!(verdict.holds(), !any_violation, "labeling {labeling}");
            if let Some(witness) = verdict.witness() {
                assert!(!is_satisfied(&graph, witness));
            }
            assert_eq!(violations(&graph).next().is_none(), verdict.holds());
        }
    }

    #[test]
    fn verdict_serializes_with_witness() {
        let verdict = Verdict::Violated(CandidatePath::new(vec![1, 4, 2, 3]).unwrap());
        assert_eq!(
            serde_json::to_string(&verdict).unwrap(),
            r#"{"verdict":"violated","witness":[1,4,2,3]}"#
        );
        assert_eq!(serde_json::to_string(&Verdict::Holds).unwrap(), r#"{"verdict":"holds"}"#);
    }
}
