//! Standard graph families under their natural labeling.

use crate::graph::LabeledGraph;

impl LabeledGraph {
    /// The complete graph \(K_n\).
    pub fn complete(n: usize) -> Self {
        let mut graph = Self::new(n);
        for a in 0..n {
            for b in a + 1..n {
                graph.insert_node_edge(a, b);
            }
        }
        graph
    }

    /// The path \(P_n\): `1 - 2 - ... - n`.
    pub fn path(n: usize) -> Self {
        let mut graph = Self::new(n);
        for a in 1..n {
            graph.insert_node_edge(a - 1, a);
        }
        graph
    }

    /// The cycle \(C_n\): `1 - 2 - ... - n - 1`.
    ///
    /// For `n < 3` there is no cycle and this is the path \(P_n\).
    pub fn cycle(n: usize) -> Self {
        let mut graph = Self::path(n);
        if n >= 3 {
            graph.insert_node_edge(n - 1, 0);
        }
        graph
    }

    /// The complete bipartite graph \(K_{m,n}\) with sides `1..=m` and `m+1..=m+n`.
    pub fn complete_bipartite(m: usize, n: usize) -> Self {
        let mut graph = Self::new(m + n);
        for a in 0..m {
            for b in m..m + n {
                graph.insert_node_edge(a, b);
            }
        }
        graph
    }
}
