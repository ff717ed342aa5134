//! On-path membership for backtracking path searches.
//!
//! Both [`SimplePaths`](crate::graph::SimplePaths) and
//! [`CandidatePaths`](crate::CandidatePaths) grow one path at a time and need an O(1)
//! "is this vertex already on the path" test that is undone on backtrack.

use crate::graph::Vertex;

/// A dense membership set indexed by vertex label.
#[derive(Clone, Debug, Default)]
pub(crate) struct OnPath {
    flags: Vec<bool>,
}

impl OnPath {
    /// Creates an empty set able to hold labels `0..=max_vertex`.
    pub(crate) fn with_max(max_vertex: Vertex) -> Self {
        Self {
            flags: vec![false; max_vertex + 1],
        }
    }

    #[inline]
    pub(crate) fn contains(&self, vertex: Vertex) -> bool {
        self.flags.get(vertex).copied().unwrap_or(false)
    }

    #[inline]
    pub(crate) fn mark(&mut self, vertex: Vertex) {
        self.flags[vertex] = true;
    }

    #[inline]
    pub(crate) fn unmark(&mut self, vertex: Vertex) {
        self.flags[vertex] = false;
    }

    pub(crate) fn clear(&mut self) {
        self.flags.fill(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_unmark() {
        let mut set = OnPath::with_max(4);
        assert!(!set.contains(3));
        set.mark(3);
        assert!(set.contains(3));
        set.unmark(3);
        assert!(!set.contains(3));

        set.mark(1);
        set.mark(4);
        set.clear();
        assert!(!set.contains(1) && !set.contains(4));
    }

    #[test]
    fn out_of_range_is_absent() {
        let set = OnPath::with_max(2);
        assert!(!set.contains(7));
    }
}
