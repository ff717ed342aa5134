//! Permutations of `0..n` and their lexicographic enumeration.
//!
//! A [`Permutation`] doubles as a vertex labeling: position `i` holds the 0-based
//! rank given to structural node `i`, so the node is labeled `p[i] + 1`.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{QpoError, Result};

/// A validated bijection on `0..len`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Builds a permutation, rejecting out-of-range or repeated values.
    ///
    /// # Errors
    /// Returns [`QpoError::InvalidPermutation`] unless `values` is a bijection on
    /// `0..values.len()`.
    pub fn new(values: impl IntoIterator<Item = usize>) -> Result<Self> {
        let vec: Vec<usize> = values.into_iter().collect();

        let n = vec.len();
        let mut seen = vec![false; n];

        for &value in &vec {
            if value >= n || seen[value] {
                return Err(QpoError::InvalidPermutation(vec));
            }
            seen[value] = true;
        }

        Ok(Self(vec))
    }

    /// Wraps `values` without validation; the caller guarantees a bijection.
    pub(crate) fn new_unchecked(values: Vec<usize>) -> Self {
        debug_assert!(Self::new(values.iter().copied()).is_ok(), "{values:?} is not a permutation");
        Self(values)
    }

    /// The identity permutation on `0..size`.
    pub fn identity(size: usize) -> Self {
        Self((0..size).collect())
    }

    /// Number of elements permuted.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the permutation of the empty set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The inverse permutation.
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.0.len()];
        for (i, &p) in self.0.iter().enumerate() {
            inv[p] = i;
        }
        Self(inv)
    }

    /// The 1-based labels this permutation assigns, in node order.
    pub fn labels(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().map(|&p| p + 1)
    }

    /// Rearranges `self` into the lexicographically next permutation.
    ///
    /// Returns `false` (leaving `self` untouched) when `self` is already the last
    /// one, i.e. strictly decreasing.
    fn advance(&mut self) -> bool {
        let v = &mut self.0;
        let Some(pivot) = (1..v.len()).rev().find(|&i| v[i - 1] < v[i]).map(|i| i - 1) else {
            return false;
        };
        // v[pivot + 1..] is decreasing, so the rightmost larger element is the smallest one.
        let successor = (pivot + 1..v.len())
            .rev()
            .find(|&j| v[j] > v[pivot])
            .unwrap_or(pivot + 1);
        v.swap(pivot, successor);
        v[pivot + 1..].reverse();
        true
    }
}

impl Deref for Permutation {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = QpoError;

    fn try_from(values: Vec<usize>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.0
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, label) in self.labels().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{label}")?;
        }
        f.write_str("]")
    }
}

/// `n!`, or `None` on overflow.
pub fn factorial(n: usize) -> Option<usize> {
    (2..=n).try_fold(1usize, usize::checked_mul)
}

/// Every permutation of `0..n` in lexicographic order, starting at the identity.
///
/// Yields exactly `n!` items; for `n == 0` that is the single empty permutation.
#[derive(Clone, Debug)]
pub struct Permutations {
    next: Option<Permutation>,
}

impl Permutations {
    /// Enumerates the permutations of `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            next: Some(Permutation::identity(n)),
        }
    }
}

impl Iterator for Permutations {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        if successor.advance() {
            self.next = Some(successor);
        }
        Some(current)
    }
}

impl std::iter::FusedIterator for Permutations {}
