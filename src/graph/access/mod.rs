//! Internal graph accessors and low-level building blocks.
//!
//! Shared on-path bookkeeping for the path searches in [`paths`](crate::graph::paths)
//! and [`candidate`](crate::candidate).

pub(crate) mod visited;
