//! Exhaustive search over the labelings of a fixed graph structure.
//!
//! Every permutation of the labels is applied to the structure in lexicographic
//! order, the relabeled graph is checked, and the outcome is folded into a
//! [`SearchReport`]. [`SearchConfig`] decides when to stop early and what to count.

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::candidate::CandidatePath;
use crate::checker::{has_property, Verdict};
use crate::error::{QpoError, Result};
use crate::graph::Graph;
use crate::permutation::{factorial, Permutation, Permutations};

/// Number of labelings checked per rayon batch in [`LabelingSearch::run_parallel`].
#[cfg(feature = "parallel")]
pub const PARALLEL_BATCH: usize = 1024;

/// Early-exit and counting policy. The flags combine freely; all unset means an
/// exhaustive search that only reports whether some labeling works.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Stop after the first labeling with the property.
    pub stop_at_first_success: bool,
    /// Stop after the first labeling without the property.
    pub stop_at_first_failure: bool,
    /// Count the labelings with the property among those examined.
    pub count_successes: bool,
}

impl SearchConfig {
    /// Examine every labeling, count nothing.
    pub fn exhaustive() -> Self {
        Self::default()
    }

    /// Sets [`stop_at_first_success`](Self::stop_at_first_success).
    #[must_use]
    pub fn stop_at_first_success(mut self, yes: bool) -> Self {
        self.stop_at_first_success = yes;
        self
    }

    /// Sets [`stop_at_first_failure`](Self::stop_at_first_failure).
    #[must_use]
    pub fn stop_at_first_failure(mut self, yes: bool) -> Self {
        self.stop_at_first_failure = yes;
        self
    }

    /// Sets [`count_successes`](Self::count_successes).
    #[must_use]
    pub fn count_successes(mut self, yes: bool) -> Self {
        self.count_successes = yes;
        self
    }
}

/// A labeling without the property, with the candidate path it fails on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// The labeling applied to the structure.
    pub labeling: Permutation,
    /// An unsatisfied candidate path under that labeling.
    pub witness: CandidatePath,
}

/// Aggregate result of a labeling search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Vertex count of the structure.
    pub order: usize,
    /// Whether some examined labeling has the property.
    pub achievable: bool,
    /// Labelings examined.
    pub examined: usize,
    /// Whether all `order!` labelings were examined.
    pub exhausted: bool,
    /// Labelings with the property, when counting was requested.
    pub success_count: Option<usize>,
    /// The first labeling found with the property.
    pub first_success: Option<Permutation>,
    /// The first labeling found without it.
    pub first_failure: Option<Failure>,
}

/// Searches the labelings of one structure.
///
/// Labelings are relative to the structure's current labels: the permutation `p`
/// turns label `v` into `p[v - 1] + 1`. The structure itself is never modified.
pub struct LabelingSearch<'g, G> {
    structure: &'g G,
    config: SearchConfig,
}

impl<'g, G: Graph> LabelingSearch<'g, G> {
    /// Prepares a search of `structure` under `config`.
    pub fn new(structure: &'g G, config: SearchConfig) -> Self {
        Self { structure, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Number of labelings an exhaustive run examines, `order!`.
    ///
    /// # Errors
    /// [`QpoError::SearchSpaceTooLarge`] if that overflows a `usize`.
    pub fn search_space(&self) -> Result<usize> {
        let n = self.structure.order();
        factorial(n).ok_or(QpoError::SearchSpaceTooLarge(n))
    }

    /// Relabels the structure and checks it.
    ///
    /// # Errors
    /// Fails if `labeling` does not match the structure's order.
    pub fn check(&self, labeling: &Permutation) -> Result<Verdict> {
        let graph = self.structure.relabel(labeling)?;
        Ok(has_property(&graph))
    }

    /// Runs the search on the current thread.
    ///
    /// # Errors
    /// Only if the structure rejects one of its own labelings.
    pub fn run(&self) -> Result<SearchReport> {
        let mut recorder = Recorder::start(self.structure.order(), self.config);
        let mut labelings = Permutations::new(self.structure.order());
        for labeling in labelings.by_ref() {
            let verdict = self.check(&labeling)?;
            if recorder.record(labeling, verdict).is_break() {
                break;
            }
        }
        // A stop on the last labeling still counts as exhausted.
        Ok(recorder.finish(labelings.next().is_none()))
    }
}

#[cfg(feature = "parallel")]
impl<G: Graph + Sync> LabelingSearch<'_, G> {
    /// Runs the search with rayon.
    ///
    /// Labelings are checked in lexicographic batches of [`PARALLEL_BATCH`] and
    /// recorded in order, so the report equals the one [`run`](Self::run) gives.
    /// A batch is always checked in full, even past an early stop.
    ///
    /// # Errors
    /// Only if the structure rejects one of its own labelings.
    pub fn run_parallel(&self) -> Result<SearchReport> {
        use rayon::prelude::*;

        let mut recorder = Recorder::start(self.structure.order(), self.config);
        let mut labelings = Permutations::new(self.structure.order());
        let mut exhausted = true;
        loop {
            let batch: Vec<Permutation> = labelings.by_ref().take(PARALLEL_BATCH).collect();
            if batch.is_empty() {
                break;
            }
            let verdicts = batch
                .par_iter()
                .map(|labeling| self.check(labeling))
                .collect::<Result<Vec<_>>>()?;

            let size = batch.len();
            let stopped_at = batch
                .into_iter()
                .zip(verdicts)
                .position(|(labeling, verdict)| recorder.record(labeling, verdict).is_break());
            if let Some(index) = stopped_at {
                exhausted = index + 1 == size && labelings.next().is_none();
                break;
            }
        }
        Ok(recorder.finish(exhausted))
    }
}

/// Returns a labeling of `structure` with the property, if one exists.
///
/// # Errors
/// Only if the structure rejects one of its own labelings.
pub fn find_labeling<G: Graph>(structure: &G) -> Result<Option<Permutation>> {
    let config = SearchConfig::exhaustive().stop_at_first_success(true);
    Ok(LabelingSearch::new(structure, config).run()?.first_success)
}

/// The RECORD step, shared by the sequential and parallel drivers.
struct Recorder {
    config: SearchConfig,
    report: SearchReport,
}

impl Recorder {
    fn start(order: usize, config: SearchConfig) -> Self {
        info!(order, ?config, "labeling search started");
        Self {
            config,
            report: SearchReport {
                order,
                achievable: false,
                examined: 0,
                exhausted: false,
                success_count: config.count_successes.then_some(0),
                first_success: None,
                first_failure: None,
            },
        }
    }

    fn record(&mut self, labeling: Permutation, verdict: Verdict) -> ControlFlow<()> {
        let report = &mut self.report;
        report.examined += 1;
        trace!(examined = report.examined, %labeling, holds = verdict.holds(), "labeling checked");

        match verdict {
            Verdict::Holds => {
                report.achievable = true;
                if let Some(count) = report.success_count.as_mut() {
                    *count += 1;
                }
                if report.first_success.is_none() {
                    debug!(%labeling, examined = report.examined, "first labeling with the property");
                    report.first_success = Some(labeling);
                }
                if self.config.stop_at_first_success {
                    debug!("stopping at first success");
                    return ControlFlow::Break(());
                }
            }
            Verdict::Violated(witness) => {
                if report.first_failure.is_none() {
                    debug!(%labeling, %witness, examined = report.examined, "first labeling without the property");
                    report.first_failure = Some(Failure { labeling, witness });
                }
                if self.config.stop_at_first_failure {
                    debug!("stopping at first failure");
                    return ControlFlow::Break(());
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn finish(mut self, exhausted: bool) -> SearchReport {
        let report = &mut self.report;
        report.exhausted = exhausted;
        info!(
            examined = report.examined,
            achievable = report.achievable,
            exhausted = report.exhausted,
            success_count = ?report.success_count,
            "labeling search finished"
        );
        self.report
    }
}
