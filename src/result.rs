//! Run statistics and the value returned by [`Alns::iterate`].
//!
//! [`Alns::iterate`]: crate::Alns::iterate

use crate::types::{OperatorPair, Outcome};
use std::collections::BTreeMap;
use std::time::Duration;

/// Per-operator outcome counts, indexed by [`Outcome::index`].
pub type OutcomeCounts = [usize; Outcome::COUNT];

/// Time series and counters collected during a run.
///
/// Built by the orchestrator while iterating; read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    objectives: Vec<f64>,
    best_objectives: Vec<f64>,
    runtimes: Vec<Duration>,
    operator_pairs: Vec<OperatorPair>,
    destroy_operator_counts: BTreeMap<String, OutcomeCounts>,
    repair_operator_counts: BTreeMap<String, OutcomeCounts>,
}

impl Statistics {
    pub(crate) fn new<'a>(
        destroy_names: impl IntoIterator<Item = &'a str>,
        repair_names: impl IntoIterator<Item = &'a str>,
        initial_objective: f64,
    ) -> Self {
        Self {
            objectives: vec![initial_objective],
            best_objectives: vec![initial_objective],
            destroy_operator_counts: destroy_names
                .into_iter()
                .map(|name| (name.to_owned(), [0; Outcome::COUNT]))
                .collect(),
            repair_operator_counts: repair_names
                .into_iter()
                .map(|name| (name.to_owned(), [0; Outcome::COUNT]))
                .collect(),
            ..Default::default()
        }
    }

    pub(crate) fn record_iteration(
        &mut self,
        pair: OperatorPair,
        outcome: Outcome,
        current_objective: f64,
        best_objective: f64,
        runtime: Duration,
    ) {
        if let Some(counts) = self.destroy_operator_counts.get_mut(&pair.destroy) {
            counts[outcome.index()] += 1;
        }
        if let Some(counts) = self.repair_operator_counts.get_mut(&pair.repair) {
            counts[outcome.index()] += 1;
        }
        self.objectives.push(current_objective);
        self.best_objectives.push(best_objective);
        self.runtimes.push(runtime);
        self.operator_pairs.push(pair);
    }

    /// Number of completed iterations.
    pub fn iterations(&self) -> usize {
        self.runtimes.len()
    }

    /// Current objective: the initial value followed by one entry per iteration.
    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    /// Best objective: the initial value followed by one entry per iteration.
    /// Non-increasing.
    pub fn best_objectives(&self) -> &[f64] {
        &self.best_objectives
    }

    /// Wall-clock time spent in each iteration.
    pub fn runtimes(&self) -> &[Duration] {
        &self.runtimes
    }

    /// Sum of per-iteration runtimes.
    pub fn total_runtime(&self) -> Duration {
        self.runtimes.iter().sum()
    }

    /// Operator pair selected in each iteration.
    pub fn operator_pairs(&self) -> &[OperatorPair] {
        &self.operator_pairs
    }

    /// Outcome counts per destroy operator name.
    pub fn destroy_operator_counts(&self) -> &BTreeMap<String, OutcomeCounts> {
        &self.destroy_operator_counts
    }

    /// Outcome counts per repair operator name.
    pub fn repair_operator_counts(&self) -> &BTreeMap<String, OutcomeCounts> {
        &self.repair_operator_counts
    }

    /// Total number of times the named destroy operator was selected.
    pub fn destroy_operator_uses(&self, name: &str) -> usize {
        self.destroy_operator_counts
            .get(name)
            .map_or(0, |counts| counts.iter().sum())
    }

    /// Total number of times the named repair operator was selected.
    pub fn repair_operator_uses(&self, name: &str) -> usize {
        self.repair_operator_counts
            .get(name)
            .map_or(0, |counts| counts.iter().sum())
    }
}

/// Result of an ALNS run.
#[derive(Debug, Clone)]
pub struct AlnsResult<S> {
    /// The best solution found.
    pub best_solution: S,

    /// Statistics collected during the run.
    pub statistics: Statistics,
}

impl<S> AlnsResult<S> {
    /// Objective of the best solution, as recorded after the last iteration.
    pub fn best_objective(&self) -> f64 {
        self.statistics
            .best_objectives()
            .last()
            .copied()
            .unwrap_or(f64::NAN)
    }
}
