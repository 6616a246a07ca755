//! Operator selection schemes.
//!
//! A scheme picks one destroy and one repair operator per iteration and
//! adapts its internal weights from the observed [`Outcome`]. Operators
//! are addressed by their registration index; the orchestrator resolves
//! indices to names.
//!
//! # References
//!
//! Ropke & Pisinger (2006), Section 3.4

mod random;
mod roulette;
mod segmented;

pub use random::RandomSelect;
pub use roulette::RouletteWheel;
pub use segmented::SegmentedRouletteWheel;

use crate::error::{AlnsError, Result};
use crate::types::Outcome;
use rand::{Rng, RngCore};

/// Chooses a (destroy, repair) operator pair each iteration.
pub trait SelectionScheme {
    /// Selects operator indices `(destroy, repair)`.
    fn select(&mut self, rng: &mut dyn RngCore) -> (usize, usize);

    /// Feeds back the outcome produced by the selected pair.
    fn update(&mut self, outcome: Outcome, destroy: usize, repair: usize);

    /// Number of destroy operators this scheme was configured for.
    fn num_destroy(&self) -> usize;

    /// Number of repair operators this scheme was configured for.
    fn num_repair(&self) -> usize;
}

/// Score awarded to an operator pair for each [`Outcome`].
///
/// Defaults follow Ropke & Pisinger: 33 for a new best, 9 for an improvement,
/// 3 for an accepted non-improving candidate, 0 for a rejection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scores {
    pub best: f64,
    pub better: f64,
    pub accepted: f64,
    pub rejected: f64,
}

impl Default for Scores {
    fn default() -> Self {
        Self {
            best: 33.0,
            better: 9.0,
            accepted: 3.0,
            rejected: 0.0,
        }
    }
}

impl Scores {
    pub fn new(best: f64, better: f64, accepted: f64, rejected: f64) -> Self {
        Self {
            best,
            better,
            accepted,
            rejected,
        }
    }

    /// Score for the given outcome.
    pub fn get(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Best => self.best,
            Outcome::Better => self.better,
            Outcome::Accepted => self.accepted,
            Outcome::Rejected => self.rejected,
        }
    }

    /// Validates that every score is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for outcome in Outcome::ALL {
            let score = self.get(outcome);
            if !score.is_finite() || score < 0.0 {
                return Err(AlnsError::config(format!(
                    "score for {outcome:?} must be finite and non-negative, got {score}"
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_counts(num_destroy: usize, num_repair: usize) -> Result<()> {
    if num_destroy == 0 {
        return Err(AlnsError::config("at least one destroy operator required"));
    }
    if num_repair == 0 {
        return Err(AlnsError::config("at least one repair operator required"));
    }
    Ok(())
}

pub(crate) fn validate_decay(decay: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&decay) {
        return Err(AlnsError::config(format!(
            "decay must be in [0, 1], got {decay}"
        )));
    }
    Ok(())
}

/// Checks a `num_destroy x num_repair` coupling matrix. Each destroy
/// operator must be allowed at least one repair operator.
pub(crate) fn validate_op_coupling(
    matrix: &[Vec<bool>],
    num_destroy: usize,
    num_repair: usize,
) -> Result<()> {
    if matrix.len() != num_destroy {
        return Err(AlnsError::config(format!(
            "op_coupling has {} rows, expected {num_destroy}",
            matrix.len()
        )));
    }
    for (d, row) in matrix.iter().enumerate() {
        if row.len() != num_repair {
            return Err(AlnsError::config(format!(
                "op_coupling row {d} has {} columns, expected {num_repair}",
                row.len()
            )));
        }
        if !row.iter().any(|&allowed| allowed) {
            return Err(AlnsError::config(format!(
                "destroy operator {d} is not coupled to any repair operator"
            )));
        }
    }
    Ok(())
}

/// Roulette wheel selection over `weights`, restricted to `mask` when given.
///
/// Falls back to a uniform draw among the allowed indices when the allowed
/// weights sum to zero (or are not finite). The mask must allow at least
/// one index.
pub(crate) fn roulette_select(
    weights: &[f64],
    mask: Option<&[bool]>,
    rng: &mut dyn RngCore,
) -> usize {
    let allowed = |i: usize| mask.is_none_or(|m| m[i]);

    let total: f64 = weights
        .iter()
        .enumerate()
        .filter(|&(i, _)| allowed(i))
        .map(|(_, &w)| w)
        .sum();

    if !total.is_finite() || total <= 0.0 {
        log::debug!("operator weights sum to {total}, selecting uniformly");
        let candidates: Vec<usize> = (0..weights.len()).filter(|&i| allowed(i)).collect();
        return candidates[rng.random_range(0..candidates.len())];
    }

    let mut roll = rng.random_range(0.0..total);
    let mut last = 0;
    for (i, &w) in weights.iter().enumerate() {
        if !allowed(i) || w <= 0.0 {
            continue;
        }
        last = i;
        roll -= w;
        if roll < 0.0 {
            return i;
        }
    }
    last
}
