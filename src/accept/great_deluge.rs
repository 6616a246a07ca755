//! Great deluge acceptance.

use super::AcceptanceCriterion;
use crate::error::{AlnsError, Result};
use crate::types::State;
use rand::RngCore;

/// Accepts candidates below a water level that recedes toward accepted values.
///
/// The level starts at `alpha * f(best)` on the first call. After each
/// call it moves toward the candidate's objective:
///
/// level = level - beta * (level - f(candidate))
///
/// Reference: Dueck (1993)
#[derive(Debug, Clone)]
pub struct GreatDeluge {
    alpha: f64,
    beta: f64,
    level: Option<f64>,
}

impl GreatDeluge {
    /// `alpha` must exceed 1; `beta` must be in (0, 1).
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if !(alpha > 1.0) {
            return Err(AlnsError::config(format!(
                "alpha must be greater than 1, got {alpha}"
            )));
        }
        if !(beta > 0.0 && beta < 1.0) {
            return Err(AlnsError::config(format!(
                "beta must be in (0, 1), got {beta}"
            )));
        }
        Ok(Self {
            alpha,
            beta,
            level: None,
        })
    }

    /// Current water level, if initialised.
    pub fn level(&self) -> Option<f64> {
        self.level
    }
}

impl<S: State> AcceptanceCriterion<S> for GreatDeluge {
    fn accept(&mut self, _rng: &mut dyn RngCore, best: &S, _current: &S, candidate: &S) -> bool {
        let level = *self.level.get_or_insert(self.alpha * best.objective());
        let candidate_obj = candidate.objective();

        let accepted = candidate_obj < level;
        self.level = Some(level - self.beta * (level - candidate_obj));
        accepted
    }
}
