//! Acceptance criteria.
//!
//! An acceptance criterion decides whether a repaired candidate replaces
//! the current solution. Criteria may carry internal state (temperature,
//! threshold, water level) that advances once per call.

mod great_deluge;
mod hill_climbing;
mod late_acceptance;
mod record_to_record;
mod simulated_annealing;

pub use great_deluge::GreatDeluge;
pub use hill_climbing::{AlwaysAccept, HillClimbing};
pub use late_acceptance::LateAcceptanceHillClimbing;
pub use record_to_record::RecordToRecordTravel;
pub use simulated_annealing::SimulatedAnnealing;

use crate::error::{AlnsError, Result};
use crate::types::State;
use rand::RngCore;

/// Decides whether a candidate becomes the new current solution.
pub trait AcceptanceCriterion<S: State> {
    /// Returns `true` to make `candidate` the current solution.
    fn accept(&mut self, rng: &mut dyn RngCore, best: &S, current: &S, candidate: &S) -> bool;
}

impl<S: State, A: AcceptanceCriterion<S> + ?Sized> AcceptanceCriterion<S> for Box<A> {
    fn accept(&mut self, rng: &mut dyn RngCore, best: &S, current: &S, candidate: &S) -> bool {
        (**self).accept(rng, best, current, candidate)
    }
}

/// How a temperature or threshold moves toward its end value.
///
/// - Linear: `v_{k+1} = v_k - step`
/// - Exponential: `v_{k+1} = v_k * step`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    Linear,
    #[default]
    Exponential,
}

impl Method {
    /// Advances `value` by one step, never passing `end`.
    pub(crate) fn advance(self, value: f64, step: f64, end: f64) -> f64 {
        let next = match self {
            Method::Linear => value - step,
            Method::Exponential => value * step,
        };
        next.max(end)
    }

    /// Step that moves `start` to `end` in `num_iters` updates.
    pub(crate) fn fit_step(self, start: f64, end: f64, num_iters: usize) -> f64 {
        match self {
            Method::Linear => (start - end) / num_iters as f64,
            Method::Exponential => (end / start).powf(1.0 / num_iters as f64),
        }
    }

    /// Checks that `step` is meaningful for this method.
    pub(crate) fn validate_step(self, step: f64) -> Result<()> {
        if !step.is_finite() || step < 0.0 {
            return Err(AlnsError::config(format!(
                "step must be finite and non-negative, got {step}"
            )));
        }
        if self == Method::Exponential && step > 1.0 {
            return Err(AlnsError::config(format!(
                "exponential step must be in [0, 1], got {step}"
            )));
        }
        Ok(())
    }
}
