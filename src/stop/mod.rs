//! Stopping criteria.
//!
//! The orchestrator calls [`StoppingCriterion::start`] once before the
//! first iteration, then evaluates the criterion after every iteration;
//! the first `true` ends the run.

mod any_of;
mod max_iterations;
mod max_runtime;
mod no_improvement;

pub use any_of::AnyOf;
pub use max_iterations::MaxIterations;
pub use max_runtime::MaxRuntime;
pub use no_improvement::NoImprovement;

use crate::types::State;
use rand::RngCore;

/// Decides whether the search loop terminates.
pub trait StoppingCriterion<S: State> {
    /// Called once before the first iteration of a run.
    fn start(&mut self) {}

    /// Returns `true` once the search should stop.
    fn is_finished(&mut self, rng: &mut dyn RngCore, best: &S, current: &S) -> bool;
}

impl<S: State, C: StoppingCriterion<S> + ?Sized> StoppingCriterion<S> for Box<C> {
    fn start(&mut self) {
        (**self).start()
    }

    fn is_finished(&mut self, rng: &mut dyn RngCore, best: &S, current: &S) -> bool {
        (**self).is_finished(rng, best, current)
    }
}
