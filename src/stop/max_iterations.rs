//! Iteration-count stopping criterion.

use super::StoppingCriterion;
use crate::error::{AlnsError, Result};
use crate::types::State;
use rand::RngCore;

/// Stops after a fixed number of iterations.
///
/// Configured with `n`, calls 1 through `n - 1` return `false` and call
/// `n` returns `true`.
#[derive(Debug, Clone)]
pub struct MaxIterations {
    max_iterations: usize,
    current_iteration: usize,
}

impl MaxIterations {
    pub fn new(max_iterations: usize) -> Result<Self> {
        if max_iterations == 0 {
            return Err(AlnsError::config("max_iterations must be positive"));
        }
        Ok(Self {
            max_iterations,
            current_iteration: 0,
        })
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

impl<S: State> StoppingCriterion<S> for MaxIterations {
    fn is_finished(&mut self, _rng: &mut dyn RngCore, _best: &S, _current: &S) -> bool {
        self.current_iteration += 1;
        self.current_iteration >= self.max_iterations
    }
}
