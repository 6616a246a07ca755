//! Record-to-record travel acceptance.

use super::{AcceptanceCriterion, Method};
use crate::error::{AlnsError, Result};
use crate::types::State;
use rand::RngCore;

/// Accepts a candidate whose gap to a baseline is within a threshold.
///
/// The baseline is the best solution by default, or the current solution
/// after [`with_compare_to_current`](Self::with_compare_to_current). The
/// threshold moves from `start_threshold` toward `end_threshold` by one
/// step per call.
///
/// Reference: Dueck (1993)
#[derive(Debug, Clone)]
pub struct RecordToRecordTravel {
    start_threshold: f64,
    end_threshold: f64,
    step: f64,
    method: Method,
    compare_to_best: bool,
    threshold: f64,
}

impl RecordToRecordTravel {
    pub fn new(start_threshold: f64, end_threshold: f64, step: f64, method: Method) -> Result<Self> {
        if !(start_threshold >= 0.0) || !(end_threshold >= 0.0) {
            return Err(AlnsError::config("thresholds must be non-negative"));
        }
        if start_threshold < end_threshold {
            return Err(AlnsError::config(
                "start_threshold must be >= end_threshold",
            ));
        }
        method.validate_step(step)?;

        Ok(Self {
            start_threshold,
            end_threshold,
            step,
            method,
            compare_to_best: true,
            threshold: start_threshold,
        })
    }

    /// Fits thresholds as gaps relative to an initial objective value.
    ///
    /// Thresholds start at `start_gap * init_objective` and reach
    /// `end_gap * init_objective` after `num_iters` calls.
    pub fn autofit(
        init_objective: f64,
        start_gap: f64,
        end_gap: f64,
        num_iters: usize,
        method: Method,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&start_gap) || !(0.0..=1.0).contains(&end_gap) {
            return Err(AlnsError::config("gaps must be in [0, 1]"));
        }
        if start_gap < end_gap {
            return Err(AlnsError::config("start_gap must be >= end_gap"));
        }
        if num_iters == 0 {
            return Err(AlnsError::config("num_iters must be positive"));
        }

        let start = start_gap * init_objective;
        let end = end_gap * init_objective;
        let step = method.fit_step(start, end, num_iters);
        log::debug!("autofit record-to-record travel: start={start}, end={end}, step={step}");

        Self::new(start, end, step, method)
    }

    /// Measures the gap against the current solution instead of the best.
    pub fn with_compare_to_current(mut self) -> Self {
        self.compare_to_best = false;
        self
    }

    /// Threshold used by the next call.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn start_threshold(&self) -> f64 {
        self.start_threshold
    }

    pub fn end_threshold(&self) -> f64 {
        self.end_threshold
    }
}

impl<S: State> AcceptanceCriterion<S> for RecordToRecordTravel {
    fn accept(&mut self, _rng: &mut dyn RngCore, best: &S, current: &S, candidate: &S) -> bool {
        let baseline = if self.compare_to_best { best } else { current };
        let accepted = candidate.objective() - baseline.objective() <= self.threshold;

        self.threshold = self
            .method
            .advance(self.threshold, self.step, self.end_threshold);

        accepted
    }
}
