//! Simulated annealing acceptance.

use super::{AcceptanceCriterion, Method};
use crate::error::{AlnsError, Result};
use crate::types::State;
use rand::{Rng, RngCore};

/// Lower bound on the temperature used in the acceptance probability.
const MIN_TEMPERATURE: f64 = 1e-12;

/// Metropolis acceptance with a decaying temperature.
///
/// A candidate is accepted with probability
///
/// p = exp(-(f(candidate) - f(current)) / T)
///
/// so candidates no worse than the current solution are always accepted.
/// After every call `T` moves one step toward `end_temperature`, linearly
/// or geometrically depending on [`Method`].
///
/// # References
///
/// Kirkpatrick et al. (1983); Santini, Ropke & Hvattum (2018)
///
/// # Examples
///
/// ```
/// use u_alns::accept::{Method, SimulatedAnnealing};
///
/// let sa = SimulatedAnnealing::new(100.0, 1.0, 0.99, Method::Exponential).unwrap();
/// assert!((sa.temperature() - 100.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    start_temperature: f64,
    end_temperature: f64,
    step: f64,
    method: Method,
    temperature: f64,
}

impl SimulatedAnnealing {
    pub fn new(
        start_temperature: f64,
        end_temperature: f64,
        step: f64,
        method: Method,
    ) -> Result<Self> {
        if !(start_temperature > 0.0) || !start_temperature.is_finite() {
            return Err(AlnsError::config(format!(
                "start_temperature must be positive, got {start_temperature}"
            )));
        }
        if !(end_temperature > 0.0) {
            return Err(AlnsError::config(format!(
                "end_temperature must be positive, got {end_temperature}"
            )));
        }
        if start_temperature < end_temperature {
            return Err(AlnsError::config(
                "start_temperature must be >= end_temperature",
            ));
        }
        method.validate_step(step)?;

        Ok(Self {
            start_temperature,
            end_temperature,
            step,
            method,
            temperature: start_temperature,
        })
    }

    /// Fits the schedule to an initial objective value.
    ///
    /// The start temperature is chosen so that a candidate `worse` (a
    /// fraction, e.g. 0.05 = 5%) worse than `init_objective` is accepted
    /// with probability `accept_prob`. The temperature then reaches 1
    /// after `num_iters` calls.
    pub fn autofit(
        init_objective: f64,
        worse: f64,
        accept_prob: f64,
        num_iters: usize,
        method: Method,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&worse) {
            return Err(AlnsError::config(format!(
                "worse must be in [0, 1], got {worse}"
            )));
        }
        if !(accept_prob > 0.0 && accept_prob < 1.0) {
            return Err(AlnsError::config(format!(
                "accept_prob must be in (0, 1), got {accept_prob}"
            )));
        }
        if num_iters == 0 {
            return Err(AlnsError::config("num_iters must be positive"));
        }

        let start = -worse * init_objective / accept_prob.ln();
        let end = 1.0;
        let step = method.fit_step(start, end, num_iters);
        log::debug!("autofit simulated annealing: start={start}, end={end}, step={step}");

        Self::new(start, end, step, method)
    }

    pub fn start_temperature(&self) -> f64 {
        self.start_temperature
    }

    pub fn end_temperature(&self) -> f64 {
        self.end_temperature
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Temperature used by the next call.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl<S: State> AcceptanceCriterion<S> for SimulatedAnnealing {
    fn accept(&mut self, rng: &mut dyn RngCore, _best: &S, current: &S, candidate: &S) -> bool {
        let delta = candidate.objective() - current.objective();
        let temperature = self.temperature.max(MIN_TEMPERATURE);
        let probability = (-delta / temperature).exp();

        self.temperature = self
            .method
            .advance(self.temperature, self.step, self.end_temperature);

        rng.random::<f64>() < probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::testing::Obj;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_validation() {
        assert!(SimulatedAnnealing::new(0.0, 0.0, 0.5, Method::Exponential).is_err());
        assert!(SimulatedAnnealing::new(10.0, 0.0, 0.5, Method::Exponential).is_err());
        assert!(SimulatedAnnealing::new(1.0, 10.0, 0.5, Method::Exponential).is_err());
        assert!(SimulatedAnnealing::new(10.0, 1.0, 1.5, Method::Exponential).is_err());
        assert!(SimulatedAnnealing::new(10.0, 1.0, -1.0, Method::Linear).is_err());
        assert!(SimulatedAnnealing::new(10.0, 1.0, 2.0, Method::Linear).is_ok());
    }

    #[test]
    fn test_always_accepts_improving_and_equal() {
        let mut sa = SimulatedAnnealing::new(1.0, 1e-6, 0.5, Method::Exponential).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            assert!(sa.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(5.0)));
            assert!(sa.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(1.0)));
        }
    }

    #[test]
    fn test_rejects_much_worse_at_low_temperature() {
        let mut sa = SimulatedAnnealing::new(1e-6, 1e-6, 1.0, Method::Exponential).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            assert!(!sa.accept(&mut rng, &Obj(0.0), &Obj(1.0), &Obj(100.0)));
        }
    }

    #[test]
    fn test_temperature_decays_to_end() {
        let mut sa = SimulatedAnnealing::new(10.0, 2.0, 3.0, Method::Linear).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        sa.accept(&mut rng, &Obj(0.0), &Obj(0.0), &Obj(0.0));
        assert!((sa.temperature() - 7.0).abs() < 1e-10);
        for _ in 0..10 {
            sa.accept(&mut rng, &Obj(0.0), &Obj(0.0), &Obj(0.0));
        }
        assert!((sa.temperature() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_acceptance_rate_matches_probability() {
        // delta = 1, T = 1 => p = e^-1 ~ 0.368
        let mut rng = StdRng::seed_from_u64(123);
        let mut accepted = 0;
        let trials = 20_000;
        for _ in 0..trials {
            let mut sa = SimulatedAnnealing::new(1.0, 1.0, 1.0, Method::Exponential).unwrap();
            if sa.accept(&mut rng, &Obj(0.0), &Obj(0.0), &Obj(1.0)) {
                accepted += 1;
            }
        }
        let rate = accepted as f64 / trials as f64;
        assert!((rate - (-1.0f64).exp()).abs() < 0.02, "rate {rate}");
    }

    #[test]
    fn test_autofit() {
        let sa = SimulatedAnnealing::autofit(1000.0, 0.05, 0.5, 100, Method::Exponential).unwrap();
        let expected = -0.05 * 1000.0 / 0.5f64.ln();
        assert!((sa.start_temperature() - expected).abs() < 1e-9);
        assert!((sa.end_temperature() - 1.0).abs() < 1e-10);

        assert!(SimulatedAnnealing::autofit(1000.0, 1.5, 0.5, 100, Method::Linear).is_err());
        assert!(SimulatedAnnealing::autofit(1000.0, 0.05, 1.0, 100, Method::Linear).is_err());
        assert!(SimulatedAnnealing::autofit(1000.0, 0.05, 0.5, 0, Method::Linear).is_err());
    }
}
