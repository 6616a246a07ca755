//! Wall-clock stopping criterion.

use super::StoppingCriterion;
use crate::error::{AlnsError, Result};
use crate::types::State;
use rand::RngCore;
use std::time::{Duration, Instant};

/// Stops once a wall-clock budget has elapsed.
///
/// The clock starts at [`StoppingCriterion::start`], which the orchestrator
/// calls before the first iteration. Used on its own, the clock starts on
/// the first check.
#[derive(Debug, Clone)]
pub struct MaxRuntime {
    max_runtime: Duration,
    start: Option<Instant>,
}

impl MaxRuntime {
    pub fn new(max_runtime: Duration) -> Result<Self> {
        if max_runtime.is_zero() {
            return Err(AlnsError::config("max_runtime must be positive"));
        }
        Ok(Self {
            max_runtime,
            start: None,
        })
    }

    pub fn max_runtime(&self) -> Duration {
        self.max_runtime
    }
}

impl<S: State> StoppingCriterion<S> for MaxRuntime {
    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn is_finished(&mut self, _rng: &mut dyn RngCore, _best: &S, _current: &S) -> bool {
        let start = *self.start.get_or_insert_with(Instant::now);
        start.elapsed() >= self.max_runtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::testing::Obj;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_rejected() {
        assert!(MaxRuntime::new(Duration::ZERO).is_err());
    }

    #[test]
    fn test_finishes_after_budget() {
        let mut stop = MaxRuntime::new(Duration::from_millis(20)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!stop.is_finished(&mut rng, &Obj(0.0), &Obj(0.0)));
        std::thread::sleep(Duration::from_millis(30));
        assert!(stop.is_finished(&mut rng, &Obj(0.0), &Obj(0.0)));
    }

    #[test]
    fn test_start_begins_clock() {
        let mut stop = MaxRuntime::new(Duration::from_millis(20)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        StoppingCriterion::<Obj>::start(&mut stop);
        std::thread::sleep(Duration::from_millis(30));
        assert!(stop.is_finished(&mut rng, &Obj(0.0), &Obj(0.0)));
    }
}
