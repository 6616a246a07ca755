//! Stagnation-based stopping criterion.

use super::StoppingCriterion;
use crate::types::State;
use rand::RngCore;

/// Stops when the best objective has not strictly improved for
/// `max_iterations` consecutive checks.
///
/// The first check only records the baseline. With `max_iterations == 0`
/// the criterion is finished at the first check.
#[derive(Debug, Clone)]
pub struct NoImprovement {
    max_iterations: usize,
    target: Option<f64>,
    counter: usize,
}

impl NoImprovement {
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            target: None,
            counter: 0,
        }
    }

    /// Consecutive checks without improvement so far.
    pub fn stalled_for(&self) -> usize {
        self.counter
    }
}

impl<S: State> StoppingCriterion<S> for NoImprovement {
    fn is_finished(&mut self, _rng: &mut dyn RngCore, best: &S, _current: &S) -> bool {
        let best_obj = best.objective();
        match self.target {
            Some(target) if best_obj >= target => self.counter += 1,
            _ => {
                self.target = Some(best_obj);
                self.counter = 0;
            }
        }
        self.counter >= self.max_iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::testing::Obj;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_stops_immediately() {
        let mut stop = NoImprovement::new(0);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(stop.is_finished(&mut rng, &Obj(1.0), &Obj(1.0)));
    }

    #[test]
    fn test_stalls_then_stops() {
        let mut stop = NoImprovement::new(2);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!stop.is_finished(&mut rng, &Obj(5.0), &Obj(5.0)));
        assert!(!stop.is_finished(&mut rng, &Obj(5.0), &Obj(6.0)));
        assert!(stop.is_finished(&mut rng, &Obj(5.0), &Obj(7.0)));
    }

    #[test]
    fn test_improvement_resets() {
        let mut stop = NoImprovement::new(2);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!stop.is_finished(&mut rng, &Obj(5.0), &Obj(5.0)));
        assert!(!stop.is_finished(&mut rng, &Obj(5.0), &Obj(5.0)));
        assert!(!stop.is_finished(&mut rng, &Obj(4.0), &Obj(4.0)));
        assert_eq!(stop.stalled_for(), 0);
        assert!(!stop.is_finished(&mut rng, &Obj(4.0), &Obj(4.0)));
        assert!(stop.is_finished(&mut rng, &Obj(4.0), &Obj(4.0)));
    }
}
