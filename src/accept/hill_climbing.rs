//! Greedy and unconditional acceptance.

use super::AcceptanceCriterion;
use crate::types::State;
use rand::RngCore;

/// Accepts a candidate only if it strictly improves on the current solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbing;

impl<S: State> AcceptanceCriterion<S> for HillClimbing {
    fn accept(&mut self, _rng: &mut dyn RngCore, _best: &S, current: &S, candidate: &S) -> bool {
        candidate.objective() < current.objective()
    }
}

/// Accepts every candidate (random walk).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAccept;

impl<S: State> AcceptanceCriterion<S> for AlwaysAccept {
    fn accept(&mut self, _rng: &mut dyn RngCore, _best: &S, _current: &S, _candidate: &S) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::testing::Obj;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hill_climbing_strict() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut hc = HillClimbing;
        assert!(hc.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(4.0)));
        assert!(!hc.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(5.0)));
        assert!(!hc.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(6.0)));
    }

    #[test]
    fn test_always_accept() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(AlwaysAccept.accept(&mut rng, &Obj(0.0), &Obj(1.0), &Obj(1e9)));
    }
}
