//! Late acceptance hill climbing.

use super::AcceptanceCriterion;
use crate::types::State;
use rand::RngCore;
use std::collections::VecDeque;

/// Compares candidates against the current objective from `lookback_period`
/// iterations ago.
///
/// With `greedy`, candidates that improve on the current solution are also
/// accepted. With `better_history`, the history records the minimum of the
/// current objective and the value being compared against.
///
/// A lookback period of 0 reduces to hill climbing.
///
/// Reference: Burke & Bykov (2017)
#[derive(Debug, Clone)]
pub struct LateAcceptanceHillClimbing {
    lookback_period: usize,
    greedy: bool,
    better_history: bool,
    history: VecDeque<f64>,
}

impl LateAcceptanceHillClimbing {
    pub fn new(lookback_period: usize, greedy: bool, better_history: bool) -> Self {
        Self {
            lookback_period,
            greedy,
            better_history,
            history: VecDeque::with_capacity(lookback_period + 1),
        }
    }

    pub fn lookback_period(&self) -> usize {
        self.lookback_period
    }

    fn record(&mut self, value: f64) {
        self.history.push_back(value);
        if self.history.len() > self.lookback_period {
            self.history.pop_front();
        }
    }
}

impl<S: State> AcceptanceCriterion<S> for LateAcceptanceHillClimbing {
    fn accept(&mut self, _rng: &mut dyn RngCore, _best: &S, current: &S, candidate: &S) -> bool {
        let current_obj = current.objective();
        let candidate_obj = candidate.objective();

        let Some(&late) = self.history.front() else {
            self.record(current_obj);
            return candidate_obj < current_obj;
        };

        let mut accepted = candidate_obj < late;
        if !accepted && self.greedy {
            accepted = candidate_obj < current_obj;
        }

        if self.better_history {
            self.record(current_obj.min(late));
        } else {
            self.record(current_obj);
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::testing::Obj;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_lookback_is_hill_climbing() {
        let mut lahc = LateAcceptanceHillClimbing::new(0, false, false);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(lahc.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(4.0)));
        assert!(!lahc.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(5.0)));
        assert!(!lahc.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(6.0)));
    }

    #[test]
    fn test_compares_against_late_value() {
        let mut lahc = LateAcceptanceHillClimbing::new(2, false, false);
        let mut rng = StdRng::seed_from_u64(0);

        // Empty history: hill climbing, records 10.
        assert!(lahc.accept(&mut rng, &Obj(0.0), &Obj(10.0), &Obj(9.0)));
        // history [10]: 9.5 < 10
        assert!(lahc.accept(&mut rng, &Obj(0.0), &Obj(9.0), &Obj(9.5)));
        // history [10, 9]: 11 > 10
        assert!(!lahc.accept(&mut rng, &Obj(0.0), &Obj(9.5), &Obj(11.0)));
        // history [9, 9.5]: 9.2 < 9 fails
        assert!(!lahc.accept(&mut rng, &Obj(0.0), &Obj(9.5), &Obj(9.2)));
    }

    #[test]
    fn test_greedy() {
        let mut lahc = LateAcceptanceHillClimbing::new(1, true, false);
        let mut rng = StdRng::seed_from_u64(0);
        lahc.accept(&mut rng, &Obj(0.0), &Obj(1.0), &Obj(2.0));
        // history [1]; candidate 4 is not < 1 but < current 5
        assert!(lahc.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(4.0)));
    }

    #[test]
    fn test_better_history() {
        let mut lahc = LateAcceptanceHillClimbing::new(1, false, true);
        let mut rng = StdRng::seed_from_u64(0);
        lahc.accept(&mut rng, &Obj(0.0), &Obj(1.0), &Obj(2.0));
        // late = 1, current = 5 => records min(5, 1) = 1
        lahc.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(4.0));
        assert!(!lahc.accept(&mut rng, &Obj(0.0), &Obj(5.0), &Obj(3.0)));
    }
}
