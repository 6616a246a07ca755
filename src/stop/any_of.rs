//! Disjunction of stopping criteria.

use super::StoppingCriterion;
use crate::error::{AlnsError, Result};
use crate::types::State;
use rand::RngCore;

/// Stops when any of its child criteria is finished.
///
/// Every child is evaluated on every call so stateful children (iteration
/// counters, stall counters) stay in step with the search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_alns::stop::{AnyOf, MaxIterations, MaxRuntime, StoppingCriterion};
/// use u_alns::State;
///
/// #[derive(Clone)]
/// struct Cost(f64);
///
/// impl State for Cost {
///     fn objective(&self) -> f64 {
///         self.0
///     }
/// }
///
/// let stop: AnyOf<Cost> = AnyOf::new(vec![
///     Box::new(MaxIterations::new(1000).unwrap()),
///     Box::new(MaxRuntime::new(Duration::from_secs(5)).unwrap()),
/// ])
/// .unwrap();
/// ```
pub struct AnyOf<S: State> {
    criteria: Vec<Box<dyn StoppingCriterion<S>>>,
}

impl<S: State> AnyOf<S> {
    pub fn new(criteria: Vec<Box<dyn StoppingCriterion<S>>>) -> Result<Self> {
        if criteria.is_empty() {
            return Err(AlnsError::config("AnyOf requires at least one criterion"));
        }
        Ok(Self { criteria })
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl<S: State> StoppingCriterion<S> for AnyOf<S> {
    fn start(&mut self) {
        for criterion in &mut self.criteria {
            criterion.start();
        }
    }

    fn is_finished(&mut self, rng: &mut dyn RngCore, best: &S, current: &S) -> bool {
        let mut finished = false;
        for criterion in &mut self.criteria {
            finished |= criterion.is_finished(rng, best, current);
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop::{MaxIterations, MaxRuntime, NoImprovement};
    use std::time::Duration;
    use crate::types::testing::Obj;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_rejected() {
        assert!(AnyOf::<Obj>::new(Vec::new()).is_err());
    }

    #[test]
    fn test_first_to_fire_wins() {
        let mut stop: AnyOf<Obj> = AnyOf::new(vec![
            Box::new(MaxIterations::new(10).unwrap()),
            Box::new(NoImprovement::new(2)),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!stop.is_finished(&mut rng, &Obj(1.0), &Obj(1.0)));
        assert!(!stop.is_finished(&mut rng, &Obj(1.0), &Obj(1.0)));
        assert!(stop.is_finished(&mut rng, &Obj(1.0), &Obj(1.0)));
    }

    #[test]
    fn test_children_advance_together() {
        let mut stop: AnyOf<Obj> = AnyOf::new(vec![
            Box::new(MaxIterations::new(3).unwrap()),
            Box::new(MaxIterations::new(100).unwrap()),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut calls = 0;
        while !stop.is_finished(&mut rng, &Obj(0.0), &Obj(0.0)) {
            calls += 1;
        }
        assert_eq!(calls, 2);
        assert_eq!(stop.len(), 2);
    }

    #[test]
    fn test_start_reaches_children() {
        let mut stop: AnyOf<Obj> = AnyOf::new(vec![
            Box::new(MaxIterations::new(100).unwrap()),
            Box::new(MaxRuntime::new(Duration::from_millis(20)).unwrap()),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        stop.start();
        std::thread::sleep(Duration::from_millis(30));
        assert!(stop.is_finished(&mut rng, &Obj(0.0), &Obj(0.0)));
    }
}
