//! ALNS execution loop.

use crate::accept::AcceptanceCriterion;
use crate::error::{AlnsError, BoxError, OperatorKind, Result};
use crate::result::{AlnsResult, Statistics};
use crate::select::SelectionScheme;
use crate::stop::StoppingCriterion;
use crate::types::{OperatorFn, OperatorPair, Outcome, OutcomeCallback, State};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Instant;

/// Adaptive Large Neighbourhood Search orchestrator.
///
/// Holds the random number generator and the named destroy/repair
/// operators. Each call to [`iterate`](Self::iterate) runs one complete
/// search from a given initial solution with the supplied strategies:
///
/// 1. the selection scheme picks a (destroy, repair) pair,
/// 2. destroy then repair the current solution into a candidate,
/// 3. classify the candidate as an [`Outcome`] (consulting the acceptance
///    criterion), updating current and best,
/// 4. feed the outcome back to the selection scheme and record statistics,
/// 5. stop once the stopping criterion fires.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_alns::accept::HillClimbing;
/// use u_alns::select::RandomSelect;
/// use u_alns::stop::MaxIterations;
/// use u_alns::{Alns, State};
///
/// #[derive(Clone)]
/// struct Point(i64);
///
/// impl State for Point {
///     fn objective(&self) -> f64 {
///         ((self.0 - 42) * (self.0 - 42)) as f64
///     }
/// }
///
/// let mut alns = Alns::with_seed(1234);
/// alns.add_destroy_operator("perturb", |p: &Point, rng| {
///     Ok(Point(p.0 + rng.random_range(-10..=10)))
/// })
/// .unwrap();
/// alns.add_repair_operator("clamp", |p: &Point, _rng| Ok(Point(p.0.clamp(0, 100))))
///     .unwrap();
///
/// let mut select = RandomSelect::new(1, 1).unwrap();
/// let mut stop = MaxIterations::new(500).unwrap();
/// let result = alns
///     .iterate(Point(0), &mut select, &mut HillClimbing, &mut stop)
///     .unwrap();
///
/// assert_eq!(result.statistics.iterations(), 500);
/// ```
///
/// # References
///
/// Ropke & Pisinger (2006); Pisinger & Ropke (2010)
pub struct Alns<S: State, R: RngCore = StdRng> {
    rng: R,
    destroy_operators: Vec<(String, OperatorFn<S>)>,
    repair_operators: Vec<(String, OperatorFn<S>)>,
    on_outcome: [Option<OutcomeCallback<S>>; Outcome::COUNT],
}

impl<S: State> Alns<S, StdRng> {
    /// Creates an orchestrator with a seeded [`StdRng`].
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<S: State, R: RngCore> Alns<S, R> {
    /// Creates an orchestrator drawing all randomness from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            destroy_operators: Vec::new(),
            repair_operators: Vec::new(),
            on_outcome: std::array::from_fn(|_| None),
        }
    }

    /// Registers a destroy operator under a unique name.
    pub fn add_destroy_operator<F>(&mut self, name: impl Into<String>, op: F) -> Result<()>
    where
        F: FnMut(&S, &mut dyn RngCore) -> std::result::Result<S, BoxError> + 'static,
    {
        add_operator(
            &mut self.destroy_operators,
            OperatorKind::Destroy,
            name.into(),
            Box::new(op),
        )
    }

    /// Registers a repair operator under a unique name.
    pub fn add_repair_operator<F>(&mut self, name: impl Into<String>, op: F) -> Result<()>
    where
        F: FnMut(&S, &mut dyn RngCore) -> std::result::Result<S, BoxError> + 'static,
    {
        add_operator(
            &mut self.repair_operators,
            OperatorKind::Repair,
            name.into(),
            Box::new(op),
        )
    }

    /// Names of the registered destroy operators, in registration order.
    pub fn destroy_operator_names(&self) -> impl Iterator<Item = &str> {
        self.destroy_operators.iter().map(|(name, _)| name.as_str())
    }

    /// Names of the registered repair operators, in registration order.
    pub fn repair_operator_names(&self) -> impl Iterator<Item = &str> {
        self.repair_operators.iter().map(|(name, _)| name.as_str())
    }

    /// Called on each candidate that becomes a new global best, before it
    /// is stored. Useful for polishing new bests with a local search.
    pub fn on_best<F>(&mut self, f: F)
    where
        F: FnMut(&mut S, &mut dyn RngCore) + 'static,
    {
        self.on_outcome[Outcome::Best.index()] = Some(Box::new(f));
    }

    /// Called on each accepted candidate that improves the current solution.
    pub fn on_better<F>(&mut self, f: F)
    where
        F: FnMut(&mut S, &mut dyn RngCore) + 'static,
    {
        self.on_outcome[Outcome::Better.index()] = Some(Box::new(f));
    }

    /// Called on each accepted, non-improving candidate.
    pub fn on_accept<F>(&mut self, f: F)
    where
        F: FnMut(&mut S, &mut dyn RngCore) + 'static,
    {
        self.on_outcome[Outcome::Accepted.index()] = Some(Box::new(f));
    }

    /// Called on each rejected candidate.
    pub fn on_reject<F>(&mut self, f: F)
    where
        F: FnMut(&mut S, &mut dyn RngCore) + 'static,
    {
        self.on_outcome[Outcome::Rejected.index()] = Some(Box::new(f));
    }

    /// Runs the search from `initial_solution` until `stop` fires.
    ///
    /// The stopping criterion is started before the first iteration and
    /// checked after every iteration, so at least one iteration always runs.
    ///
    /// # Errors
    ///
    /// - [`AlnsError::Configuration`] if either operator set is empty, the
    ///   selection scheme was configured for a different number of
    ///   operators, or the initial objective is not finite.
    /// - [`AlnsError::Operator`] as soon as a destroy or repair operator
    ///   fails. The run is abandoned without partial results.
    pub fn iterate<Sel, Acc, Stop>(
        &mut self,
        initial_solution: S,
        select: &mut Sel,
        accept: &mut Acc,
        stop: &mut Stop,
    ) -> Result<AlnsResult<S>>
    where
        Sel: SelectionScheme + ?Sized,
        Acc: AcceptanceCriterion<S> + ?Sized,
        Stop: StoppingCriterion<S> + ?Sized,
    {
        self.validate(select)?;

        let initial_objective = initial_solution.objective();
        if !initial_objective.is_finite() {
            return Err(AlnsError::config(format!(
                "initial objective must be finite, got {initial_objective}"
            )));
        }

        let mut statistics = Statistics::new(
            self.destroy_operator_names(),
            self.repair_operator_names(),
            initial_objective,
        );

        let mut best = initial_solution.clone();
        let mut best_obj = initial_objective;
        let mut current = initial_solution;
        let mut current_obj = initial_objective;

        log::info!(
            "starting ALNS: {} destroy / {} repair operators, initial objective {initial_objective}",
            self.destroy_operators.len(),
            self.repair_operators.len(),
        );
        let run_start = Instant::now();
        stop.start();

        let rng: &mut dyn RngCore = &mut self.rng;
        let mut iteration = 0usize;

        loop {
            iteration += 1;
            let iteration_start = Instant::now();

            let (d_idx, r_idx) = select.select(rng);
            let (d_name, destroy) = self.destroy_operators.get_mut(d_idx).ok_or_else(|| {
                AlnsError::config(format!("selection scheme returned destroy index {d_idx}"))
            })?;
            let (r_name, repair) = self.repair_operators.get_mut(r_idx).ok_or_else(|| {
                AlnsError::config(format!("selection scheme returned repair index {r_idx}"))
            })?;

            let destroyed = destroy(&current, &mut *rng).map_err(|source| AlnsError::Operator {
                kind: OperatorKind::Destroy,
                name: d_name.clone(),
                source,
            })?;
            let mut candidate =
                repair(&destroyed, &mut *rng).map_err(|source| AlnsError::Operator {
                    kind: OperatorKind::Repair,
                    name: r_name.clone(),
                    source,
                })?;
            let mut candidate_obj = candidate.objective();

            // Consulted every iteration, even for new bests.
            let mut outcome = Outcome::Rejected;
            if accept.accept(rng, &best, &current, &candidate) {
                outcome = if candidate_obj < current_obj {
                    Outcome::Better
                } else {
                    Outcome::Accepted
                };
            }
            if candidate_obj < best_obj {
                outcome = Outcome::Best;
            }

            if let Some(callback) = &mut self.on_outcome[outcome.index()] {
                callback(&mut candidate, &mut *rng);
                candidate_obj = candidate.objective();
            }

            if outcome != Outcome::Rejected {
                if candidate_obj < best_obj {
                    log::debug!(
                        "iteration {iteration}: new best {candidate_obj} ({d_name} + {r_name})"
                    );
                    best = candidate.clone();
                    best_obj = candidate_obj;
                }
                current = candidate;
                current_obj = candidate_obj;
            }

            select.update(outcome, d_idx, r_idx);

            log::trace!(
                "iteration {iteration}: {d_name} + {r_name} -> {outcome:?}, current {current_obj}, best {best_obj}"
            );
            statistics.record_iteration(
                OperatorPair {
                    destroy: d_name.clone(),
                    repair: r_name.clone(),
                },
                outcome,
                current_obj,
                best_obj,
                iteration_start.elapsed(),
            );

            if stop.is_finished(rng, &best, &current) {
                break;
            }
        }

        log::info!(
            "ALNS finished after {iteration} iterations in {:?}: best objective {best_obj}",
            run_start.elapsed()
        );

        Ok(AlnsResult {
            best_solution: best,
            statistics,
        })
    }

    fn validate<Sel: SelectionScheme + ?Sized>(&self, select: &Sel) -> Result<()> {
        if self.destroy_operators.is_empty() {
            return Err(AlnsError::config("no destroy operators registered"));
        }
        if self.repair_operators.is_empty() {
            return Err(AlnsError::config("no repair operators registered"));
        }
        if select.num_destroy() != self.destroy_operators.len() {
            return Err(AlnsError::config(format!(
                "selection scheme expects {} destroy operators, {} registered",
                select.num_destroy(),
                self.destroy_operators.len()
            )));
        }
        if select.num_repair() != self.repair_operators.len() {
            return Err(AlnsError::config(format!(
                "selection scheme expects {} repair operators, {} registered",
                select.num_repair(),
                self.repair_operators.len()
            )));
        }
        Ok(())
    }
}

fn add_operator<S>(
    operators: &mut Vec<(String, OperatorFn<S>)>,
    kind: OperatorKind,
    name: String,
    op: OperatorFn<S>,
) -> Result<()> {
    if operators.iter().any(|(existing, _)| *existing == name) {
        return Err(AlnsError::config(format!(
            "duplicate {kind} operator name '{name}'"
        )));
    }
    operators.push((name, op));
    Ok(())
}
