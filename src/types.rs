//! Core types shared by the orchestrator and its strategies.

use crate::error::BoxError;
use rand::RngCore;

/// A solution state the search can evaluate.
///
/// The framework never inspects or mutates a state beyond calling
/// [`objective`](State::objective); operators always return a new state.
///
/// # Minimization
///
/// Lower objective values are better. For maximization, negate the value.
///
/// # Examples
///
/// ```
/// use u_alns::State;
///
/// #[derive(Clone)]
/// struct Point(i64);
///
/// impl State for Point {
///     fn objective(&self) -> f64 {
///         ((self.0 - 42) * (self.0 - 42)) as f64
///     }
/// }
/// ```
pub trait State: Clone {
    /// Computes the objective value. Lower is better.
    fn objective(&self) -> f64;
}

/// A destroy or repair operator: maps a state to a new candidate state.
pub type OperatorFn<S> = Box<dyn FnMut(&S, &mut dyn RngCore) -> Result<S, BoxError>>;

/// Hook invoked on a candidate after its [`Outcome`] is known.
pub type OutcomeCallback<S> = Box<dyn FnMut(&mut S, &mut dyn RngCore)>;

/// Classification of one iteration's candidate.
///
/// Ordered from most to least favourable. Selection schemes index their
/// score tables by [`Outcome::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Candidate is a new global best.
    Best,
    /// Candidate was accepted and improves on the current solution.
    Better,
    /// Candidate was accepted without improving on the current solution.
    Accepted,
    /// Candidate was rejected.
    Rejected,
}

impl Outcome {
    /// Number of outcome variants.
    pub const COUNT: usize = 4;

    /// All outcomes, in index order.
    pub const ALL: [Outcome; Outcome::COUNT] = [
        Outcome::Best,
        Outcome::Better,
        Outcome::Accepted,
        Outcome::Rejected,
    ];

    /// Position of this outcome in score and count tables.
    pub fn index(self) -> usize {
        match self {
            Outcome::Best => 0,
            Outcome::Better => 1,
            Outcome::Accepted => 2,
            Outcome::Rejected => 3,
        }
    }
}

/// The (destroy, repair) operators chosen for one iteration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatorPair {
    pub destroy: String,
    pub repair: String,
}
