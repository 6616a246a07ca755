//! Roulette wheel selection with exponentially decaying weights.

use super::{
    roulette_select, validate_counts, validate_decay, validate_op_coupling, Scores,
    SelectionScheme,
};
use crate::error::Result;
use crate::types::Outcome;
use rand::RngCore;

/// Roulette wheel selection with per-iteration weight updates.
///
/// After each iteration the selected destroy and repair operators'
/// weights are updated as
///
/// w_new = decay * w + (1 - decay) * score(outcome)
///
/// A `decay` close to 1 keeps long memory; 0 uses only the latest score.
///
/// # Examples
///
/// ```
/// use u_alns::select::{RouletteWheel, Scores, SelectionScheme};
///
/// let scheme = RouletteWheel::new(Scores::default(), 0.8, 3, 2).unwrap();
/// assert_eq!(scheme.num_destroy(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    scores: Scores,
    decay: f64,
    destroy_weights: Vec<f64>,
    repair_weights: Vec<f64>,
    op_coupling: Option<Vec<Vec<bool>>>,
}

impl RouletteWheel {
    pub fn new(scores: Scores, decay: f64, num_destroy: usize, num_repair: usize) -> Result<Self> {
        validate_counts(num_destroy, num_repair)?;
        validate_decay(decay)?;
        scores.validate()?;
        Ok(Self {
            scores,
            decay,
            destroy_weights: vec![1.0; num_destroy],
            repair_weights: vec![1.0; num_repair],
            op_coupling: None,
        })
    }

    /// Restricts which repair operators may follow each destroy operator.
    ///
    /// `matrix[d][r]` is true when repair `r` may be paired with destroy `d`.
    pub fn with_op_coupling(mut self, matrix: Vec<Vec<bool>>) -> Result<Self> {
        validate_op_coupling(&matrix, self.destroy_weights.len(), self.repair_weights.len())?;
        self.op_coupling = Some(matrix);
        Ok(self)
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn destroy_weights(&self) -> &[f64] {
        &self.destroy_weights
    }

    pub fn repair_weights(&self) -> &[f64] {
        &self.repair_weights
    }
}

impl SelectionScheme for RouletteWheel {
    fn select(&mut self, rng: &mut dyn RngCore) -> (usize, usize) {
        let d = roulette_select(&self.destroy_weights, None, rng);
        let mask = self.op_coupling.as_ref().map(|m| m[d].as_slice());
        let r = roulette_select(&self.repair_weights, mask, rng);
        (d, r)
    }

    fn update(&mut self, outcome: Outcome, destroy: usize, repair: usize) {
        let score = self.scores.get(outcome);
        let decay = self.decay;
        let w = &mut self.destroy_weights[destroy];
        *w = decay * *w + (1.0 - decay) * score;
        let w = &mut self.repair_weights[repair];
        *w = decay * *w + (1.0 - decay) * score;
    }

    fn num_destroy(&self) -> usize {
        self.destroy_weights.len()
    }

    fn num_repair(&self) -> usize {
        self.repair_weights.len()
    }
}
