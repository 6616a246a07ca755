//! Segment-based roulette wheel selection.

use super::{
    roulette_select, validate_counts, validate_decay, validate_op_coupling, Scores,
    SelectionScheme,
};
use crate::error::{AlnsError, Result};
use crate::types::Outcome;
use rand::RngCore;

/// Scores gathered by one operator in the running segment.
#[derive(Debug, Clone, Default)]
struct SegmentScore {
    total: f64,
    uses: usize,
}

impl SegmentScore {
    fn record(&mut self, score: f64) {
        self.total += score;
        self.uses += 1;
    }

    /// Folds the segment into `weight` and restarts the segment.
    ///
    /// w_new = decay * w + (1 - decay) * (pi_j / theta_j)
    ///
    /// where pi_j = accumulated score, theta_j = times used in segment.
    /// Operators unused in the segment keep their weight.
    ///
    /// Reference: Ropke & Pisinger (2006), Equation (1)
    fn close(&mut self, weight: &mut f64, decay: f64) {
        if self.uses > 0 {
            let avg_score = self.total / self.uses as f64;
            *weight = decay * *weight + (1.0 - decay) * avg_score;
        }
        *self = Self::default();
    }
}

/// Roulette wheel selection whose weights only change at segment boundaries.
///
/// Scores are accumulated for `segment_length` iterations; weights are
/// then refreshed from each operator's average segment score and the
/// segment restarts. Weights stay fixed within a segment.
///
/// # Examples
///
/// ```
/// use u_alns::select::{Scores, SegmentedRouletteWheel};
///
/// let scheme = SegmentedRouletteWheel::new(Scores::default(), 0.8, 100, 3, 3).unwrap();
/// assert_eq!(scheme.segment_length(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentedRouletteWheel {
    scores: Scores,
    decay: f64,
    segment_length: usize,
    destroy_weights: Vec<f64>,
    repair_weights: Vec<f64>,
    destroy_segment: Vec<SegmentScore>,
    repair_segment: Vec<SegmentScore>,
    op_coupling: Option<Vec<Vec<bool>>>,
    updates: usize,
}

impl SegmentedRouletteWheel {
    pub fn new(
        scores: Scores,
        decay: f64,
        segment_length: usize,
        num_destroy: usize,
        num_repair: usize,
    ) -> Result<Self> {
        validate_counts(num_destroy, num_repair)?;
        validate_decay(decay)?;
        scores.validate()?;
        if segment_length == 0 {
            return Err(AlnsError::config("segment_length must be positive"));
        }
        Ok(Self {
            scores,
            decay,
            segment_length,
            destroy_weights: vec![1.0; num_destroy],
            repair_weights: vec![1.0; num_repair],
            destroy_segment: vec![SegmentScore::default(); num_destroy],
            repair_segment: vec![SegmentScore::default(); num_repair],
            op_coupling: None,
            updates: 0,
        })
    }

    /// Restricts which repair operators may follow each destroy operator.
    pub fn with_op_coupling(mut self, matrix: Vec<Vec<bool>>) -> Result<Self> {
        validate_op_coupling(&matrix, self.destroy_weights.len(), self.repair_weights.len())?;
        self.op_coupling = Some(matrix);
        Ok(self)
    }

    pub fn segment_length(&self) -> usize {
        self.segment_length
    }

    pub fn destroy_weights(&self) -> &[f64] {
        &self.destroy_weights
    }

    pub fn repair_weights(&self) -> &[f64] {
        &self.repair_weights
    }

    fn close_segment(&mut self) {
        for (segment, weight) in self.destroy_segment.iter_mut().zip(&mut self.destroy_weights) {
            segment.close(weight, self.decay);
        }
        for (segment, weight) in self.repair_segment.iter_mut().zip(&mut self.repair_weights) {
            segment.close(weight, self.decay);
        }
        log::trace!(
            "segment closed: destroy weights {:?}, repair weights {:?}",
            self.destroy_weights,
            self.repair_weights
        );
    }
}

impl SelectionScheme for SegmentedRouletteWheel {
    fn select(&mut self, rng: &mut dyn RngCore) -> (usize, usize) {
        let d = roulette_select(&self.destroy_weights, None, rng);
        let mask = self.op_coupling.as_ref().map(|m| m[d].as_slice());
        let r = roulette_select(&self.repair_weights, mask, rng);
        (d, r)
    }

    fn update(&mut self, outcome: Outcome, destroy: usize, repair: usize) {
        let score = self.scores.get(outcome);
        self.destroy_segment[destroy].record(score);
        self.repair_segment[repair].record(score);

        self.updates += 1;
        if self.updates.is_multiple_of(self.segment_length) {
            self.close_segment();
        }
    }

    fn num_destroy(&self) -> usize {
        self.destroy_weights.len()
    }

    fn num_repair(&self) -> usize {
        self.repair_weights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_segment_length() {
        assert!(SegmentedRouletteWheel::new(Scores::default(), 0.5, 0, 1, 1).is_err());
    }

    #[test]
    fn test_empty_operator_sets() {
        assert!(SegmentedRouletteWheel::new(Scores::default(), 0.5, 10, 0, 1).is_err());
        assert!(SegmentedRouletteWheel::new(Scores::default(), 0.5, 10, 1, 0).is_err());
    }

    #[test]
    fn test_weights_fixed_within_segment() {
        let mut scheme = SegmentedRouletteWheel::new(Scores::default(), 0.5, 3, 2, 1).unwrap();
        scheme.update(Outcome::Best, 0, 0);
        scheme.update(Outcome::Best, 0, 0);
        assert_eq!(scheme.destroy_weights(), &[1.0, 1.0]);

        scheme.update(Outcome::Rejected, 0, 0);
        // avg = (33 + 33 + 0) / 3 = 22; w = 0.5 * 1 + 0.5 * 22
        assert!((scheme.destroy_weights()[0] - 11.5).abs() < 1e-10);
        // unused in segment: unchanged
        assert!((scheme.destroy_weights()[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_segment_resets() {
        let mut scheme =
            SegmentedRouletteWheel::new(Scores::new(10.0, 0.0, 0.0, 0.0), 0.0, 1, 1, 1).unwrap();
        scheme.update(Outcome::Best, 0, 0);
        assert!((scheme.destroy_weights()[0] - 10.0).abs() < 1e-10);
        scheme.update(Outcome::Rejected, 0, 0);
        assert!(scheme.destroy_weights()[0].abs() < 1e-10);
    }

    #[test]
    fn test_decayed_to_zero_still_selects() {
        let mut scheme =
            SegmentedRouletteWheel::new(Scores::new(0.0, 0.0, 0.0, 0.0), 0.0, 1, 2, 2).unwrap();
        scheme.update(Outcome::Rejected, 0, 0);
        scheme.update(Outcome::Rejected, 1, 1);
        assert!(scheme.destroy_weights().iter().all(|&w| w == 0.0));

        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let (d, r) = scheme.select(&mut rng);
            assert!(d < 2 && r < 2);
        }
    }

    #[test]
    fn test_weight_carries_across_segments() {
        let mut scheme =
            SegmentedRouletteWheel::new(Scores::default(), 0.5, 1, 2, 1).unwrap();
        scheme.update(Outcome::Best, 0, 0);
        // 0.5 * 1 + 0.5 * 33
        assert!((scheme.destroy_weights()[0] - 17.0).abs() < 1e-10);
        scheme.update(Outcome::Rejected, 0, 0);
        assert!((scheme.destroy_weights()[0] - 8.5).abs() < 1e-10);
        assert!((scheme.repair_weights()[0] - 8.5).abs() < 1e-10);
        assert_eq!(scheme.destroy_weights()[1], 1.0);
    }
}
