//! Uniform operator selection.

use super::{validate_counts, SelectionScheme};
use crate::error::Result;
use crate::types::Outcome;
use rand::{Rng, RngCore};

/// Picks destroy and repair operators uniformly at random, ignoring outcomes.
#[derive(Debug, Clone)]
pub struct RandomSelect {
    num_destroy: usize,
    num_repair: usize,
}

impl RandomSelect {
    pub fn new(num_destroy: usize, num_repair: usize) -> Result<Self> {
        validate_counts(num_destroy, num_repair)?;
        Ok(Self {
            num_destroy,
            num_repair,
        })
    }
}

impl SelectionScheme for RandomSelect {
    fn select(&mut self, rng: &mut dyn RngCore) -> (usize, usize) {
        let d = rng.random_range(0..self.num_destroy);
        let r = rng.random_range(0..self.num_repair);
        (d, r)
    }

    fn update(&mut self, _outcome: Outcome, _destroy: usize, _repair: usize) {}

    fn num_destroy(&self) -> usize {
        self.num_destroy
    }

    fn num_repair(&self) -> usize {
        self.num_repair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_destroy_set() {
        let err = RandomSelect::new(0, 2).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_repair_set() {
        assert!(RandomSelect::new(2, 0).is_err());
    }

    #[test]
    fn test_select_in_range_and_covers_all() {
        let mut scheme = RandomSelect::new(3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [[false; 2]; 3];
        for _ in 0..300 {
            let (d, r) = scheme.select(&mut rng);
            assert!(d < 3 && r < 2);
            seen[d][r] = true;
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }
}
