//! Weighted discrete sampling

use rand::Rng;
use serde::Serialize;

/// Draw an index from a non-negative weight vector.
///
/// Returns `None` when the vector is empty or every weight is zero.
/// Otherwise draws `r` uniformly in `[0, total)` and returns the first
/// index whose running sum exceeds `r`, so zero-weight entries are never
/// picked.
#[inline]
pub fn pick_weighted<R: Rng + ?Sized>(weights: &[u32], rng: &mut R) -> Option<usize> {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    pick_with_total(weights, total, rng)
}

#[inline]
fn pick_with_total<R: Rng + ?Sized>(weights: &[u32], total: u64, rng: &mut R) -> Option<usize> {
    if total == 0 {
        return None;
    }
    let r = rng.random_range(0..total);
    let mut running = 0u64;
    for (i, &w) in weights.iter().enumerate() {
        running += u64::from(w);
        if running > r {
            return Some(i);
        }
    }
    None
}

/// A weight vector with its total precomputed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightTable {
    weights: Vec<u32>,
    #[serde(skip)]
    total: u64,
}

impl WeightTable {
    pub fn new(weights: impl Into<Vec<u32>>) -> Self {
        let weights = weights.into();
        let total = weights.iter().map(|&w| u64::from(w)).sum();
        Self { weights, total }
    }

    /// Draw an index, `None` if the table has no positive weight
    #[inline]
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        pick_with_total(&self.weights, self.total, rng)
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Exact probability of drawing `index`
    pub fn probability(&self, index: usize) -> f64 {
        match self.weights.get(index) {
            Some(&w) if self.total > 0 => f64::from(w) / self.total as f64,
            _ => 0.0,
        }
    }

    /// Expected drawn index
    pub fn mean(&self) -> f64 {
        (0..self.len()).map(|i| i as f64 * self.probability(i)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_and_empty_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(pick_weighted(&[], &mut rng), None);
        assert_eq!(pick_weighted(&[0, 0, 0], &mut rng), None);
        assert_eq!(WeightTable::new(vec![0, 0]).pick(&mut rng), None);
    }

    #[test]
    fn test_single_nonzero_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..1000 {
            assert_eq!(pick_weighted(&[0, 0, 7, 0], &mut rng), Some(2));
        }
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let table = WeightTable::new(vec![5, 0, 5, 0]);
        for _ in 0..10_000 {
            let i = table.pick(&mut rng).unwrap();
            assert!(i == 0 || i == 2);
        }
    }

    #[test]
    fn test_frequencies_converge() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let table = WeightTable::new(vec![2100, 820, 200, 32, 6, 1]);
        let draws = 400_000;
        let mut counts = [0u32; 6];
        for _ in 0..draws {
            counts[table.pick(&mut rng).unwrap()] += 1;
        }
        for (i, &count) in counts.iter().enumerate().take(3) {
            let observed = f64::from(count) / f64::from(draws);
            assert_relative_eq!(observed, table.probability(i), max_relative = 0.03);
        }
    }

    #[test]
    fn test_large_weights_do_not_overflow() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let table = WeightTable::new(vec![u32::MAX, u32::MAX]);
        assert_eq!(table.total(), 2 * u64::from(u32::MAX));
        assert!(table.pick(&mut rng).is_some());
    }

    #[test]
    fn test_probability_and_mean() {
        let table = WeightTable::new(vec![1, 1, 2]);
        assert_relative_eq!(table.probability(2), 0.5);
        assert_relative_eq!(table.probability(9), 0.0);
        assert_relative_eq!(table.mean(), 1.25);
    }
}
