use crate::Prize;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fisher-Yates shuffle, in place.
///
/// Walks from the last index down to 1 and swaps each slot with a slot
/// drawn uniformly from `[0, i]`, so every permutation is equally likely
/// given a uniform source.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// The ordered prize sequence, permuted every round but never resized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizePool {
    prizes: Vec<Prize>,
}

impl PrizePool {
    pub fn new(prizes: Vec<Prize>) -> Self {
        Self { prizes }
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prize> {
        self.prizes.iter()
    }

    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle(&mut self.prizes, rng);
        tracing::debug!("Prize pool reshuffled ({} entries)", self.prizes.len());
    }
}

/// How often each prize landed at each position over many shuffles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionReport {
    pub prizes: Vec<Prize>,
    pub trials: u64,
    /// counts[prize][position]
    pub counts: Vec<Vec<u64>>,
}

impl DistributionReport {
    pub fn run<R: Rng + ?Sized>(pool: &PrizePool, trials: u64, rng: &mut R) -> Self {
        let n = pool.len();
        let mut counts = vec![vec![0u64; n]; n];
        let mut order: Vec<usize> = (0..n).collect();

        for _ in 0..trials {
            shuffle(&mut order, rng);
            for (position, &prize) in order.iter().enumerate() {
                counts[prize][position] += 1;
            }
        }

        Self {
            prizes: pool.prizes().to_vec(),
            trials,
            counts,
        }
    }

    pub fn frequency(&self, prize: usize, position: usize) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.counts
            .get(prize)
            .and_then(|row| row.get(position))
            .map_or(0.0, |&count| count as f64 / self.trials as f64)
    }

    pub fn expected(&self) -> f64 {
        if self.prizes.is_empty() {
            0.0
        } else {
            1.0 / self.prizes.len() as f64
        }
    }

    /// Largest absolute gap between an observed frequency and 1/N
    pub fn max_deviation(&self) -> f64 {
        let expected = self.expected();
        let n = self.prizes.len();
        (0..n)
            .flat_map(|prize| (0..n).map(move |position| (prize, position)))
            .map(|(prize, position)| (self.frequency(prize, position) - expected).abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_prizes;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = PrizePool::new(default_prizes());

        for _ in 0..50 {
            pool.reshuffle(&mut rng);
            let mut shuffled: Vec<_> = pool.iter().map(|p| p.label.clone()).collect();
            let mut original: Vec<_> = default_prizes().into_iter().map(|p| p.label).collect();
            shuffled.sort();
            original.sort();
            assert_eq!(shuffled, original);
        }
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![42];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_all_permutations_equally_likely() {
        let mut rng = StdRng::seed_from_u64(0xB0C5);
        let trials = 60_000;
        let mut seen: HashMap<Vec<u8>, u32> = HashMap::new();

        for _ in 0..trials {
            let mut items = vec![0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *seen.entry(items).or_default() += 1;
        }

        assert_eq!(seen.len(), 6);
        for count in seen.values() {
            let freq = *count as f64 / trials as f64;
            assert!((freq - 1.0 / 6.0).abs() < 0.01, "biased frequency {}", freq);
        }
    }

    #[test]
    fn test_distribution_report_is_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let pool = PrizePool::new(default_prizes());
        let report = DistributionReport::run(&pool, 30_000, &mut rng);

        assert_eq!(report.counts.len(), 6);
        for prize in 0..6 {
            let row_total: u64 = report.counts[prize].iter().sum();
            assert_eq!(row_total, 30_000);
        }
        assert!(report.max_deviation() < 0.02);
    }

    #[test]
    fn test_empty_report() {
        let mut rng = StdRng::seed_from_u64(3);
        let report = DistributionReport::run(&PrizePool::new(vec![]), 10, &mut rng);
        assert_eq!(report.expected(), 0.0);
        assert_eq!(report.max_deviation(), 0.0);
    }
}
