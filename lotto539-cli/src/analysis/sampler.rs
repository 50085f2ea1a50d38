use anyhow::Result;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use lotto539_db::models::{NumberProbability, POOL_SIZE};

use crate::analysis::patterns::{is_pattern_reasonable, PatternStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum SuggestionStrategy {
    /// Uniform sample from the full pool
    Random,
    /// Prefer the most frequent numbers in the window
    Hot,
    /// Prefer the least frequent numbers in the window
    Cold,
    /// Rejection-sample a group that matches historical draw patterns
    #[default]
    Smart,
    /// Mix of hot, cold, and random numbers
    Balanced,
    /// Weighted sampling from the time-decayed frequency distribution
    Weighted,
}

impl SuggestionStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            SuggestionStrategy::Random => "random",
            SuggestionStrategy::Hot => "hot",
            SuggestionStrategy::Cold => "cold",
            SuggestionStrategy::Smart => "smart",
            SuggestionStrategy::Balanced => "balanced",
            SuggestionStrategy::Weighted => "weighted",
        }
    }
}

/// Everything a strategy may draw on. Passed explicitly; no shared
/// hot/cold caches between calls.
pub struct SuggestionInputs<'a> {
    pub hot: &'a [u8],
    pub cold: &'a [u8],
    pub patterns: Option<&'a PatternStats>,
    pub weighted: &'a [NumberProbability],
}

fn pool() -> Vec<u8> {
    (1..=POOL_SIZE).collect()
}

fn sample_from(candidates: &[u8], n: usize, rng: &mut StdRng) -> Vec<u8> {
    candidates.choose_multiple(rng, n).copied().collect()
}

/// Generate one suggestion of `n` distinct numbers, sorted ascending.
/// A seed makes the output reproducible.
pub fn generate_suggestion(
    strategy: SuggestionStrategy,
    n: usize,
    inputs: &SuggestionInputs<'_>,
    seed: Option<u64>,
) -> Result<Vec<u8>> {
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let n = n.min(POOL_SIZE as usize);

    let mut numbers = match strategy {
        SuggestionStrategy::Random => sample_from(&pool(), n, &mut rng),
        SuggestionStrategy::Hot => favored_numbers(inputs.hot, n, &mut rng),
        SuggestionStrategy::Cold => favored_numbers(inputs.cold, n, &mut rng),
        SuggestionStrategy::Smart => smart_numbers(n, inputs.patterns, &mut rng),
        SuggestionStrategy::Balanced => balanced_numbers(inputs.hot, inputs.cold, n, &mut rng),
        SuggestionStrategy::Weighted => weighted_numbers(inputs.weighted, n, &mut rng)?,
    };

    numbers.sort();
    Ok(numbers)
}

/// Take the favored set first, fill up from the rest of the pool.
fn favored_numbers(favored: &[u8], n: usize, rng: &mut StdRng) -> Vec<u8> {
    if favored.len() >= n {
        return sample_from(favored, n, rng);
    }
    let mut selected: Vec<u8> = favored.to_vec();
    let remaining: Vec<u8> = pool().into_iter().filter(|x| !selected.contains(x)).collect();
    selected.extend(sample_from(&remaining, n - selected.len(), rng));
    selected
}

/// Sample a 5-number core until it passes the pattern filter, then fill
/// up to `n`. Falls back to the fixed filter, then to pure random, so it
/// always terminates.
fn smart_numbers(n: usize, stats: Option<&PatternStats>, rng: &mut StdRng) -> Vec<u8> {
    let all = pool();
    if n < 5 {
        return sample_from(&all, n, rng);
    }

    for (filter_stats, attempts) in [(stats, 5000usize), (None, 1000)] {
        for _ in 0..attempts {
            let core = sample_from(&all, 5, rng);
            if is_pattern_reasonable(&core, filter_stats) {
                let mut selected = core;
                let remaining: Vec<u8> =
                    all.iter().copied().filter(|x| !selected.contains(x)).collect();
                selected.extend(sample_from(&remaining, n - 5, rng));
                return selected;
            }
        }
    }

    sample_from(&all, n, rng)
}

/// 3-4 hot numbers, 2-3 cold numbers, remainder random.
fn balanced_numbers(hot: &[u8], cold: &[u8], n: usize, rng: &mut StdRng) -> Vec<u8> {
    let hot_count = rng.random_range(3..=4usize).min(hot.len()).min(n);
    let mut selected = sample_from(hot, hot_count, rng);

    let cold_available: Vec<u8> = cold.iter().copied().filter(|x| !selected.contains(x)).collect();
    let cold_count = rng
        .random_range(2..=3usize)
        .min(cold_available.len())
        .min(n - selected.len());
    selected.extend(sample_from(&cold_available, cold_count, rng));

    let remaining: Vec<u8> = pool().into_iter().filter(|x| !selected.contains(x)).collect();
    let fill = n - selected.len();
    selected.extend(sample_from(&remaining, fill, rng));
    selected
}

/// Weighted sampling without replacement from a probability table.
fn weighted_numbers(probs: &[NumberProbability], n: usize, rng: &mut StdRng) -> Result<Vec<u8>> {
    if probs.is_empty() {
        return Ok(sample_from(&pool(), n, rng));
    }

    let mut available: Vec<(u8, f64)> = probs.iter().map(|p| (p.number, p.probability)).collect();
    let mut selected = Vec::with_capacity(n);

    for _ in 0..n.min(available.len()) {
        let weights: Vec<f64> = available.iter().map(|(_, w)| *w).collect();
        let dist = WeightedIndex::new(&weights)?;
        let idx = dist.sample(rng);
        let (number, _) = available.remove(idx);
        selected.push(number);
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto539_db::models::ProbabilityTag;

    fn inputs<'a>(
        hot: &'a [u8],
        cold: &'a [u8],
        weighted: &'a [NumberProbability],
    ) -> SuggestionInputs<'a> {
        SuggestionInputs {
            hot,
            cold,
            patterns: None,
            weighted,
        }
    }

    fn assert_valid(numbers: &[u8], n: usize) {
        assert_eq!(numbers.len(), n);
        for &x in numbers {
            assert!((1..=POOL_SIZE).contains(&x));
        }
        for pair in numbers.windows(2) {
            assert!(pair[0] < pair[1], "not sorted/distinct: {:?}", numbers);
        }
    }

    #[test]
    fn test_random_is_valid_and_seeded() {
        let ctx = inputs(&[], &[], &[]);
        let a = generate_suggestion(SuggestionStrategy::Random, 9, &ctx, Some(42)).unwrap();
        let b = generate_suggestion(SuggestionStrategy::Random, 9, &ctx, Some(42)).unwrap();
        assert_valid(&a, 9);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hot_prefers_hot_set() {
        let hot = [1u8, 5, 9, 13, 17, 21];
        let ctx = inputs(&hot, &[], &[]);
        let numbers = generate_suggestion(SuggestionStrategy::Hot, 9, &ctx, Some(7)).unwrap();
        assert_valid(&numbers, 9);
        for h in &hot {
            assert!(numbers.contains(h), "hot number {} missing from {:?}", h, numbers);
        }
    }

    #[test]
    fn test_cold_with_enough_candidates_samples_within() {
        let cold: Vec<u8> = (1..=20).collect();
        let ctx = inputs(&[], &cold, &[]);
        let numbers = generate_suggestion(SuggestionStrategy::Cold, 9, &ctx, Some(3)).unwrap();
        assert_valid(&numbers, 9);
        for x in &numbers {
            assert!(cold.contains(x));
        }
    }

    #[test]
    fn test_smart_core_passes_pattern_filter() {
        let ctx = inputs(&[], &[], &[]);
        let numbers = generate_suggestion(SuggestionStrategy::Smart, 9, &ctx, Some(11)).unwrap();
        assert_valid(&numbers, 9);
    }

    #[test]
    fn test_balanced_draws_from_both_sets() {
        let hot = [1u8, 2, 3, 4, 5, 6];
        let cold = [30u8, 31, 32, 33, 34, 35];
        let ctx = inputs(&hot, &cold, &[]);
        let numbers = generate_suggestion(SuggestionStrategy::Balanced, 9, &ctx, Some(19)).unwrap();
        assert_valid(&numbers, 9);
        assert!(numbers.iter().any(|x| hot.contains(x)));
        assert!(numbers.iter().any(|x| cold.contains(x)));
    }

    #[test]
    fn test_weighted_follows_probability_table() {
        // All mass on numbers 1-9: the sample must stay inside them.
        let probs: Vec<NumberProbability> = (1..=9u8)
            .map(|number| NumberProbability {
                number,
                probability: 1.0 / 9.0,
                tag: ProbabilityTag::Normal,
            })
            .collect();
        let ctx = inputs(&[], &[], &probs);
        let numbers = generate_suggestion(SuggestionStrategy::Weighted, 5, &ctx, Some(23)).unwrap();
        assert_valid(&numbers, 5);
        for x in &numbers {
            assert!(*x <= 9);
        }
    }
}
