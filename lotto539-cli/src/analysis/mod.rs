pub mod patterns;
pub mod sampler;
pub mod weighted;

use lotto539_db::models::{NumberProbability, NumberStats, ProbabilityTag, POOL_SIZE};

/// Frequency and gap per number over a window of draws, most recent
/// first. The gap is the index of the first draw containing the number.
pub fn compute_stats(draws: &[[u8; 5]]) -> Vec<NumberStats> {
    let mut stats: Vec<NumberStats> = (1..=POOL_SIZE)
        .map(|n| NumberStats {
            number: n,
            frequency: 0,
            gap: 0,
        })
        .collect();

    for (i, numbers) in draws.iter().enumerate() {
        for &n in numbers {
            let idx = (n - 1) as usize;
            if idx < stats.len() {
                stats[idx].frequency += 1;
                if stats[idx].gap == 0 && stats[idx].frequency == 1 {
                    stats[idx].gap = i as u32;
                }
            }
        }
    }

    for stat in &mut stats {
        if stat.frequency == 0 {
            stat.gap = draws.len() as u32;
        }
    }

    stats
}

/// Top `top_n` numbers by frequency and bottom `bottom_n`, the classic
/// hot/cold split used by the suggestion strategies.
pub fn hot_cold_numbers(stats: &[NumberStats], top_n: usize, bottom_n: usize) -> (Vec<u8>, Vec<u8>) {
    let mut sorted: Vec<&NumberStats> = stats.iter().collect();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.number.cmp(&b.number)));

    let hot = sorted.iter().take(top_n).map(|s| s.number).collect();
    let cold = sorted
        .iter()
        .rev()
        .take(bottom_n)
        .map(|s| s.number)
        .collect();
    (hot, cold)
}

pub fn tag_probabilities(probs: &mut [NumberProbability]) {
    let uniform = 1.0 / POOL_SIZE as f64;
    let threshold = 0.3;

    for p in probs.iter_mut() {
        let deviation = (p.probability - uniform) / uniform;
        if deviation > threshold {
            p.tag = ProbabilityTag::Hot;
        } else if deviation < -threshold {
            p.tag = ProbabilityTag::Cold;
        } else {
            p.tag = ProbabilityTag::Normal;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_stats_frequency_and_gap() {
        let draws = vec![[1, 2, 3, 4, 5], [1, 6, 7, 8, 9], [1, 2, 10, 11, 12]];
        let stats = compute_stats(&draws);

        let one = &stats[0];
        assert_eq!(one.frequency, 3);
        assert_eq!(one.gap, 0);

        let two = &stats[1];
        assert_eq!(two.frequency, 2);
        assert_eq!(two.gap, 0);

        let ten = &stats[9];
        assert_eq!(ten.frequency, 1);
        assert_eq!(ten.gap, 2);

        // Never drawn: gap equals the window size
        let thirty = &stats[29];
        assert_eq!(thirty.frequency, 0);
        assert_eq!(thirty.gap, 3);
    }

    #[test]
    fn test_hot_cold_split() {
        let draws = vec![[1, 2, 3, 4, 5], [1, 2, 3, 6, 7], [1, 2, 8, 9, 10]];
        let stats = compute_stats(&draws);
        let (hot, cold) = hot_cold_numbers(&stats, 3, 3);

        assert_eq!(hot.len(), 3);
        assert!(hot.contains(&1) && hot.contains(&2));
        assert_eq!(cold.len(), 3);
        for n in &cold {
            assert_eq!(stats[(*n - 1) as usize].frequency, 0);
        }
    }

    #[test]
    fn test_tag_probabilities() {
        let mut probs = vec![
            NumberProbability {
                number: 1,
                probability: 0.10,
                tag: ProbabilityTag::Normal,
            },
            NumberProbability {
                number: 2,
                probability: 0.001,
                tag: ProbabilityTag::Normal,
            },
            NumberProbability {
                number: 3,
                probability: 1.0 / POOL_SIZE as f64,
                tag: ProbabilityTag::Hot,
            },
        ];
        tag_probabilities(&mut probs);
        assert_eq!(probs[0].tag, ProbabilityTag::Hot);
        assert_eq!(probs[1].tag, ProbabilityTag::Cold);
        assert_eq!(probs[2].tag, ProbabilityTag::Normal);
    }
}
