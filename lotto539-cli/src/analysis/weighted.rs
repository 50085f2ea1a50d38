use lotto539_db::models::{Draw, NumberProbability, ProbabilityTag, POOL_SIZE};

/// Time-decayed frequency: each draw is weighted by `decay^days_ago`,
/// measured from the newest draw in the window so the result does not
/// depend on the wall clock. Scores are normalised into a probability
/// distribution; numbers never drawn get a small floor weight instead
/// of zero.
pub fn weighted_probabilities(draws: &[Draw], decay: f64) -> Vec<NumberProbability> {
    let mut scores = vec![0.0f64; POOL_SIZE as usize];

    if let Some(latest) = draws.iter().map(|d| d.date).max() {
        for draw in draws {
            let days_ago = (latest - draw.date).num_days().max(0) as i32;
            let weight = decay.powi(days_ago);
            for &n in &draw.numbers {
                let idx = (n - 1) as usize;
                if idx < scores.len() {
                    scores[idx] += weight;
                }
            }
        }
    }

    let floor = decay.powi(draws.len() as i32 + 1).max(1e-6);
    for score in &mut scores {
        if *score < floor {
            *score = floor;
        }
    }

    let total: f64 = scores.iter().sum();

    (1..=POOL_SIZE)
        .map(|n| {
            let probability = if total > 0.0 {
                scores[(n - 1) as usize] / total
            } else {
                1.0 / POOL_SIZE as f64
            };
            NumberProbability {
                number: n,
                probability,
                tag: ProbabilityTag::Normal,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draw(date: &str, numbers: [u8; 5]) -> Draw {
        Draw {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            numbers,
        }
    }

    #[test]
    fn test_weighted_sums_to_one() {
        let draws = vec![
            draw("2026-01-05", [1, 2, 3, 4, 5]),
            draw("2026-01-06", [6, 7, 8, 9, 10]),
            draw("2026-01-07", [11, 12, 13, 14, 15]),
        ];
        let probs = weighted_probabilities(&draws, 0.95);
        let sum: f64 = probs.iter().map(|p| p.probability).sum();
        assert!((sum - 1.0).abs() < 1e-10, "sum = {}", sum);
    }

    #[test]
    fn test_recent_draw_weighs_more() {
        let draws = vec![
            draw("2026-01-01", [1, 2, 3, 4, 5]),
            draw("2026-01-20", [6, 7, 8, 9, 10]),
        ];
        let probs = weighted_probabilities(&draws, 0.9);
        let p_old = probs.iter().find(|p| p.number == 1).unwrap().probability;
        let p_new = probs.iter().find(|p| p.number == 6).unwrap().probability;
        assert!(p_new > p_old, "P(6)={} should exceed P(1)={}", p_new, p_old);
    }

    #[test]
    fn test_undrawn_numbers_keep_floor_weight() {
        let draws = vec![draw("2026-01-05", [1, 2, 3, 4, 5])];
        let probs = weighted_probabilities(&draws, 0.95);
        let p_undrawn = probs.iter().find(|p| p.number == 39).unwrap().probability;
        assert!(p_undrawn > 0.0);
    }

    #[test]
    fn test_empty_window_is_uniform() {
        let probs = weighted_probabilities(&[], 0.95);
        let expected = 1.0 / POOL_SIZE as f64;
        for p in &probs {
            assert!((p.probability - expected).abs() < 1e-10);
        }
    }
}
