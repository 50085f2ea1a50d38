//! Shape features of a single draw (head-digit spread, consecutive
//! runs, odd/even and small/large splits, span) and aggregate
//! statistics over a window, used to filter suggested combinations.

/// Features of one 5-number draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPattern {
    /// Numbers per head digit: [1-9, 10-19, 20-29, 30-39].
    pub head_counts: [u8; 4],
    pub max_consecutive: u8,
    pub has_consecutive: bool,
    pub odd_count: u8,
    pub even_count: u8,
    /// 1-19 versus 20-39.
    pub small_count: u8,
    pub large_count: u8,
    pub span: u8,
}

pub fn analyze_pattern(numbers: &[u8]) -> DrawPattern {
    let mut sorted: Vec<u8> = numbers.to_vec();
    sorted.sort();

    let mut head_counts = [0u8; 4];
    for &n in &sorted {
        let head = (n / 10).min(3) as usize;
        head_counts[head] += 1;
    }

    let mut max_consecutive = 1u8;
    let mut current = 1u8;
    let mut has_consecutive = false;
    for pair in sorted.windows(2) {
        if pair[1] == pair[0] + 1 {
            current += 1;
            has_consecutive = true;
        } else {
            max_consecutive = max_consecutive.max(current);
            current = 1;
        }
    }
    max_consecutive = max_consecutive.max(current);

    let odd_count = sorted.iter().filter(|n| *n % 2 == 1).count() as u8;
    let small_count = sorted.iter().filter(|&&n| n <= 19).count() as u8;
    let total = sorted.len() as u8;
    let span = match (sorted.first(), sorted.last()) {
        (Some(&min), Some(&max)) => max - min,
        _ => 0,
    };

    DrawPattern {
        head_counts,
        max_consecutive,
        has_consecutive,
        odd_count,
        even_count: total - odd_count,
        small_count,
        large_count: total - small_count,
        span,
    }
}

/// Distributions over a window of historical draws.
#[derive(Debug, Clone)]
pub struct PatternStats {
    pub total: usize,
    /// head_dist[group][count] = draws where `count` numbers fell in the group.
    pub head_dist: [[u32; 6]; 4],
    pub odd_dist: [u32; 6],
    pub with_consecutive: u32,
    pub span_min: u8,
    pub span_max: u8,
    span_sum: u64,
}

impl PatternStats {
    pub fn from_draws(draws: &[[u8; 5]]) -> Self {
        let mut stats = PatternStats {
            total: draws.len(),
            head_dist: [[0; 6]; 4],
            odd_dist: [0; 6],
            with_consecutive: 0,
            span_min: u8::MAX,
            span_max: 0,
            span_sum: 0,
        };

        for numbers in draws {
            let pattern = analyze_pattern(numbers);
            for group in 0..4 {
                stats.head_dist[group][pattern.head_counts[group] as usize] += 1;
            }
            stats.odd_dist[pattern.odd_count as usize] += 1;
            if pattern.has_consecutive {
                stats.with_consecutive += 1;
            }
            stats.span_min = stats.span_min.min(pattern.span);
            stats.span_max = stats.span_max.max(pattern.span);
            stats.span_sum += pattern.span as u64;
        }

        if stats.total == 0 {
            stats.span_min = 0;
        }
        stats
    }

    /// The head-group count seen most often for `group` (0..=3).
    pub fn most_common_head(&self, group: usize) -> u8 {
        let dist = &self.head_dist[group];
        let mut best = 0usize;
        for (count, &freq) in dist.iter().enumerate() {
            if freq > dist[best] {
                best = count;
            }
        }
        best as u8
    }

    pub fn consecutive_prob(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.with_consecutive as f64 / self.total as f64
    }

    pub fn avg_span(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.span_sum as f64 / self.total as f64
    }
}

/// Whether a 5-number group looks like historical draws. With stats,
/// each head-group count may exceed its historical mode by at most one;
/// without, the fixed fallback caps 1-9 numbers at three. Runs longer
/// than three and spans outside 10-35 are always rejected.
pub fn is_pattern_reasonable(numbers: &[u8], stats: Option<&PatternStats>) -> bool {
    let pattern = analyze_pattern(numbers);

    match stats {
        Some(s) => {
            for group in 0..4 {
                if pattern.head_counts[group] > s.most_common_head(group) + 1 {
                    return false;
                }
            }
            if pattern.max_consecutive > 3 {
                return false;
            }
        }
        None => {
            if pattern.head_counts[0] > 3 {
                return false;
            }
            if pattern.max_consecutive > 3 {
                return false;
            }
        }
    }

    (10..=35).contains(&pattern.span)
}
